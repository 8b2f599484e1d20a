//! Result deduplication — collapses raw joined rows (one per candidate ×
//! skill) into one record per candidate with a merged skill list and a
//! resolved status.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::candidate::{CandidateStatus, CandidateView, JoinedRow};

/// Merges joined rows into candidate view models by a single linear pass.
///
/// The first row seen for a candidate id initializes the record from that
/// row's scalar fields; its status sub-structure wins (absent ⇒ `new`).
/// Every row may contribute a skill, appended only if non-empty and not
/// already present. Output order is order of first appearance.
pub fn merge_joined_rows(rows: Vec<JoinedRow>) -> Vec<CandidateView> {
    let mut merged: Vec<CandidateView> = Vec::new();
    let mut index_by_id: HashMap<Uuid, usize> = HashMap::new();

    for row in rows {
        let idx = match index_by_id.get(&row.id) {
            Some(&idx) => idx,
            None => {
                let status = row
                    .status
                    .as_deref()
                    .map(CandidateStatus::parse)
                    .unwrap_or_default();
                merged.push(CandidateView {
                    id: row.id,
                    name: row.name.clone(),
                    current_title: row.current_title.clone(),
                    location: row.location.clone(),
                    work_auth: row.work_auth.clone(),
                    years_exp: row.years_exp.unwrap_or(0),
                    skills: Vec::new(),
                    status,
                    resume_url: row.resume_url.clone(),
                    summary: row.summary.clone(),
                });
                index_by_id.insert(row.id, merged.len() - 1);
                merged.len() - 1
            }
        };

        if let Some(skill) = row.skill {
            if !skill.is_empty() && !merged[idx].skills.contains(&skill) {
                merged[idx].skills.push(skill);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Uuid, name: &str, skill: Option<&str>, status: Option<&str>) -> JoinedRow {
        JoinedRow {
            id,
            name: name.to_string(),
            current_title: "Software Engineer".to_string(),
            location: "Bangalore, India".to_string(),
            work_auth: Some("Citizen".to_string()),
            years_exp: Some(4),
            resume_url: None,
            summary: None,
            skill: skill.map(String::from),
            status: status.map(String::from),
        }
    }

    #[test]
    fn test_distinct_skills_union_one_record() {
        let id = Uuid::new_v4();
        let rows = vec![
            row(id, "Asha", Some("python"), Some("contacted")),
            row(id, "Asha", Some("aws"), Some("contacted")),
            row(id, "Asha", Some("docker"), Some("contacted")),
        ];
        let merged = merge_joined_rows(rows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].skills, vec!["python", "aws", "docker"]);
    }

    #[test]
    fn test_duplicate_skill_rows_appear_once() {
        let id = Uuid::new_v4();
        let rows = vec![
            row(id, "Asha", Some("python"), None),
            row(id, "Asha", Some("python"), None),
        ];
        let merged = merge_joined_rows(rows);
        assert_eq!(merged[0].skills, vec!["python"]);
    }

    #[test]
    fn test_absent_status_defaults_to_new() {
        let id = Uuid::new_v4();
        let merged = merge_joined_rows(vec![row(id, "Asha", Some("sql"), None)]);
        assert_eq!(merged[0].status, CandidateStatus::New);
    }

    #[test]
    fn test_first_status_row_wins() {
        let id = Uuid::new_v4();
        let rows = vec![
            row(id, "Asha", Some("sql"), Some("interviewing")),
            row(id, "Asha", Some("aws"), Some("hired")),
        ];
        let merged = merge_joined_rows(rows);
        assert_eq!(merged[0].status, CandidateStatus::Interviewing);
    }

    #[test]
    fn test_order_of_first_appearance_preserved() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            row(a, "Asha", Some("python"), None),
            row(b, "Ravi", Some("java"), None),
            row(a, "Asha", Some("aws"), None),
        ];
        let merged = merge_joined_rows(rows);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Asha");
        assert_eq!(merged[1].name, "Ravi");
    }

    #[test]
    fn test_candidate_without_skills() {
        let id = Uuid::new_v4();
        let merged = merge_joined_rows(vec![row(id, "Asha", None, None)]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].skills.is_empty());
    }

    #[test]
    fn test_empty_skill_value_ignored() {
        let id = Uuid::new_v4();
        let merged = merge_joined_rows(vec![row(id, "Asha", Some(""), None)]);
        assert!(merged[0].skills.is_empty());
    }

    #[test]
    fn test_output_cardinality_bounded_by_distinct_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            row(a, "Asha", Some("python"), None),
            row(a, "Asha", Some("aws"), None),
            row(b, "Ravi", None, None),
            row(b, "Ravi", Some("java"), None),
        ];
        assert_eq!(merge_joined_rows(rows).len(), 2);
    }
}
