//! Query Interpreter — turns a free-text search phrase into structured
//! filter terms (skills, roles, locations, statuses, minimum experience).
//!
//! Matching is pure substring containment over fixed vocabulary tables, not
//! word-boundary tokenization, so overlapping keywords may both fire (e.g.
//! "javascript" also lights up "java"). That is accepted best-effort
//! behavior. Insertion order is preserved in every result set and
//! duplicates are never added.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::candidate::CandidateStatus;

/// Skill keywords recognized in search queries. Lowercase; matched by
/// substring containment.
const SKILL_KEYWORDS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "angular",
    "vue",
    "node.js",
    "python",
    "django",
    "flask",
    "java",
    "spring",
    "c#",
    ".net",
    "golang",
    "rust",
    "php",
    "ruby",
    "rails",
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "ci/cd",
    "git",
    "sql",
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "graphql",
    "rest api",
    "microservices",
    "machine learning",
    "devops",
];

/// Role keywords recognized in search queries.
const ROLE_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "architect",
    "designer",
    "scientist",
    "analyst",
    "manager",
    "consultant",
    "lead",
    "intern",
];

/// Surface phrases mapped to canonical lifecycle statuses. Multiple phrases
/// may map to the same status ("reached out" and "contacted" both mean
/// contacted).
const STATUS_KEYWORDS: &[(&str, CandidateStatus)] = &[
    ("reached out", CandidateStatus::Contacted),
    ("contacted", CandidateStatus::Contacted),
    ("interested", CandidateStatus::Interested),
    ("interviewing", CandidateStatus::Interviewing),
    ("in interview", CandidateStatus::Interviewing),
    ("hired", CandidateStatus::Hired),
    ("rejected", CandidateStatus::Rejected),
];

/// Gazetteer of place names checked against individual query tokens.
const KNOWN_PLACES: &[&str] = &[
    "bangalore",
    "bengaluru",
    "mumbai",
    "delhi",
    "hyderabad",
    "chennai",
    "pune",
    "kolkata",
    "gurgaon",
    "noida",
    "london",
    "berlin",
    "amsterdam",
    "dublin",
    "toronto",
    "vancouver",
    "seattle",
    "austin",
    "boston",
    "chicago",
    "denver",
    "atlanta",
    "remote",
];

static EXPERIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*\+?\s*(?:years?|yrs)\b").unwrap());

// Captures the word run following "in"/"from"/"at" up to the next
// non-letter delimiter. Runs over the lowercased query.
static PREPOSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:in|from|at)\s+([a-z][a-z ]*)").unwrap());

/// Structured filter terms derived from one search query. Ephemeral:
/// created per search, applied to the store filter, then discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryTerms {
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub locations: Vec<String>,
    pub statuses: Vec<CandidateStatus>,
    /// 0 means "no minimum".
    pub min_years_exp: u32,
}

impl QueryTerms {
    /// True when no vocabulary term matched and no experience threshold was
    /// found. The search handler falls back to a raw substring filter in
    /// this case rather than silently matching everything.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
            && self.roles.is_empty()
            && self.locations.is_empty()
            && self.statuses.is_empty()
            && self.min_years_exp == 0
    }
}

/// Interprets a free-text search phrase. Never errors; an unrecognizable
/// query yields all-empty `QueryTerms`.
pub fn interpret_query(raw: &str) -> QueryTerms {
    let query = raw.to_lowercase();
    let mut terms = QueryTerms::default();

    for skill in SKILL_KEYWORDS {
        if query.contains(skill) {
            push_unique(&mut terms.skills, skill.to_string());
        }
    }

    for role in ROLE_KEYWORDS {
        if query.contains(role) {
            push_unique(&mut terms.roles, role.to_string());
        }
    }

    for (phrase, status) in STATUS_KEYWORDS {
        if query.contains(phrase) && !terms.statuses.contains(status) {
            terms.statuses.push(*status);
        }
    }

    if let Some(caps) = EXPERIENCE_RE.captures(&query) {
        // Capped so the value survives the signed store column unchanged.
        terms.min_years_exp = caps[1]
            .parse::<u32>()
            .unwrap_or(0)
            .min(i32::MAX as u32);
    }

    // Locations, two ways: gazetteer lookup per token, then prepositional
    // capture, deduplicated against tokens already collected.
    for token in query.split_whitespace() {
        let token = token.trim_matches(|c: char| !c.is_alphanumeric());
        if KNOWN_PLACES.contains(&token) {
            push_unique(&mut terms.locations, token.to_string());
        }
    }
    for caps in PREPOSITION_RE.captures_iter(&query) {
        let place = caps[1].trim().to_string();
        if !place.is_empty() {
            push_unique(&mut terms.locations, place);
        }
    }

    terms
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aws_engineer_in_bangalore() {
        let terms = interpret_query("aws engineer in bangalore");
        assert_eq!(terms.skills, vec!["aws"]);
        assert_eq!(terms.roles, vec!["engineer"]);
        assert_eq!(terms.locations, vec!["bangalore"]);
        assert_eq!(terms.min_years_exp, 0);
        assert!(terms.statuses.is_empty());
    }

    #[test]
    fn test_five_plus_years_python_developer() {
        let terms = interpret_query("5+ years python developer");
        assert_eq!(terms.skills, vec!["python"]);
        assert_eq!(terms.roles, vec!["developer"]);
        assert_eq!(terms.min_years_exp, 5);
    }

    #[test]
    fn test_repeated_skill_added_once() {
        let terms = interpret_query("python dev, loves python, more python");
        assert_eq!(terms.skills.iter().filter(|s| *s == "python").count(), 1);
    }

    #[test]
    fn test_no_experience_pattern_resolves_to_zero() {
        let terms = interpret_query("senior react engineer in berlin");
        assert_eq!(terms.min_years_exp, 0);
    }

    #[test]
    fn test_yrs_abbreviation() {
        let terms = interpret_query("3 yrs java");
        assert_eq!(terms.min_years_exp, 3);
    }

    #[test]
    fn test_huge_experience_value_is_capped() {
        let terms = interpret_query("4294967295 years cobol");
        assert_eq!(terms.min_years_exp, i32::MAX as u32);
        assert!(i32::try_from(terms.min_years_exp).is_ok());
    }

    #[test]
    fn test_first_experience_match_wins() {
        let terms = interpret_query("7 years backend, 2 years frontend");
        assert_eq!(terms.min_years_exp, 7);
    }

    #[test]
    fn test_status_phrases_map_to_canonical() {
        let terms = interpret_query("candidates we reached out to in pune");
        assert_eq!(terms.statuses, vec![CandidateStatus::Contacted]);
    }

    #[test]
    fn test_two_surface_phrases_one_canonical_status() {
        let terms = interpret_query("reached out or contacted");
        assert_eq!(terms.statuses, vec![CandidateStatus::Contacted]);
    }

    #[test]
    fn test_prepositional_location_capture() {
        let terms = interpret_query("devops engineer from new york");
        assert!(terms.locations.contains(&"new york".to_string()));
    }

    #[test]
    fn test_gazetteer_and_preposition_deduplicate() {
        let terms = interpret_query("engineer in bangalore");
        assert_eq!(terms.locations, vec!["bangalore"]);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let terms = interpret_query("AWS Engineer In BANGALORE");
        assert_eq!(terms.skills, vec!["aws"]);
        assert_eq!(terms.locations, vec!["bangalore"]);
    }

    #[test]
    fn test_empty_query_yields_empty_terms() {
        let terms = interpret_query("");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_unmatched_query_yields_empty_terms() {
        let terms = interpret_query("quantum basket weaving");
        assert!(terms.is_empty());
    }

    #[test]
    fn test_overlapping_keywords_both_fire() {
        // Substring containment, not tokenization: "javascript" lights up
        // "java" too. Documented best-effort behavior.
        let terms = interpret_query("javascript expert");
        assert!(terms.skills.contains(&"javascript".to_string()));
        assert!(terms.skills.contains(&"java".to_string()));
    }
}
