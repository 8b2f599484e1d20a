use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle status of a candidate. Stored as lowercase text in the
/// `candidate_status` relation; absent rows resolve to `New`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    New,
    Contacted,
    Interested,
    Interviewing,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::New => "new",
            CandidateStatus::Contacted => "contacted",
            CandidateStatus::Interested => "interested",
            CandidateStatus::Interviewing => "interviewing",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }

    /// Parses a stored status value. Unknown values resolve to `New` rather
    /// than erroring, matching how absent status rows are treated.
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Strict variant for validating client input.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(CandidateStatus::New),
            "contacted" => Some(CandidateStatus::Contacted),
            "interested" => Some(CandidateStatus::Interested),
            "interviewing" => Some(CandidateStatus::Interviewing),
            "hired" => Some(CandidateStatus::Hired),
            "rejected" => Some(CandidateStatus::Rejected),
            _ => None,
        }
    }
}

/// One row of the candidates × skills × status join, as returned by the
/// store. One row per (candidate, skill); the status columns repeat on every
/// row for the same candidate. Transient — exists only until deduplication.
#[derive(Debug, Clone, FromRow)]
pub struct JoinedRow {
    pub id: Uuid,
    pub name: String,
    pub current_title: String,
    pub location: String,
    pub work_auth: Option<String>,
    pub years_exp: Option<i32>,
    pub resume_url: Option<String>,
    pub summary: Option<String>,
    pub skill: Option<String>,
    pub status: Option<String>,
}

/// One-record-per-candidate view model produced by deduplication.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateView {
    pub id: Uuid,
    pub name: String,
    pub current_title: String,
    pub location: String,
    pub work_auth: Option<String>,
    pub years_exp: i32,
    pub skills: Vec<String>,
    pub status: CandidateStatus,
    pub resume_url: Option<String>,
    pub summary: Option<String>,
}

/// Candidate detail returned by GET /api/v1/candidates/:id.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub candidate: CandidateView,
    pub achievements: Vec<String>,
    pub shortlisted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_as_str() {
        for status in [
            CandidateStatus::New,
            CandidateStatus::Contacted,
            CandidateStatus::Interested,
            CandidateStatus::Interviewing,
            CandidateStatus::Hired,
            CandidateStatus::Rejected,
        ] {
            assert_eq!(CandidateStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_defaults_to_new() {
        assert_eq!(CandidateStatus::parse("archived"), CandidateStatus::New);
        assert_eq!(CandidateStatus::parse(""), CandidateStatus::New);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CandidateStatus::Interviewing).unwrap();
        assert_eq!(json, r#""interviewing""#);
    }
}
