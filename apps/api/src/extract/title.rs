//! Current-title extraction — an ordered chain of labelled patterns tried
//! first-match-wins, with a job-title-vocabulary line scan as fallback.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::vocab::JOB_TITLES;

// Labelled patterns in priority order. Each captures the remainder of the
// line up to a comma, period, semicolon, or line end.
static TITLE_LABEL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["current(?:ly)?", "present", "job title", "position", "title", "role"]
        .iter()
        .map(|label| Regex::new(&format!(r"(?i)\b{label}\s*:\s*([^\n,.;]+)")).unwrap())
        .collect()
});

// Years 2015–2029 count as "recent" for the fallback line scan.
static RECENT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20(1[5-9]|2[0-9])").unwrap());

/// Extracts the candidate's current title. `None` signals "unknown
/// position" to the caller.
pub fn extract_current_title(text: &str) -> Option<String> {
    for pattern in TITLE_LABEL_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            let title = caps[1].trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }

    // Fallback: a line naming a known job title alongside a recent year is
    // very likely the current engagement.
    for line in text.lines() {
        if JOB_TITLES.iter().any(|title| line.contains(title)) && RECENT_YEAR_RE.is_match(line) {
            return Some(line.trim().to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_current_line() {
        let text = "Summary\nCurrently: Senior Backend Engineer, Acme";
        assert_eq!(
            extract_current_title(text),
            Some("Senior Backend Engineer".to_string())
        );
    }

    #[test]
    fn test_labelled_position_line() {
        let text = "Position: Staff Engineer\nLocation: Pune";
        assert_eq!(extract_current_title(text), Some("Staff Engineer".to_string()));
    }

    #[test]
    fn test_label_priority_order() {
        // "current" outranks "role" even when "role" appears first.
        let text = "Role: Analyst\nCurrent: Engineering Manager";
        assert_eq!(
            extract_current_title(text),
            Some("Engineering Manager".to_string())
        );
    }

    #[test]
    fn test_capture_stops_at_period() {
        let text = "Title: Data Engineer. Worked on pipelines";
        assert_eq!(extract_current_title(text), Some("Data Engineer".to_string()));
    }

    #[test]
    fn test_fallback_title_vocab_with_recent_year() {
        let text = "Experience\nSoftware Engineer at Acme (2021 - 2024)\nB.Tech 2014";
        assert_eq!(
            extract_current_title(text),
            Some("Software Engineer at Acme (2021 - 2024)".to_string())
        );
    }

    #[test]
    fn test_fallback_requires_recent_year() {
        let text = "Software Engineer at Acme (2010 - 2012)";
        assert_eq!(extract_current_title(text), None);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(extract_current_title("Jane Doe\njane@x.com"), None);
    }
}
