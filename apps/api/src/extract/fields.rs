//! Field-level extraction heuristics: name, email, phone, location, years
//! of experience, and skills. Each extractor is pure and fails soft.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extract::vocab::{COMMON_SKILLS, KNOWN_CITIES};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").unwrap());

// Loose phone shape: optional country code, optional parens, digit runs
// with space/dash/dot separators. Best-effort.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(?\+?\d[\d ()\.\-]{7,}\d").unwrap());

// "2018 - 2020", "2021-present", "2019 – current" (hyphen or dash).
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(20\d{2})\s*[-–—]\s*(20\d{2}|present|current)").unwrap()
});

static EXPLICIT_EXPERIENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\+?\s*years?\s+of\s+experience").unwrap());

/// Labels that introduce an explicit location line.
const LOCATION_LABELS: &[&str] = &["location:", "address:", "city:", "based in", "residing in"];

/// Structured fields recovered from resume text. Defaults are the
/// documented soft-miss values: empty strings, 0 years, empty skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub years_exp: u32,
    pub skills: Vec<String>,
}

/// Runs every sub-extraction over the text. `current_year` resolves
/// "present"/"current" in experience ranges; injected so the function stays
/// pure and the tests deterministic.
pub fn extract_fields(text: &str, current_year: i32) -> ResumeFields {
    ResumeFields {
        name: extract_name(text),
        email: extract_email(text),
        phone: extract_phone(text),
        location: extract_location(text),
        years_exp: extract_years_exp(text, current_year),
        skills: extract_skills(text),
    }
}

/// First of the first 5 lines whose trimmed length is in (3, 30), contains
/// no '@' or ':' and does not start with a digit.
pub fn extract_name(text: &str) -> String {
    for line in text.lines().take(5) {
        let line = line.trim();
        if line.len() > 3
            && line.len() < 30
            && !line.contains('@')
            && !line.contains(':')
            && !line.chars().next().is_some_and(|c| c.is_ascii_digit())
        {
            return line.to_string();
        }
    }
    String::new()
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Labelled location lines first ("Location: X"), then a whole-text scan
/// against the city list, first match wins.
pub fn extract_location(text: &str) -> String {
    for line in text.lines() {
        let lower = line.to_lowercase();
        for label in LOCATION_LABELS {
            if let Some(index) = lower.find(label) {
                let mut location = line[index + label.len()..].trim();
                location = location.strip_prefix(':').unwrap_or(location).trim();
                if !location.is_empty() {
                    return location.to_string();
                }
            }
        }
    }

    let lower_text = text.to_lowercase();
    for city in KNOWN_CITIES {
        if lower_text.contains(&city.to_lowercase()) {
            return city.to_string();
        }
    }

    String::new()
}

/// Sums the span of every "YYYY - YYYY|present|current" range in the text,
/// each contributing max(0, end - start) years. When no ranges exist, falls
/// back to an explicit "<N>+ years of experience" statement.
pub fn extract_years_exp(text: &str, current_year: i32) -> u32 {
    let mut total: i32 = 0;
    let mut found_range = false;

    for caps in YEAR_RANGE_RE.captures_iter(text) {
        found_range = true;
        let start: i32 = match caps[1].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        let end_str = caps[2].to_lowercase();
        let end: i32 = if end_str == "present" || end_str == "current" {
            current_year
        } else {
            match end_str.parse() {
                Ok(y) => y,
                Err(_) => continue,
            }
        };
        total += (end - start).max(0);
    }

    if found_range {
        return total.max(0) as u32;
    }

    EXPLICIT_EXPERIENCE_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Tests each vocabulary entry with a case-insensitive word-boundary match
/// and reports matches in the entry's canonical casing. Each entry is
/// tested once, so duplicates are impossible.
pub fn extract_skills(text: &str) -> Vec<String> {
    COMMON_SKILLS
        .iter()
        .filter(|skill| skill_pattern(skill).is_match(text))
        .map(|s| s.to_string())
        .collect()
}

// `\b` only works against word characters, so entries like "C#" or ".NET"
// get a boundary only on the alphanumeric side.
fn skill_pattern(skill: &str) -> Regex {
    let escaped = regex::escape(skill);
    let leading = if skill.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let trailing = if skill.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    Regex::new(&format!("(?i){leading}{escaped}{trailing}")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE: &str =
        "Jane Doe\njane@x.com\nSoftware Engineer\n2019-2022 Acme Corp\n2022-present BigCo";

    #[test]
    fn test_jane_doe_scenario() {
        let fields = extract_fields(JANE, 2026);
        assert_eq!(fields.name, "Jane Doe");
        assert_eq!(fields.email, "jane@x.com");
        assert_eq!(fields.years_exp, (2022 - 2019) + (2026 - 2022));
    }

    #[test]
    fn test_name_skips_emails_and_labels() {
        let text = "jane@x.com\nPhone: 555-123\nJane Doe\nEngineer";
        assert_eq!(extract_name(text), "Jane Doe");
    }

    #[test]
    fn test_name_skips_lines_starting_with_digit() {
        let text = "2021 Annual Resume\nJane Doe";
        assert_eq!(extract_name(text), "Jane Doe");
    }

    #[test]
    fn test_name_default_is_empty() {
        assert_eq!(extract_name("a\n@b\n1x\n:\n"), "");
    }

    #[test]
    fn test_email_exact_address_returned() {
        let text = "Contact jane.doe-1@sub.example.co for details";
        assert_eq!(extract_email(text), "jane.doe-1@sub.example.co");
    }

    #[test]
    fn test_email_default_is_empty() {
        assert_eq!(extract_email("no contact details here"), "");
    }

    #[test]
    fn test_phone_with_country_code() {
        let text = "Phone: +91 98765 43210";
        assert_eq!(extract_phone(text), "+91 98765 43210");
    }

    #[test]
    fn test_phone_with_parens() {
        let text = "Call (555) 123-4567 anytime";
        assert_eq!(extract_phone(text), "(555) 123-4567");
    }

    #[test]
    fn test_phone_default_is_empty() {
        assert_eq!(extract_phone("no digits to speak of"), "");
    }

    #[test]
    fn test_location_from_label() {
        let text = "Jane Doe\nLocation: Pune, India\n";
        assert_eq!(extract_location(text), "Pune, India");
    }

    #[test]
    fn test_location_based_in_label() {
        let text = "Jane Doe\nBased in London\n";
        assert_eq!(extract_location(text), "London");
    }

    #[test]
    fn test_location_city_list_fallback() {
        let text = "Jane Doe\nWorked across Hyderabad offices\n";
        assert_eq!(extract_location(text), "Hyderabad");
    }

    #[test]
    fn test_location_default_is_empty() {
        assert_eq!(extract_location("Jane Doe\nEngineer\n"), "");
    }

    #[test]
    fn test_years_from_ranges_sums_spans() {
        let text = "2018 - 2020 Acme\n2021-present BigCo";
        assert_eq!(extract_years_exp(text, 2026), (2020 - 2018) + (2026 - 2021));
    }

    #[test]
    fn test_years_backwards_range_contributes_zero() {
        let text = "2022 - 2020 Acme";
        assert_eq!(extract_years_exp(text, 2026), 0);
    }

    #[test]
    fn test_years_explicit_statement_fallback() {
        let text = "Over 8+ years of experience building services";
        assert_eq!(extract_years_exp(text, 2026), 8);
    }

    #[test]
    fn test_years_default_is_zero() {
        assert_eq!(extract_years_exp("fresh graduate", 2026), 0);
    }

    #[test]
    fn test_skills_canonical_casing() {
        let text = "worked with python, AWS and docker daily";
        let skills = extract_skills(text);
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"AWS".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_skills_word_boundary_blocks_substrings() {
        // "Java" must not fire inside "JavaScript"-free words like "Javanese".
        let skills = extract_skills("studied Javanese culture");
        assert!(!skills.contains(&"Java".to_string()));
    }

    #[test]
    fn test_skills_non_word_edges_still_match() {
        let skills = extract_skills("shipped services in C# and .NET");
        assert!(skills.contains(&"C#".to_string()));
        assert!(skills.contains(&".NET".to_string()));
    }

    #[test]
    fn test_skills_empty_text() {
        assert!(extract_skills("").is_empty());
    }
}
