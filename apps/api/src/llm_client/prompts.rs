//! Prompt templates for the LLM client.

pub const SUMMARY_SYSTEM: &str = "You are a helpful AI recruiter assistant that analyzes resumes \
and provides concise summaries of candidate fit.";

/// Candidate-fit summary prompt. `{resume_text}` and `{job_description}`
/// are replaced by the caller.
pub const SUMMARY_PROMPT_TEMPLATE: &str = "Review this resume:\n\n{resume_text}\n\nFor this job \
description:\n\n{job_description}\n\nProvide a concise 2-3 sentence summary of why this candidate \
might be a good fit.";

pub fn build_summary_prompt(resume_text: &str, job_description: &str) -> String {
    SUMMARY_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_substitutes_both_slots() {
        let prompt = build_summary_prompt("RESUME BODY", "JD BODY");
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }
}
