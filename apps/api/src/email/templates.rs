//! Canned outreach email templates.

/// Subject + HTML body of one outreach email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplate {
    pub subject: String,
    pub html: String,
}

/// Builds the default outreach template for a candidate and role.
pub fn outreach_template(
    candidate_name: &str,
    role_title: &str,
    company_name: &str,
) -> EmailTemplate {
    EmailTemplate {
        subject: format!("Interested in {role_title} at {company_name}"),
        html: format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <p>Hi {candidate_name},</p>
  <p>I hope this message finds you well. I came across your profile and was particularly impressed by your experience.</p>
  <p>We're currently looking for a {role_title} at {company_name}, and I believe your background could be a great fit for this role.</p>
  <p>Would you be open to a brief conversation about this opportunity?</p>
  <p>Best regards,<br/>The {company_name} Team</p>
</div>"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outreach_template_substitutes_all_fields() {
        let t = outreach_template("Jane Doe", "Senior Engineer", "TechCo");
        assert_eq!(t.subject, "Interested in Senior Engineer at TechCo");
        assert!(t.html.contains("Hi Jane Doe,"));
        assert!(t.html.contains("Senior Engineer at TechCo"));
        assert!(t.html.contains("The TechCo Team"));
    }

    #[test]
    fn test_outreach_template_is_html() {
        let t = outreach_template("Jane", "Engineer", "TechCo");
        assert!(t.html.starts_with("<div"));
    }
}
