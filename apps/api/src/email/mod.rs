/// Email client — transactional outreach sending via the Resend API.
///
/// Accepts recipient, subject, and HTML body; a plain-text alternative is
/// derived by stripping tags. Provider errors are surfaced with their
/// payload rather than swallowed.
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;
pub mod templates;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error (status {status}): {name}: {message}")]
    Provider {
        status: u16,
        name: String,
        message: String,
    },
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

#[derive(Clone)]
pub struct EmailClient {
    client: Client,
    api_key: String,
    from: String,
}

impl EmailClient {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            from,
        }
    }

    /// Sends one HTML email. Returns the provider message id on success.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<SendReceipt, EmailError> {
        let request_body = SendRequest {
            from: &self.from,
            to: vec![to],
            subject,
            html,
            text: strip_html_tags(html),
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: ProviderError = serde_json::from_str(&body).unwrap_or(ProviderError {
                name: "unknown".to_string(),
                message: body,
            });
            warn!(
                "Email provider returned {status}: {}: {}",
                parsed.name, parsed.message
            );
            return Err(EmailError::Provider {
                status: status.as_u16(),
                name: parsed.name,
                message: parsed.message,
            });
        }

        let receipt: SendReceipt = response.json().await?;
        debug!("Email sent to {to}: provider id {}", receipt.id);
        Ok(receipt)
    }
}

/// Strips HTML tags for the plain-text alternative body.
pub fn strip_html_tags(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_tags_removes_markup() {
        let html = "<div><p>Hi <b>Jane</b>,</p></div>";
        assert_eq!(strip_html_tags(html), "Hi Jane,");
    }

    #[test]
    fn test_strip_html_tags_plain_text_untouched() {
        assert_eq!(strip_html_tags("no markup here"), "no markup here");
    }
}
