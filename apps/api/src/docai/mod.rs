/// Document-AI client — transcribes resume files (image, PDF, DOCX, plain
/// text) into plain text via the Gemini generateContent API.
///
/// ARCHITECTURAL RULE: all document transcription goes through this module;
/// callers never see the wire format, only text or a `DocAiError`.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all transcription calls. Hardcoded to prevent drift.
pub const MODEL: &str = "gemini-2.5-flash-preview-04-17";

const PARSE_PROMPT: &str = "You are an expert resume parser. Extract all text content from the \
following resume document. Present the text clearly and accurately. Maintain the original \
structure, sections, and line breaks as much as possible. Output only the extracted text.";

#[derive(Debug, Error)]
pub enum DocAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid API credential")]
    InvalidCredential,

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No text content found in the API response")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct DocAiClient {
    client: Client,
    api_key: String,
}

impl DocAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Transcribes a file into plain text. The MIME type is derived from
    /// the file name; plain-text payloads skip the inline-data wrapping.
    pub async fn transcribe(&self, file_name: &str, bytes: &[u8]) -> Result<String, DocAiError> {
        let mime = mime_for(file_name).ok_or_else(|| {
            DocAiError::UnsupportedType(extension_of(file_name).unwrap_or_default().to_string())
        })?;

        let parts = if mime == "text/plain" {
            let text = String::from_utf8_lossy(bytes).into_owned();
            vec![Part::Text {
                text: format!("{PARSE_PROMPT}\n\nResume Text:\n{text}"),
            }]
        } else {
            vec![
                Part::Text {
                    text: PARSE_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime.to_string(),
                        data: BASE64.encode(bytes),
                    },
                },
            ]
        };

        let url = format!(
            "{GEMINI_API_BASE}/{MODEL}:generateContent?key={}",
            self.api_key
        );
        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                contents: vec![Content { parts }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("Document AI returned {status}: {message}");
            if message.contains("API key not valid") {
                return Err(DocAiError::InvalidCredential);
            }
            return Err(DocAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|parts| {
                let joined: String = parts.into_iter().filter_map(|p| p.text).collect();
                (!joined.trim().is_empty()).then(|| joined.trim().to_string())
            })
            .ok_or(DocAiError::EmptyContent)?;

        debug!("Document AI transcribed {file_name}: {} chars", text.len());
        Ok(text)
    }
}

/// Local PDF text extraction, used as a fallback when the hosted call
/// fails for a PDF payload.
pub fn local_pdf_text(bytes: &[u8]) -> Option<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .ok()
        .filter(|t| !t.trim().is_empty())
}

pub fn mime_for(file_name: &str) -> Option<&'static str> {
    match extension_of(file_name)? {
        "pdf" => Some("application/pdf"),
        "docx" => {
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        "doc" => Some("application/msword"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_supported_types() {
        assert_eq!(mime_for("resume.pdf"), Some("application/pdf"));
        assert_eq!(mime_for("resume.PDF"), None); // extensions are lowercased upstream
        assert_eq!(mime_for("photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_for("notes.txt"), Some("text/plain"));
    }

    #[test]
    fn test_mime_for_unsupported_type() {
        assert_eq!(mime_for("archive.zip"), None);
        assert_eq!(mime_for("no_extension"), None);
    }

    #[test]
    fn test_inline_data_serializes_snake_case() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "application/pdf".to_string(),
                data: "QUJD".to_string(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "application/pdf");
        assert_eq!(json["inline_data"]["data"], "QUJD");
    }
}
