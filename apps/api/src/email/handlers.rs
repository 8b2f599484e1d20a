use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::email::templates::outreach_template;
use crate::errors::AppError;
use crate::state::AppState;

const DEFAULT_TEMPLATE: &str = "default_outreach";
const CUSTOM_TEMPLATE: &str = "custom";

/// Marker written to `email_log.template_used`: the template name only when
/// the send actually used it, `custom` when the caller overrode any part.
fn template_marker(subject_overridden: bool, body_overridden: bool) -> &'static str {
    if subject_overridden || body_overridden {
        CUSTOM_TEMPLATE
    } else {
        DEFAULT_TEMPLATE
    }
}

#[derive(Debug, Deserialize)]
pub struct OutreachRequest {
    pub user_id: Uuid,
    pub role_title: String,
    /// Optional subject override; the template subject is used when absent.
    pub subject: Option<String>,
    /// Optional HTML body override.
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OutreachResponse {
    pub sent: bool,
    pub provider_id: String,
}

/// POST /api/v1/candidates/:id/outreach
/// Sends a templated outreach email to the candidate and logs it.
pub async fn handle_send_outreach(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OutreachRequest>,
) -> Result<Json<OutreachResponse>, AppError> {
    let candidate: Option<(String, Option<String>)> =
        sqlx::query_as("SELECT name, email FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?;

    let (name, email) = candidate.ok_or_else(|| AppError::NotFound(format!("Candidate {id}")))?;
    let email = email.filter(|e| !e.is_empty()).ok_or_else(|| {
        AppError::UnprocessableEntity("Candidate has no email address on file".to_string())
    })?;

    let template = outreach_template(&name, &req.role_title, &state.config.company_name);
    let template_used = template_marker(req.subject.is_some(), req.body.is_some());
    let subject = req.subject.unwrap_or(template.subject);
    let html = req.body.unwrap_or(template.html);

    let receipt = state
        .email
        .send(&email, &subject, &html)
        .await
        .map_err(|e| AppError::Email(e.to_string()))?;

    sqlx::query(
        "INSERT INTO email_log (candidate_id, user_id, subject, body, template_used) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(req.user_id)
    .bind(&subject)
    .bind(&html)
    .bind(template_used)
    .execute(&state.db)
    .await?;

    Ok(Json(OutreachResponse {
        sent: true,
        provider_id: receipt.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_marker_default_when_nothing_overridden() {
        assert_eq!(template_marker(false, false), DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_template_marker_custom_on_any_override() {
        assert_eq!(template_marker(true, false), CUSTOM_TEMPLATE);
        assert_eq!(template_marker(false, true), CUSTOM_TEMPLATE);
        assert_eq!(template_marker(true, true), CUSTOM_TEMPLATE);
    }
}
