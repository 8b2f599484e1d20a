use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::ingest::ingest_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub candidate_id: Uuid,
    pub name: String,
    pub email: String,
    pub current_title: Option<String>,
    pub location: String,
    pub years_exp: u32,
    pub skills: Vec<String>,
    pub resume_url: String,
}

/// POST /api/v1/resumes — multipart upload with a single `file` part.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field
                .file_name()
                .ok_or_else(|| AppError::Validation("File part is missing a filename".to_string()))?
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
            upload = Some((file_name, bytes.to_vec()));
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let outcome = ingest_resume(&state, &file_name, bytes).await?;

    Ok(Json(ResumeUploadResponse {
        candidate_id: outcome.candidate_id,
        name: outcome.fields.name,
        email: outcome.fields.email,
        current_title: outcome.current_title,
        location: outcome.fields.location,
        years_exp: outcome.fields.years_exp,
        skills: outcome.fields.skills,
        resume_url: outcome.resume_url,
    }))
}
