//! Resume ingestion pipeline: document-AI transcription → heuristic field
//! extraction → embedding → storage upload → candidate insert.

use chrono::Datelike;
use tracing::{info, warn};
use uuid::Uuid;

use crate::docai::{local_pdf_text, mime_for};
use crate::errors::AppError;
use crate::extract::{extract_current_title, extract_fields, ResumeFields};
use crate::state::AppState;
use crate::storage::upload_resume_file;

/// Transcriptions shorter than this are treated as extraction failures
/// (scanned PDFs with no text layer, corrupted files).
const MIN_TEXT_LEN: usize = 100;

pub struct IngestOutcome {
    pub candidate_id: Uuid,
    pub fields: ResumeFields,
    pub current_title: Option<String>,
    pub resume_url: String,
}

pub async fn ingest_resume(
    state: &AppState,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<IngestOutcome, AppError> {
    let file_name = file_name.to_lowercase();
    if mime_for(&file_name).is_none() {
        return Err(AppError::Validation(
            "Only PDF, DOC, DOCX, TXT, PNG and JPG files are supported.".to_string(),
        ));
    }

    let text = transcribe(state, &file_name, &bytes).await?;
    if text.trim().len() < MIN_TEXT_LEN {
        return Err(AppError::UnprocessableEntity(
            "Could not extract meaningful text from the resume. Please check the file.".to_string(),
        ));
    }

    let current_year = chrono::Utc::now().year();
    let fields = extract_fields(&text, current_year);
    let current_title = extract_current_title(&text);

    let embedding = state.embedder.embed(&text).await?;

    let resume_url = upload_resume_file(
        &state.s3,
        &state.config.s3_endpoint,
        &state.config.s3_bucket,
        &file_name,
        bytes,
    )
    .await?;

    let candidate_id = store_candidate(
        state,
        &fields,
        current_title.as_deref(),
        &text,
        &resume_url,
        &embedding,
    )
    .await?;

    info!(
        "Ingested resume {file_name} as candidate {candidate_id} ({} skills, {} years exp)",
        fields.skills.len(),
        fields.years_exp
    );

    Ok(IngestOutcome {
        candidate_id,
        fields,
        current_title,
        resume_url,
    })
}

/// Hosted transcription with a local fallback for PDFs. Non-PDF failures
/// propagate as document-AI errors.
async fn transcribe(state: &AppState, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
    match state.docai.transcribe(file_name, bytes).await {
        Ok(text) => Ok(text),
        Err(e) if file_name.ends_with(".pdf") => {
            warn!("Document AI failed for {file_name}, trying local PDF extraction: {e}");
            local_pdf_text(bytes).ok_or_else(|| AppError::DocumentAi(e.to_string()))
        }
        Err(e) => Err(AppError::DocumentAi(e.to_string())),
    }
}

/// Inserts the candidate plus its skill rows and initial status in one
/// transaction.
async fn store_candidate(
    state: &AppState,
    fields: &ResumeFields,
    current_title: Option<&str>,
    raw_text: &str,
    resume_url: &str,
    embedding: &[f32],
) -> Result<Uuid, AppError> {
    let mut tx = state.db.begin().await?;

    let candidate_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO candidates
            (name, email, current_title, location, work_auth, years_exp,
             resume_url, raw_text, embedding)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id
        "#,
    )
    .bind(&fields.name)
    .bind(Some(&fields.email).filter(|e| !e.is_empty()))
    .bind(current_title.unwrap_or("Unknown Position"))
    .bind(if fields.location.is_empty() {
        "Unknown Location"
    } else {
        fields.location.as_str()
    })
    .bind("Unknown")
    .bind(fields.years_exp as i32)
    .bind(resume_url)
    .bind(raw_text)
    .bind(embedding)
    .fetch_one(&mut *tx)
    .await?;

    for skill in &fields.skills {
        sqlx::query("INSERT INTO candidate_skills (candidate_id, skill) VALUES ($1, $2)")
            .bind(candidate_id)
            .bind(skill)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("INSERT INTO candidate_status (candidate_id, status) VALUES ($1, 'new')")
        .bind(candidate_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(candidate_id)
}
