use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::{build_summary_prompt, SUMMARY_SYSTEM};
use crate::models::candidate::{CandidateDetail, CandidateStatus, CandidateView, JoinedRow};
use crate::search::dedup::merge_joined_rows;
use crate::state::AppState;

const JOINED_BY_ID: &str = r#"
SELECT c.id, c.name, c.current_title, c.location, c.work_auth, c.years_exp,
       c.resume_url, c.summary, s.skill, st.status
FROM candidates c
LEFT JOIN candidate_skills s ON s.candidate_id = c.id
LEFT JOIN candidate_status st ON st.candidate_id = c.id
WHERE c.id = $1
"#;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub count: usize,
    pub candidates: Vec<CandidateView>,
}

/// GET /api/v1/candidates?status= — all candidates, optionally filtered by
/// lifecycle status.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, AppError> {
    let status = params
        .status
        .as_deref()
        .map(|s| {
            CandidateStatus::try_parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown status '{s}'")))
        })
        .transpose()?;

    let rows: Vec<JoinedRow> = match status {
        Some(status) => {
            sqlx::query_as(
                r#"
                SELECT c.id, c.name, c.current_title, c.location, c.work_auth, c.years_exp,
                       c.resume_url, c.summary, s.skill, st.status
                FROM candidates c
                LEFT JOIN candidate_skills s ON s.candidate_id = c.id
                LEFT JOIN candidate_status st ON st.candidate_id = c.id
                WHERE COALESCE(st.status, 'new') = $1
                ORDER BY c.created_at DESC, c.id
                "#,
            )
            .bind(status.as_str())
            .fetch_all(&state.db)
            .await?
        }
        None => {
            sqlx::query_as(
                r#"
                SELECT c.id, c.name, c.current_title, c.location, c.work_auth, c.years_exp,
                       c.resume_url, c.summary, s.skill, st.status
                FROM candidates c
                LEFT JOIN candidate_skills s ON s.candidate_id = c.id
                LEFT JOIN candidate_status st ON st.candidate_id = c.id
                ORDER BY c.created_at DESC, c.id
                "#,
            )
            .fetch_all(&state.db)
            .await?
        }
    };

    let candidates = merge_joined_rows(rows);
    Ok(Json(ListResponse {
        count: candidates.len(),
        candidates,
    }))
}

#[derive(Debug, Deserialize)]
pub struct DetailParams {
    pub user_id: Option<Uuid>,
}

/// GET /api/v1/candidates/:id — merged record plus achievements and the
/// shortlist flag (scoped to `user_id` when given).
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DetailParams>,
) -> Result<Json<CandidateDetail>, AppError> {
    let rows: Vec<JoinedRow> = sqlx::query_as(JOINED_BY_ID)
        .bind(id)
        .fetch_all(&state.db)
        .await?;

    let candidate = merge_joined_rows(rows)
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let achievements: Vec<String> = sqlx::query_scalar(
        "SELECT achievement FROM candidate_achievements WHERE candidate_id = $1 ORDER BY id",
    )
    .bind(id)
    .fetch_all(&state.db)
    .await?;

    let shortlisted: bool = match params.user_id {
        Some(user_id) => {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM shortlists WHERE candidate_id = $1 AND user_id = $2)",
            )
            .bind(id)
            .bind(user_id)
            .fetch_one(&state.db)
            .await?
        }
        None => {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shortlists WHERE candidate_id = $1)")
                .bind(id)
                .fetch_one(&state.db)
                .await?
        }
    };

    Ok(Json(CandidateDetail {
        candidate,
        achievements,
        shortlisted,
    }))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub id: Uuid,
    pub status: CandidateStatus,
}

/// PATCH /api/v1/candidates/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>, AppError> {
    let status = CandidateStatus::try_parse(&req.status)
        .ok_or_else(|| AppError::Validation(format!("Unknown status '{}'", req.status)))?;

    ensure_candidate_exists(&state, id).await?;

    sqlx::query(
        r#"
        INSERT INTO candidate_status (candidate_id, status)
        VALUES ($1, $2)
        ON CONFLICT (candidate_id) DO UPDATE SET status = EXCLUDED.status
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .execute(&state.db)
    .await?;

    info!("Candidate {id} status set to {}", status.as_str());
    Ok(Json(StatusUpdateResponse { id, status }))
}

#[derive(Debug, Deserialize)]
pub struct ShortlistRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ShortlistResponse {
    pub candidate_id: Uuid,
    pub user_id: Uuid,
    pub shortlisted: bool,
}

/// POST /api/v1/candidates/:id/shortlist — toggles the (candidate, user)
/// shortlist entry.
pub async fn handle_toggle_shortlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ShortlistRequest>,
) -> Result<Json<ShortlistResponse>, AppError> {
    ensure_candidate_exists(&state, id).await?;

    let removed = sqlx::query("DELETE FROM shortlists WHERE candidate_id = $1 AND user_id = $2")
        .bind(id)
        .bind(req.user_id)
        .execute(&state.db)
        .await?
        .rows_affected();

    let shortlisted = if removed == 0 {
        sqlx::query("INSERT INTO shortlists (candidate_id, user_id) VALUES ($1, $2)")
            .bind(id)
            .bind(req.user_id)
            .execute(&state.db)
            .await?;
        true
    } else {
        false
    };

    Ok(Json(ShortlistResponse {
        candidate_id: id,
        user_id: req.user_id,
        shortlisted,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub id: Uuid,
    pub summary: String,
}

/// POST /api/v1/candidates/:id/summary — generates a fit summary from the
/// stored resume text and persists it.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let raw_text: Option<String> = sqlx::query_scalar("SELECT raw_text FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let raw_text = raw_text.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
        AppError::UnprocessableEntity("Candidate has no stored resume text".to_string())
    })?;

    let job_description = req
        .job_description
        .as_deref()
        .unwrap_or("a role matching the candidate's background");
    let prompt = build_summary_prompt(&raw_text, job_description);
    let summary = state
        .llm
        .chat(SUMMARY_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    sqlx::query("UPDATE candidates SET summary = $2 WHERE id = $1")
        .bind(id)
        .bind(&summary)
        .execute(&state.db)
        .await?;

    Ok(Json(SummaryResponse { id, summary }))
}

async fn ensure_candidate_exists(state: &AppState, id: Uuid) -> Result<(), AppError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM candidates WHERE id = $1)")
        .bind(id)
        .fetch_one(&state.db)
        .await?;
    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("Candidate {id} not found")))
    }
}
