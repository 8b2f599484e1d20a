use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateView, JoinedRow};
use crate::search::dedup::merge_joined_rows;
use crate::search::query::{interpret_query, QueryTerms};
use crate::search::semantic::rank_by_similarity;
use crate::state::AppState;

const JOINED_SELECT: &str = r#"
SELECT c.id, c.name, c.current_title, c.location, c.work_auth, c.years_exp,
       c.resume_url, c.summary, s.skill, st.status
FROM candidates c
LEFT JOIN candidate_skills s ON s.candidate_id = c.id
LEFT JOIN candidate_status st ON st.candidate_id = c.id
"#;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub interpretation: QueryTerms,
    pub count: usize,
    pub candidates: Vec<CandidateView>,
}

/// GET /api/v1/search?query=... — interprets the phrase into structured
/// filters and returns one merged record per matching candidate.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let raw = params.query.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(
            "Query parameter 'query' must not be empty".to_string(),
        ));
    }

    let terms = interpret_query(raw);
    debug!("Interpreted '{raw}' as {terms:?}");

    // Structured filters when the interpreter found any; otherwise rank by
    // embedding similarity, with a raw substring filter as the last resort.
    let candidates = if terms.is_empty() {
        match fetch_by_similarity(&state, raw).await {
            Ok(views) if !views.is_empty() => views,
            Ok(_) => merge_joined_rows(fetch_by_raw_text(&state, raw).await?),
            Err(e) => {
                warn!("Similarity search failed, falling back to text search: {e}");
                merge_joined_rows(fetch_by_raw_text(&state, raw).await?)
            }
        }
    } else {
        merge_joined_rows(fetch_by_terms(&state, &terms).await?)
    };

    Ok(Json(SearchResponse {
        query: raw.to_string(),
        interpretation: terms,
        count: candidates.len(),
        candidates,
    }))
}

async fn fetch_by_terms(state: &AppState, terms: &QueryTerms) -> Result<Vec<JoinedRow>, AppError> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(JOINED_SELECT);
    qb.push("WHERE TRUE");

    if !terms.roles.is_empty() {
        qb.push(" AND (FALSE");
        for role in &terms.roles {
            qb.push(" OR c.current_title ILIKE ")
                .push_bind(format!("%{role}%"));
        }
        qb.push(")");
    }

    if !terms.locations.is_empty() {
        qb.push(" AND (FALSE");
        for location in &terms.locations {
            qb.push(" OR c.location ILIKE ")
                .push_bind(format!("%{location}%"));
        }
        qb.push(")");
    }

    // Every mentioned skill must be present on the candidate.
    for skill in &terms.skills {
        qb.push(
            " AND EXISTS (SELECT 1 FROM candidate_skills cs \
             WHERE cs.candidate_id = c.id AND cs.skill ILIKE ",
        )
        .push_bind(format!("%{skill}%"));
        qb.push(")");
    }

    if !terms.statuses.is_empty() {
        let statuses: Vec<String> = terms
            .statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        qb.push(" AND COALESCE(st.status, 'new') = ANY(")
            .push_bind(statuses);
        qb.push(")");
    }

    if terms.min_years_exp > 0 {
        qb.push(" AND c.years_exp >= ")
            .push_bind(i32::try_from(terms.min_years_exp).unwrap_or(i32::MAX));
    }

    qb.push(" ORDER BY c.created_at DESC, c.id");

    let rows = qb.build_query_as::<JoinedRow>().fetch_all(&state.db).await?;
    Ok(rows)
}

/// Embeds the query and ranks candidates by cosine similarity against the
/// vectors stored at ingest time. Returns merged views in similarity order.
async fn fetch_by_similarity(state: &AppState, raw: &str) -> Result<Vec<CandidateView>, AppError> {
    let query_embedding = state.embedder.embed(raw).await?;

    let stored: Vec<(Uuid, Vec<f32>)> =
        sqlx::query_as("SELECT id, embedding FROM candidates WHERE embedding IS NOT NULL")
            .fetch_all(&state.db)
            .await?;

    let ranked = rank_by_similarity(&query_embedding, &stored);
    if ranked.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!("{JOINED_SELECT} WHERE c.id = ANY($1)");
    let rows: Vec<JoinedRow> = sqlx::query_as(&sql)
        .bind(&ranked)
        .fetch_all(&state.db)
        .await?;

    // The store returns rows in its own order; restore similarity order.
    let position: HashMap<Uuid, usize> =
        ranked.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    let mut views = merge_joined_rows(rows);
    views.sort_by_key(|v| position.get(&v.id).copied().unwrap_or(usize::MAX));
    Ok(views)
}

/// Last-resort fallback when similarity search finds nothing or fails:
/// plain substring match over name, title and the stored resume text.
async fn fetch_by_raw_text(state: &AppState, raw: &str) -> Result<Vec<JoinedRow>, AppError> {
    let pattern = format!("%{raw}%");
    let sql = format!(
        "{JOINED_SELECT} WHERE c.name ILIKE $1 OR c.current_title ILIKE $1 \
         OR c.raw_text ILIKE $1 ORDER BY c.created_at DESC, c.id"
    );
    let rows = sqlx::query_as::<_, JoinedRow>(&sql)
        .bind(pattern)
        .fetch_all(&state.db)
        .await?;
    Ok(rows)
}
