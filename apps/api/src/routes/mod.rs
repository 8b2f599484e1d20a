pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::candidates::handlers as candidates;
use crate::email::handlers as email;
use crate::resume::handlers as resume;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search API
        .route("/api/v1/search", get(search::handle_search))
        // Candidate API
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate),
        )
        .route(
            "/api/v1/candidates/:id/status",
            patch(candidates::handle_update_status),
        )
        .route(
            "/api/v1/candidates/:id/shortlist",
            post(candidates::handle_toggle_shortlist),
        )
        .route(
            "/api/v1/candidates/:id/summary",
            post(candidates::handle_generate_summary),
        )
        .route(
            "/api/v1/candidates/:id/outreach",
            post(email::handle_send_outreach),
        )
        // Resume ingestion API
        .route("/api/v1/resumes", post(resume::handle_upload_resume))
        .with_state(state)
}
