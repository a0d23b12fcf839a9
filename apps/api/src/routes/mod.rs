pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze_text))
        .route(
            "/api/v1/resumes/analyze/pdf",
            post(handlers::handle_analyze_pdf),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
