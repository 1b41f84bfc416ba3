//! Route definitions for the Print Shop Management backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Invoice mutation webhook, same contract as the manual trigger
        .route("/webhooks/invoice", post(handlers::recalculate_job_metrics))
        // Job metrics
        .nest("/job-metrics", job_metrics_routes())
}

/// Job metrics routes
fn job_metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_job_metrics))
        .route("/recalculate", post(handlers::recalculate_job_metrics))
        .route("/summary", get(handlers::get_metrics_summary))
        .route("/:job_id", get(handlers::get_job_metrics))
}
