//! Print Shop Management Platform - Backend
//!
//! Recalculates job profitability metrics (revenue, material and ink cost,
//! gross profit, margin) and serves them to the reporting dashboards.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::JobMetricsService;
use store::MetricsStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetricsStore>,
    pub config: Arc<Config>,
    /// Recalculation service bound to the configured cost rates
    pub job_metrics: JobMetricsService,
}

impl AppState {
    pub fn new(store: Arc<dyn MetricsStore>, config: Config) -> Self {
        let job_metrics = JobMetricsService::new(store.clone(), config.pricing.clone());
        Self {
            store,
            config: Arc::new(config),
            job_metrics,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Print Shop Management API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
