//! HTTP handlers for job metrics recalculation

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::JobMetrics;
use crate::AppState;

/// Body of a recalculation request; no job id means every eligible job
#[derive(Debug, Default, Deserialize)]
pub struct RecalculateRequest {
    #[serde(default, alias = "jobId")]
    pub job_id: Option<Uuid>,
}

impl RecalculateRequest {
    /// An empty body is accepted as a bulk request
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::ValidationError(format!("Invalid request body: {}", e)))
    }
}

#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<JobMetrics>,
    pub jobs_processed: usize,
}

/// Recalculate metrics for one job or for every eligible job
pub async fn recalculate_job_metrics(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<RecalculateResponse>> {
    let request = RecalculateRequest::from_body(&body)?;
    let outcome = state.job_metrics.recalculate(request.job_id).await?;

    Ok(Json(RecalculateResponse {
        success: true,
        message: outcome.message,
        metrics: outcome.metrics,
        jobs_processed: outcome.jobs_processed,
    }))
}

/// Get the stored metrics of a job
pub async fn get_job_metrics(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> AppResult<Json<JobMetrics>> {
    let metrics = state.job_metrics.get_metrics(job_id).await?;
    Ok(Json(metrics))
}
