//! Reporting handlers for the profitability dashboards

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::reporting::{MetricsSummary, ReportingService};
use crate::store::{MetricsFilter, MetricsSort};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct MetricsQuery {
    pub updated_since: Option<DateTime<Utc>>,
    pub min_margin: Option<Decimal>,
    pub max_margin: Option<Decimal>,
    pub sort: Option<MetricsSort>,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<i64>,
    pub format: Option<String>, // "json" or "csv"
}

impl MetricsQuery {
    pub fn to_filter(&self) -> AppResult<MetricsFilter> {
        self.validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        Ok(MetricsFilter {
            updated_since: self.updated_since,
            min_margin: self.min_margin,
            max_margin: self.max_margin,
            sort: self.sort.unwrap_or_default(),
            limit: self.limit.unwrap_or(MetricsFilter::default().limit),
        })
    }
}

/// List stored job metrics
pub async fn list_job_metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let filter = query.to_filter()?;

    let data = service.list_metrics(&filter).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = ReportingService::export_to_csv(&data)?;
        Ok((
            [(header::CONTENT_TYPE, "text/csv"), (header::CONTENT_DISPOSITION, "attachment; filename=\"job_metrics.csv\"")],
            csv,
        ).into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Get dashboard totals
pub async fn get_metrics_summary(
    State(state): State<AppState>,
) -> AppResult<Json<MetricsSummary>> {
    let service = ReportingService::new(state.store.clone());
    let summary = service.summary().await?;
    Ok(Json(summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<i64>) -> MetricsQuery {
        MetricsQuery {
            updated_since: None,
            min_margin: None,
            max_margin: None,
            sort: None,
            limit,
            format: None,
        }
    }

    #[test]
    fn test_default_filter() {
        let filter = query(None).to_filter().unwrap();
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.sort, MetricsSort::LastUpdated);
    }

    #[test]
    fn test_limit_out_of_range() {
        assert!(query(Some(0)).to_filter().is_err());
        assert!(query(Some(501)).to_filter().is_err());
        assert_eq!(query(Some(500)).to_filter().unwrap().limit, 500);
    }
}
