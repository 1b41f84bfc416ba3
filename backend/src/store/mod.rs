//! Persistence seam for job metrics
//!
//! Services depend on [`MetricsStore`] rather than on a pool so the same
//! recalculation code runs against PostgreSQL in production and against
//! [`InMemoryStore`] in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{JobMetrics, JobSnapshot};
use uuid::Uuid;

use crate::error::AppResult;

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgMetricsStore;

/// Sort order for metrics listings, always descending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSort {
    #[default]
    LastUpdated,
    ProfitMargin,
    GrossProfit,
    Revenue,
}

impl MetricsSort {
    pub fn column(&self) -> &'static str {
        match self {
            MetricsSort::LastUpdated => "last_updated",
            MetricsSort::ProfitMargin => "profit_margin",
            MetricsSort::GrossProfit => "gross_profit",
            MetricsSort::Revenue => "revenue",
        }
    }
}

/// Filter for listing stored metrics
#[derive(Debug, Clone)]
pub struct MetricsFilter {
    pub updated_since: Option<DateTime<Utc>>,
    pub min_margin: Option<Decimal>,
    pub max_margin: Option<Decimal>,
    pub sort: MetricsSort,
    pub limit: i64,
}

impl Default for MetricsFilter {
    fn default() -> Self {
        Self {
            updated_since: None,
            min_margin: None,
            max_margin: None,
            sort: MetricsSort::default(),
            limit: 100,
        }
    }
}

impl MetricsFilter {
    /// Whether a row passes the filter's predicates
    pub fn matches(&self, metrics: &JobMetrics) -> bool {
        self.updated_since.map_or(true, |since| metrics.last_updated >= since)
            && self.min_margin.map_or(true, |min| metrics.profit_margin >= min)
            && self.max_margin.map_or(true, |max| metrics.profit_margin <= max)
    }
}

/// Reads the job graph and reads/writes the derived metrics rows
#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Check the backing store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Load a job with its invoice, invoice items and job products.
    /// `None` when the job does not exist.
    async fn load_job(&self, job_id: Uuid) -> AppResult<Option<JobSnapshot>>;

    /// Ids of every job that has an invoice and at least one job product
    async fn eligible_job_ids(&self) -> AppResult<Vec<Uuid>>;

    /// Create or overwrite the metrics row of a job
    async fn upsert_metrics(&self, metrics: &JobMetrics) -> AppResult<JobMetrics>;

    /// Insert a metrics row; fails if the job already has one
    async fn insert_metrics(&self, metrics: &JobMetrics) -> AppResult<()>;

    /// Delete every metrics row, returning how many were removed
    async fn clear_metrics(&self) -> AppResult<u64>;

    async fn get_metrics(&self, job_id: Uuid) -> AppResult<Option<JobMetrics>>;

    async fn list_metrics(&self, filter: &MetricsFilter) -> AppResult<Vec<JobMetrics>>;

    /// Every stored metrics row, unordered
    async fn all_metrics(&self) -> AppResult<Vec<JobMetrics>>;
}
