//! In-memory metrics store for tests and local experiments

use std::collections::HashMap;

use async_trait::async_trait;
use shared::{JobMetrics, JobSnapshot};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MetricsFilter, MetricsSort, MetricsStore};
use crate::error::{AppError, AppResult};

#[derive(Default)]
struct Tables {
    /// Insertion order doubles as job creation order
    job_order: Vec<Uuid>,
    jobs: HashMap<Uuid, JobSnapshot>,
    metrics: HashMap<Uuid, JobMetrics>,
}

/// Store holding jobs and metrics in process memory
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a job and its records
    pub async fn put_job(&self, snapshot: JobSnapshot) {
        let mut tables = self.tables.write().await;
        if !tables.jobs.contains_key(&snapshot.job_id) {
            tables.job_order.push(snapshot.job_id);
        }
        tables.jobs.insert(snapshot.job_id, snapshot);
    }

    /// Store a metrics row directly, bypassing the calculator
    pub async fn put_metrics(&self, metrics: JobMetrics) {
        self.tables
            .write()
            .await
            .metrics
            .insert(metrics.job_id, metrics);
    }

    pub async fn metrics_count(&self) -> usize {
        self.tables.read().await.metrics.len()
    }
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn load_job(&self, job_id: Uuid) -> AppResult<Option<JobSnapshot>> {
        Ok(self.tables.read().await.jobs.get(&job_id).cloned())
    }

    async fn eligible_job_ids(&self) -> AppResult<Vec<Uuid>> {
        let tables = self.tables.read().await;
        Ok(tables
            .job_order
            .iter()
            .filter(|id| {
                tables
                    .jobs
                    .get(*id)
                    .map_or(false, JobSnapshot::is_eligible_for_bulk)
            })
            .copied()
            .collect())
    }

    async fn upsert_metrics(&self, metrics: &JobMetrics) -> AppResult<JobMetrics> {
        let mut tables = self.tables.write().await;
        if !tables.jobs.contains_key(&metrics.job_id) {
            return Err(AppError::NotFound("Job".to_string()));
        }
        tables.metrics.insert(metrics.job_id, metrics.clone());
        Ok(metrics.clone())
    }

    async fn insert_metrics(&self, metrics: &JobMetrics) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.metrics.contains_key(&metrics.job_id) {
            return Err(AppError::DuplicateEntry("job_id".to_string()));
        }
        tables.metrics.insert(metrics.job_id, metrics.clone());
        Ok(())
    }

    async fn clear_metrics(&self) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let removed = tables.metrics.len() as u64;
        tables.metrics.clear();
        Ok(removed)
    }

    async fn get_metrics(&self, job_id: Uuid) -> AppResult<Option<JobMetrics>> {
        Ok(self.tables.read().await.metrics.get(&job_id).cloned())
    }

    async fn list_metrics(&self, filter: &MetricsFilter) -> AppResult<Vec<JobMetrics>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<JobMetrics> = tables
            .metrics
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let order = match filter.sort {
                MetricsSort::LastUpdated => b.last_updated.cmp(&a.last_updated),
                MetricsSort::ProfitMargin => b.profit_margin.cmp(&a.profit_margin),
                MetricsSort::GrossProfit => b.gross_profit.cmp(&a.gross_profit),
                MetricsSort::Revenue => b.revenue.cmp(&a.revenue),
            };
            order.then_with(|| a.job_id.cmp(&b.job_id))
        });
        rows.truncate(filter.limit.max(0) as usize);

        Ok(rows)
    }

    async fn all_metrics(&self) -> AppResult<Vec<JobMetrics>> {
        Ok(self.tables.read().await.metrics.values().cloned().collect())
    }
}
