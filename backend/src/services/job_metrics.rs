//! Job metrics service: recalculates and stores job profitability figures

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use shared::{calculate_job_metrics, CostRates, JobMetrics, JobSnapshot};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::MetricsStore;

/// Job metrics service
#[derive(Clone)]
pub struct JobMetricsService {
    store: Arc<dyn MetricsStore>,
    rates: CostRates,
}

/// Result of a recalculation request
#[derive(Debug, Clone, Serialize)]
pub struct RecalculationOutcome {
    pub message: String,
    /// Stored row, only for single-job recalculation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<JobMetrics>,
    pub jobs_processed: usize,
}

impl JobMetricsService {
    pub fn new(store: Arc<dyn MetricsStore>, rates: CostRates) -> Self {
        Self { store, rates }
    }

    /// Recalculate one job when `job_id` is given, every eligible job otherwise
    pub async fn recalculate(&self, job_id: Option<Uuid>) -> AppResult<RecalculationOutcome> {
        match job_id {
            Some(job_id) => {
                let metrics = self.recalculate_job(job_id).await?;
                Ok(RecalculationOutcome {
                    message: format!("Metrics recalculated for job {}", job_id),
                    metrics: Some(metrics),
                    jobs_processed: 1,
                })
            }
            None => {
                let processed = self.recalculate_all().await?;
                let message = if processed == 0 {
                    "No jobs with an invoice and job products found; 0 jobs processed".to_string()
                } else {
                    format!("Metrics recalculated for {} jobs", processed)
                };
                Ok(RecalculationOutcome {
                    message,
                    metrics: None,
                    jobs_processed: processed,
                })
            }
        }
    }

    /// Recalculate and upsert the metrics of a single job
    pub async fn recalculate_job(&self, job_id: Uuid) -> AppResult<JobMetrics> {
        let snapshot = self
            .store
            .load_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job".to_string()))?;

        let metrics = self.compute(&snapshot)?;
        let stored = self.store.upsert_metrics(&metrics).await?;

        tracing::info!(
            %job_id,
            revenue = %stored.revenue,
            gross_profit = %stored.gross_profit,
            profit_margin = %stored.profit_margin,
            "Job metrics recalculated"
        );

        Ok(stored)
    }

    /// Clear every metrics row, then rebuild one row per eligible job.
    ///
    /// The per-job computations run concurrently and the first failure fails
    /// the whole batch. Rows written before the failure stay in place.
    pub async fn recalculate_all(&self) -> AppResult<usize> {
        let cleared = self.store.clear_metrics().await?;
        let job_ids = self.store.eligible_job_ids().await?;

        tracing::info!(
            cleared,
            eligible = job_ids.len(),
            "Starting bulk job metrics recalculation"
        );

        try_join_all(job_ids.iter().map(|&job_id| self.rebuild_job(job_id))).await?;

        tracing::info!(processed = job_ids.len(), "Bulk job metrics recalculation finished");

        Ok(job_ids.len())
    }

    /// Stored metrics of a job
    pub async fn get_metrics(&self, job_id: Uuid) -> AppResult<JobMetrics> {
        self.store
            .get_metrics(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job metrics".to_string()))
    }

    async fn rebuild_job(&self, job_id: Uuid) -> AppResult<()> {
        let snapshot = self
            .store
            .load_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job".to_string()))?;

        let metrics = self.compute(&snapshot)?;
        self.store.insert_metrics(&metrics).await
    }

    fn compute(&self, snapshot: &JobSnapshot) -> AppResult<JobMetrics> {
        let breakdown = calculate_job_metrics(snapshot, &self.rates).map_err(|e| {
            tracing::warn!(job_id = %snapshot.job_id, "Job metrics calculation failed: {}", e);
            e
        })?;

        tracing::debug!(job_id = %snapshot.job_id, ?breakdown, "Computed job metrics");

        Ok(JobMetrics::new(snapshot.job_id, breakdown, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use rust_decimal::Decimal;
    use shared::{Invoice, JobProduct, Product, ProductClass};

    fn packaging_line(completed: i32) -> JobProduct {
        JobProduct {
            id: Uuid::new_v4(),
            product: Product {
                id: Uuid::new_v4(),
                name: "Folding carton".to_string(),
                product_class: ProductClass::Packaging,
                base_price: Decimal::ONE,
                cost_per_sq_meter: None,
                default_length: None,
                default_width: None,
            },
            quantity: completed,
            completed_quantity: completed,
            ink_cost_per_unit: None,
            ink_usage_in_ml: None,
            time_taken: Some(15),
        }
    }

    #[tokio::test]
    async fn test_recalculate_dispatches_on_job_id() {
        let store = Arc::new(InMemoryStore::new());
        let job_id = Uuid::new_v4();
        store
            .put_job(JobSnapshot {
                job_id,
                invoice: Some(Invoice {
                    id: Uuid::new_v4(),
                    job_id,
                    subtotal: Decimal::from(10),
                    tax_rate: None,
                    tax_amount: None,
                    total: None,
                    items: vec![],
                }),
                job_products: vec![packaging_line(25)],
            })
            .await;

        let service = JobMetricsService::new(store.clone(), CostRates::default());

        let single = service.recalculate(Some(job_id)).await.unwrap();
        assert_eq!(single.jobs_processed, 1);
        assert_eq!(single.metrics.unwrap().ink_cost, Decimal::ONE);

        let bulk = service.recalculate(None).await.unwrap();
        assert_eq!(bulk.jobs_processed, 1);
        assert!(bulk.metrics.is_none());
        assert_eq!(bulk.message, "Metrics recalculated for 1 jobs");
    }

    #[tokio::test]
    async fn test_get_metrics_not_found() {
        let service = JobMetricsService::new(Arc::new(InMemoryStore::new()), CostRates::default());
        let err = service.get_metrics(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
