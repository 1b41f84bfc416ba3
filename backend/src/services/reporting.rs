//! Reporting service for the profitability dashboards
//! Reads the stored job metrics; never recalculates them

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{profit_margin, CalculationError, JobMetrics};

use crate::error::{AppError, AppResult};
use crate::store::{MetricsFilter, MetricsStore};

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: Arc<dyn MetricsStore>,
}

/// Dashboard totals across every stored job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub job_count: usize,
    pub total_revenue: Decimal,
    pub total_material_cost: Decimal,
    pub total_ink_cost: Decimal,
    pub total_gross_profit: Decimal,
    /// Total gross profit over total revenue, as a percentage
    pub overall_margin: Decimal,
    pub loss_making_jobs: usize,
}

fn add(total: Decimal, value: Decimal) -> Result<Decimal, CalculationError> {
    total
        .checked_add(value)
        .ok_or(CalculationError::Overflow("summary"))
}

impl MetricsSummary {
    pub fn from_rows(rows: &[JobMetrics]) -> AppResult<Self> {
        let mut summary = MetricsSummary {
            job_count: rows.len(),
            total_revenue: Decimal::ZERO,
            total_material_cost: Decimal::ZERO,
            total_ink_cost: Decimal::ZERO,
            total_gross_profit: Decimal::ZERO,
            overall_margin: Decimal::ZERO,
            loss_making_jobs: 0,
        };

        for row in rows {
            summary.total_revenue = add(summary.total_revenue, row.revenue)?;
            summary.total_material_cost = add(summary.total_material_cost, row.material_cost)?;
            summary.total_ink_cost = add(summary.total_ink_cost, row.ink_cost)?;
            summary.total_gross_profit = add(summary.total_gross_profit, row.gross_profit)?;
            if row.gross_profit < Decimal::ZERO {
                summary.loss_making_jobs += 1;
            }
        }

        summary.overall_margin = profit_margin(summary.total_gross_profit, summary.total_revenue)?;

        Ok(summary)
    }
}

impl ReportingService {
    pub fn new(store: Arc<dyn MetricsStore>) -> Self {
        Self { store }
    }

    /// Stored metrics matching the filter
    pub async fn list_metrics(&self, filter: &MetricsFilter) -> AppResult<Vec<JobMetrics>> {
        if let (Some(min), Some(max)) = (filter.min_margin, filter.max_margin) {
            if min > max {
                return Err(AppError::Validation {
                    field: "min_margin".to_string(),
                    message: "min_margin must not exceed max_margin".to_string(),
                });
            }
        }

        self.store.list_metrics(filter).await
    }

    /// Dashboard totals
    pub async fn summary(&self) -> AppResult<MetricsSummary> {
        let rows = self.store.all_metrics().await?;
        MetricsSummary::from_rows(&rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn row(revenue: &str, material: &str, ink: &str) -> JobMetrics {
        let revenue = Decimal::from_str(revenue).unwrap();
        let material_cost = Decimal::from_str(material).unwrap();
        let ink_cost = Decimal::from_str(ink).unwrap();
        let gross_profit = revenue - material_cost - ink_cost;
        JobMetrics {
            job_id: Uuid::new_v4(),
            revenue,
            material_cost,
            ink_cost,
            gross_profit,
            profit_margin: profit_margin(gross_profit, revenue).unwrap(),
            total_quantity: 1,
            total_time: 0,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_summary_totals() {
        let rows = vec![row("200", "20", "2"), row("100", "120", "0"), row("0", "5", "0")];
        let summary = MetricsSummary::from_rows(&rows).unwrap();

        assert_eq!(summary.job_count, 3);
        assert_eq!(summary.total_revenue, Decimal::from(300));
        assert_eq!(summary.total_material_cost, Decimal::from(145));
        assert_eq!(summary.total_ink_cost, Decimal::from(2));
        assert_eq!(summary.total_gross_profit, Decimal::from(153));
        assert_eq!(summary.overall_margin, Decimal::from(51));
        assert_eq!(summary.loss_making_jobs, 2);
    }

    #[test]
    fn test_summary_overflow_is_an_error() {
        let half = Decimal::MAX / Decimal::TWO + Decimal::ONE;
        let big = JobMetrics {
            revenue: half,
            gross_profit: half,
            profit_margin: Decimal::ONE_HUNDRED,
            ..row("0", "0", "0")
        };

        let err = MetricsSummary::from_rows(&[big.clone(), big]).unwrap_err();

        assert!(matches!(
            err,
            AppError::Calculation(CalculationError::Overflow("summary"))
        ));
    }

    #[test]
    fn test_empty_summary() {
        let summary = MetricsSummary::from_rows(&[]).unwrap();
        assert_eq!(summary.job_count, 0);
        assert_eq!(summary.overall_margin, Decimal::ZERO);
    }

    #[test]
    fn test_csv_export_has_header() {
        let csv = ReportingService::export_to_csv(&[row("200", "20", "2")]).unwrap();
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("job_id,revenue,material_cost,ink_cost,gross_profit"));
        assert_eq!(csv.lines().count(), 2);
    }
}
