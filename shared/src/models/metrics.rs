//! Job profitability metrics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Figures computed for a job, before they are stamped and stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsBreakdown {
    pub revenue: Decimal,
    pub material_cost: Decimal,
    pub ink_cost: Decimal,
    pub gross_profit: Decimal,
    /// Percentage, 0 when revenue is 0
    pub profit_margin: Decimal,
    pub total_quantity: i64,
    /// Minutes
    pub total_time: i64,
}

/// Persisted, denormalized metrics row, one per job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobMetrics {
    pub job_id: Uuid,
    pub revenue: Decimal,
    pub material_cost: Decimal,
    pub ink_cost: Decimal,
    pub gross_profit: Decimal,
    pub profit_margin: Decimal,
    pub total_quantity: i64,
    pub total_time: i64,
    pub last_updated: DateTime<Utc>,
}

impl JobMetrics {
    pub fn new(job_id: Uuid, breakdown: MetricsBreakdown, last_updated: DateTime<Utc>) -> Self {
        Self {
            job_id,
            revenue: breakdown.revenue,
            material_cost: breakdown.material_cost,
            ink_cost: breakdown.ink_cost,
            gross_profit: breakdown.gross_profit,
            profit_margin: breakdown.profit_margin,
            total_quantity: breakdown.total_quantity,
            total_time: breakdown.total_time,
            last_updated,
        }
    }

    /// The computed figures without the timestamp
    pub fn breakdown(&self) -> MetricsBreakdown {
        MetricsBreakdown {
            revenue: self.revenue,
            material_cost: self.material_cost,
            ink_cost: self.ink_cost,
            gross_profit: self.gross_profit,
            profit_margin: self.profit_margin,
            total_quantity: self.total_quantity,
            total_time: self.total_time,
        }
    }
}
