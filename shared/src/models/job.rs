//! Job and job product models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Invoice, Product};

/// A production line on a job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobProduct {
    pub id: Uuid,
    pub product: Product,
    /// Ordered quantity
    pub quantity: i32,
    pub completed_quantity: i32,
    pub ink_cost_per_unit: Option<Decimal>,
    pub ink_usage_in_ml: Option<Decimal>,
    /// Recorded production time in minutes
    pub time_taken: Option<i32>,
}

/// Everything the calculator needs to know about one job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobSnapshot {
    pub job_id: Uuid,
    pub invoice: Option<Invoice>,
    #[serde(default)]
    pub job_products: Vec<JobProduct>,
}

impl JobSnapshot {
    /// A job takes part in bulk recalculation only when it has an invoice
    /// and at least one job product line
    pub fn is_eligible_for_bulk(&self) -> bool {
        self.invoice.is_some() && !self.job_products.is_empty()
    }
}
