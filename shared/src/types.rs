//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rates used by the ink and material cost rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CostRates {
    /// Ink cost per completed packaging unit when the line has none recorded
    pub packaging_ink_cost_per_unit: Decimal,
    /// Flat ink cost per completed leaflet
    pub leaflet_ink_cost_per_unit: Decimal,
    /// Ink price per ml for every other class
    pub ink_cost_per_ml: Decimal,
    /// Fallback for a missing default length or width, in meters
    pub default_dimension_m: Decimal,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            packaging_ink_cost_per_unit: Decimal::new(4, 2),
            leaflet_ink_cost_per_unit: Decimal::new(4, 3),
            ink_cost_per_ml: Decimal::new(16, 2),
            default_dimension_m: Decimal::ONE,
        }
    }
}
