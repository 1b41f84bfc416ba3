//! WebAssembly module for the Print Shop Management portal
//!
//! Lets the portal preview job profitability before an invoice is saved.
//! Uses the same calculator as the backend, with the default cost rates.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Shared types, re-exported for Rust consumers of this crate
pub use shared::models::*;
pub use shared::types::*;

fn preview(snapshot_json: &str) -> Result<String, String> {
    let snapshot: JobSnapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| format!("Invalid job JSON: {}", e))?;

    let breakdown = shared::calculate_job_metrics(&snapshot, &CostRates::default())
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&breakdown).map_err(|e| format!("Serialization error: {}", e))
}

fn to_decimal(name: &str, value: f64) -> Result<Decimal, String> {
    Decimal::try_from(value).map_err(|_| format!("{} is not a representable amount: {}", name, value))
}

fn margin(revenue: f64, total_cost: f64) -> Result<f64, String> {
    let revenue = to_decimal("revenue", revenue)?;
    let gross_profit = revenue
        .checked_sub(to_decimal("total_cost", total_cost)?)
        .ok_or_else(|| "arithmetic overflow while computing gross profit".to_string())?;

    let margin = shared::profit_margin(gross_profit, revenue).map_err(|e| e.to_string())?;
    margin
        .to_f64()
        .ok_or_else(|| format!("margin {} does not fit in a number", margin))
}

/// Compute the metrics breakdown of a job given as JSON
#[wasm_bindgen]
pub fn preview_job_metrics(snapshot_json: &str) -> Result<String, JsValue> {
    preview(snapshot_json).map_err(|e| JsValue::from_str(&e))
}

/// Profit margin percentage; zero when there is no revenue.
/// Throws on amounts that are not finite or too large.
#[wasm_bindgen]
pub fn calculate_profit_margin(revenue: f64, total_cost: f64) -> Result<f64, JsValue> {
    margin(revenue, total_cost).map_err(|e| JsValue::from_str(&e))
}

/// Area in m² of a wide format piece; missing sides default to 1 m
#[wasm_bindgen]
pub fn estimate_area(length: Option<f64>, width: Option<f64>) -> f64 {
    let fallback = CostRates::default().default_dimension_m.to_f64().unwrap_or(1.0);
    length.unwrap_or(fallback) * width.unwrap_or(fallback)
}
