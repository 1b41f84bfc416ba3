//! Input validation for the cost calculator
//!
//! The stored records are loosely constrained, so every figure that feeds a
//! cost is checked before any arithmetic runs.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{InvoiceItem, JobProduct, JobSnapshot, Product};

/// Errors raised while computing job metrics
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("{field} must not be negative (got {value})")]
    NegativeValue { field: String, value: Decimal },

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// Check a decimal figure is zero or positive
pub fn validate_non_negative(field: &str, value: Decimal) -> Result<(), CalculationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalculationError::NegativeValue {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn validate_optional(field: &str, value: Option<Decimal>) -> Result<(), CalculationError> {
    match value {
        Some(v) => validate_non_negative(field, v),
        None => Ok(()),
    }
}

fn validate_count(field: &str, value: i32) -> Result<(), CalculationError> {
    validate_non_negative(field, Decimal::from(value))
}

/// Validate the cost inputs of a product
pub fn validate_product(prefix: &str, product: &Product) -> Result<(), CalculationError> {
    validate_non_negative(&format!("{prefix}.base_price"), product.base_price)?;
    validate_optional(&format!("{prefix}.cost_per_sq_meter"), product.cost_per_sq_meter)?;
    validate_optional(&format!("{prefix}.default_length"), product.default_length)?;
    validate_optional(&format!("{prefix}.default_width"), product.default_width)?;
    Ok(())
}

/// Validate an invoice line
pub fn validate_invoice_item(prefix: &str, item: &InvoiceItem) -> Result<(), CalculationError> {
    validate_count(&format!("{prefix}.quantity"), item.quantity)?;
    validate_optional(&format!("{prefix}.area"), item.area)?;
    validate_product(&format!("{prefix}.product"), &item.product)
}

/// Validate a job product line
pub fn validate_job_product(prefix: &str, line: &JobProduct) -> Result<(), CalculationError> {
    validate_count(&format!("{prefix}.quantity"), line.quantity)?;
    validate_count(&format!("{prefix}.completed_quantity"), line.completed_quantity)?;
    validate_optional(&format!("{prefix}.ink_cost_per_unit"), line.ink_cost_per_unit)?;
    validate_optional(&format!("{prefix}.ink_usage_in_ml"), line.ink_usage_in_ml)?;
    if let Some(minutes) = line.time_taken {
        validate_count(&format!("{prefix}.time_taken"), minutes)?;
    }
    validate_product(&format!("{prefix}.product"), &line.product)
}

/// Validate every cost input of a job
pub fn validate_job_snapshot(snapshot: &JobSnapshot) -> Result<(), CalculationError> {
    if let Some(invoice) = &snapshot.invoice {
        for (i, item) in invoice.items.iter().enumerate() {
            validate_invoice_item(&format!("invoice.items[{i}]"), item)?;
        }
    }
    for (i, line) in snapshot.job_products.iter().enumerate() {
        validate_job_product(&format!("job_products[{i}]"), line)?;
    }
    Ok(())
}
