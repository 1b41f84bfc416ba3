//! Invoice models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// An invoice attached to a job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: Uuid,
    pub job_id: Uuid,
    pub subtotal: Decimal,
    pub tax_rate: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub total: Option<Decimal>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

/// A billed line on an invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub product: Product,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Billed area in m² for area-priced goods
    pub area: Option<Decimal>,
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
}
