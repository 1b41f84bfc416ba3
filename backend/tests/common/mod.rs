//! Fixture builders shared by the backend integration tests

#![allow(dead_code)]

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::{Invoice, InvoiceItem, JobProduct, JobSnapshot, Product, ProductClass};
use uuid::Uuid;

// Helper to create Decimal from string
pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn product(class: ProductClass, base_price: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: format!("{} sample", class),
        product_class: class,
        base_price: dec(base_price),
        cost_per_sq_meter: None,
        default_length: None,
        default_width: None,
    }
}

pub fn wide_format(cost_per_sq_meter: &str) -> Product {
    Product {
        cost_per_sq_meter: Some(dec(cost_per_sq_meter)),
        ..product(ProductClass::WideFormat, "35")
    }
}

pub fn job_product(product: Product, quantity: i32, completed: i32) -> JobProduct {
    JobProduct {
        id: Uuid::new_v4(),
        product,
        quantity,
        completed_quantity: completed,
        ink_cost_per_unit: None,
        ink_usage_in_ml: None,
        time_taken: None,
    }
}

pub fn invoice_item(product: Product, quantity: i32, area: Option<&str>) -> InvoiceItem {
    InvoiceItem {
        id: Uuid::new_v4(),
        product,
        quantity,
        unit_price: Decimal::ZERO,
        area: area.map(dec),
        length: None,
        width: None,
    }
}

pub fn invoice(job_id: Uuid, subtotal: &str, items: Vec<InvoiceItem>) -> Invoice {
    Invoice {
        id: Uuid::new_v4(),
        job_id,
        subtotal: dec(subtotal),
        tax_rate: Some(dec("0.2")),
        tax_amount: None,
        total: None,
        items,
    }
}

/// Job from the worked example: invoice subtotal 200, one wide format item
/// (2 m² at 10/m²) and one packaging line with 50 units completed
pub fn example_job() -> JobSnapshot {
    let job_id = Uuid::new_v4();
    JobSnapshot {
        job_id,
        invoice: Some(invoice(
            job_id,
            "200",
            vec![invoice_item(wide_format("10"), 1, Some("2"))],
        )),
        job_products: vec![job_product(product(ProductClass::Packaging, "0.3"), 50, 50)],
    }
}

/// Job with an invoice and one leaflet line
pub fn invoiced_leaflet_job(subtotal: &str, completed: i32) -> JobSnapshot {
    let job_id = Uuid::new_v4();
    JobSnapshot {
        job_id,
        invoice: Some(invoice(
            job_id,
            subtotal,
            vec![invoice_item(product(ProductClass::Leaflets, "0.02"), completed, None)],
        )),
        job_products: vec![job_product(
            product(ProductClass::Leaflets, "0.02"),
            completed,
            completed,
        )],
    }
}

pub fn empty_job() -> JobSnapshot {
    JobSnapshot {
        job_id: Uuid::new_v4(),
        invoice: None,
        job_products: vec![],
    }
}
