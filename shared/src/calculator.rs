//! Job cost and margin calculation
//!
//! Revenue comes from the invoice subtotal. Material cost comes from the
//! invoice items when an invoice exists, otherwise from the job product
//! lines with an estimated area. Ink cost always comes from the job product
//! lines. All arithmetic is checked; nothing here panics on bad input.

use rust_decimal::Decimal;

use crate::models::{InvoiceItem, JobProduct, JobSnapshot, MetricsBreakdown, ProductClass};
use crate::types::CostRates;
use crate::validation::{validate_job_snapshot, CalculationError};

type CalcResult<T> = Result<T, CalculationError>;

fn mul(a: Decimal, b: Decimal, what: &'static str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or(CalculationError::Overflow(what))
}

fn sum<I>(values: I, what: &'static str) -> CalcResult<Decimal>
where
    I: IntoIterator<Item = CalcResult<Decimal>>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value?).ok_or(CalculationError::Overflow(what))
    })
}

/// Invoice subtotal, or zero without an invoice
pub fn revenue(snapshot: &JobSnapshot) -> Decimal {
    snapshot
        .invoice
        .as_ref()
        .map(|invoice| invoice.subtotal)
        .unwrap_or(Decimal::ZERO)
}

/// Material cost of one invoice line
pub fn invoice_item_material_cost(item: &InvoiceItem) -> CalcResult<Decimal> {
    let quantity = Decimal::from(item.quantity);
    let product = &item.product;

    match (item.area, product.cost_per_sq_meter) {
        (Some(area), Some(rate)) if product.product_class.is_area_priced() => {
            mul(mul(rate, area, "material cost")?, quantity, "material cost")
        }
        _ => mul(product.base_price, quantity, "material cost"),
    }
}

/// Estimated area of a job product line from the product's default size
pub fn estimated_area(line: &JobProduct, rates: &CostRates) -> CalcResult<Decimal> {
    let length = line.product.default_length.unwrap_or(rates.default_dimension_m);
    let width = line.product.default_width.unwrap_or(rates.default_dimension_m);
    mul(length, width, "estimated area")
}

/// Material cost of one job product line, used when the job has no invoice
pub fn line_material_cost(line: &JobProduct, rates: &CostRates) -> CalcResult<Decimal> {
    let quantity = Decimal::from(line.quantity);
    let product = &line.product;

    match product.cost_per_sq_meter {
        Some(rate) if product.product_class.is_area_priced() => {
            let area = estimated_area(line, rates)?;
            mul(mul(rate, area, "material cost")?, quantity, "material cost")
        }
        _ => mul(product.base_price, quantity, "material cost"),
    }
}

/// Total material cost of a job
pub fn material_cost(snapshot: &JobSnapshot, rates: &CostRates) -> CalcResult<Decimal> {
    match &snapshot.invoice {
        Some(invoice) => sum(
            invoice.items.iter().map(invoice_item_material_cost),
            "material cost",
        ),
        None => sum(
            snapshot
                .job_products
                .iter()
                .map(|line| line_material_cost(line, rates)),
            "material cost",
        ),
    }
}

/// Ink cost of one job product line
pub fn line_ink_cost(line: &JobProduct, rates: &CostRates) -> CalcResult<Decimal> {
    let completed = Decimal::from(line.completed_quantity);

    match line.product.product_class {
        ProductClass::Packaging => {
            let per_unit = line
                .ink_cost_per_unit
                .unwrap_or(rates.packaging_ink_cost_per_unit);
            mul(per_unit, completed, "ink cost")
        }
        ProductClass::Leaflets => mul(rates.leaflet_ink_cost_per_unit, completed, "ink cost"),
        ProductClass::WideFormat | ProductClass::Other => {
            let usage_ml = line.ink_usage_in_ml.unwrap_or(Decimal::ZERO);
            mul(usage_ml, rates.ink_cost_per_ml, "ink cost")
        }
    }
}

/// Total ink cost over all job product lines
pub fn ink_cost(lines: &[JobProduct], rates: &CostRates) -> CalcResult<Decimal> {
    sum(lines.iter().map(|line| line_ink_cost(line, rates)), "ink cost")
}

/// Gross profit as a percentage of revenue, zero when there is no revenue
pub fn profit_margin(gross_profit: Decimal, revenue: Decimal) -> CalcResult<Decimal> {
    if revenue.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = gross_profit
        .checked_div(revenue)
        .ok_or(CalculationError::Overflow("profit margin"))?;
    mul(ratio, Decimal::ONE_HUNDRED, "profit margin")
}

/// Compute every metric of a job from its current records
pub fn calculate_job_metrics(
    snapshot: &JobSnapshot,
    rates: &CostRates,
) -> CalcResult<MetricsBreakdown> {
    validate_job_snapshot(snapshot)?;

    let revenue = revenue(snapshot);
    let material_cost = material_cost(snapshot, rates)?;
    let ink_cost = ink_cost(&snapshot.job_products, rates)?;

    let total_cost = material_cost
        .checked_add(ink_cost)
        .ok_or(CalculationError::Overflow("total cost"))?;
    let gross_profit = revenue
        .checked_sub(total_cost)
        .ok_or(CalculationError::Overflow("gross profit"))?;
    let profit_margin = profit_margin(gross_profit, revenue)?;

    let total_quantity: i64 = snapshot
        .job_products
        .iter()
        .map(|line| i64::from(line.quantity))
        .sum();
    let total_time: i64 = snapshot
        .job_products
        .iter()
        .map(|line| i64::from(line.time_taken.unwrap_or(0)))
        .sum();

    Ok(MetricsBreakdown {
        revenue,
        material_cost,
        ink_cost,
        gross_profit,
        profit_margin,
        total_quantity,
        total_time,
    })
}
