//! PostgreSQL implementation of the metrics store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{Invoice, InvoiceItem, JobMetrics, JobProduct, JobSnapshot, Product, ProductClass};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{MetricsFilter, MetricsStore};
use crate::error::AppResult;

const METRICS_COLUMNS: &str = "job_id, revenue, material_cost, ink_cost, gross_profit, \
                               profit_margin, total_quantity, total_time, last_updated";

/// Metrics store backed by the shared connection pool
#[derive(Clone)]
pub struct PgMetricsStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: Uuid,
    job_id: Uuid,
    subtotal: Decimal,
    tax_rate: Option<Decimal>,
    tax_amount: Option<Decimal>,
    total: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct InvoiceItemRow {
    id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    area: Option<Decimal>,
    length: Option<Decimal>,
    width: Option<Decimal>,
    product_id: Uuid,
    product_name: String,
    product_class: String,
    base_price: Decimal,
    cost_per_sq_meter: Option<Decimal>,
    default_length: Option<Decimal>,
    default_width: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct JobProductRow {
    id: Uuid,
    quantity: i32,
    completed_quantity: i32,
    ink_cost_per_unit: Option<Decimal>,
    ink_usage_in_ml: Option<Decimal>,
    time_taken: Option<i32>,
    product_id: Uuid,
    product_name: String,
    product_class: String,
    base_price: Decimal,
    cost_per_sq_meter: Option<Decimal>,
    default_length: Option<Decimal>,
    default_width: Option<Decimal>,
}

#[derive(Debug, FromRow)]
struct JobMetricsRow {
    job_id: Uuid,
    revenue: Decimal,
    material_cost: Decimal,
    ink_cost: Decimal,
    gross_profit: Decimal,
    profit_margin: Decimal,
    total_quantity: i64,
    total_time: i64,
    last_updated: DateTime<Utc>,
}

impl From<JobMetricsRow> for JobMetrics {
    fn from(row: JobMetricsRow) -> Self {
        JobMetrics {
            job_id: row.job_id,
            revenue: row.revenue,
            material_cost: row.material_cost,
            ink_cost: row.ink_cost,
            gross_profit: row.gross_profit,
            profit_margin: row.profit_margin,
            total_quantity: row.total_quantity,
            total_time: row.total_time,
            last_updated: row.last_updated,
        }
    }
}

impl From<InvoiceItemRow> for InvoiceItem {
    fn from(row: InvoiceItemRow) -> Self {
        InvoiceItem {
            id: row.id,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                product_class: ProductClass::from(row.product_class),
                base_price: row.base_price,
                cost_per_sq_meter: row.cost_per_sq_meter,
                default_length: row.default_length,
                default_width: row.default_width,
            },
            quantity: row.quantity,
            unit_price: row.unit_price,
            area: row.area,
            length: row.length,
            width: row.width,
        }
    }
}

impl From<JobProductRow> for JobProduct {
    fn from(row: JobProductRow) -> Self {
        JobProduct {
            id: row.id,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                product_class: ProductClass::from(row.product_class),
                base_price: row.base_price,
                cost_per_sq_meter: row.cost_per_sq_meter,
                default_length: row.default_length,
                default_width: row.default_width,
            },
            quantity: row.quantity,
            completed_quantity: row.completed_quantity,
            ink_cost_per_unit: row.ink_cost_per_unit,
            ink_usage_in_ml: row.ink_usage_in_ml,
            time_taken: row.time_taken,
        }
    }
}

impl PgMetricsStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn load_invoice(&self, job_id: Uuid) -> AppResult<Option<Invoice>> {
        let Some(row) = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, job_id, subtotal, tax_rate, tax_amount, total
            FROM invoices
            WHERE job_id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.db)
        .await?
        else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, InvoiceItemRow>(
            r#"
            SELECT ii.id, ii.quantity, ii.unit_price, ii.area, ii.length, ii.width,
                   p.id AS product_id, p.name AS product_name, p.product_class,
                   p.base_price, p.cost_per_sq_meter, p.default_length, p.default_width
            FROM invoice_items ii
            JOIN products p ON p.id = ii.product_id
            WHERE ii.invoice_id = $1
            ORDER BY ii.id
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(Invoice {
            id: row.id,
            job_id: row.job_id,
            subtotal: row.subtotal,
            tax_rate: row.tax_rate,
            tax_amount: row.tax_amount,
            total: row.total,
            items: items.into_iter().map(InvoiceItem::from).collect(),
        }))
    }

    async fn load_job_products(&self, job_id: Uuid) -> AppResult<Vec<JobProduct>> {
        let rows = sqlx::query_as::<_, JobProductRow>(
            r#"
            SELECT jp.id, jp.quantity, jp.completed_quantity, jp.ink_cost_per_unit,
                   jp.ink_usage_in_ml, jp.time_taken,
                   p.id AS product_id, p.name AS product_name, p.product_class,
                   p.base_price, p.cost_per_sq_meter, p.default_length, p.default_width
            FROM job_products jp
            JOIN products p ON p.id = jp.product_id
            WHERE jp.job_id = $1
            ORDER BY jp.id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(JobProduct::from).collect())
    }
}

#[async_trait]
impl MetricsStore for PgMetricsStore {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn load_job(&self, job_id: Uuid) -> AppResult<Option<JobSnapshot>> {
        let job_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = $1)")
                .bind(job_id)
                .fetch_one(&self.db)
                .await?;

        if !job_exists {
            return Ok(None);
        }

        let invoice = self.load_invoice(job_id).await?;
        let job_products = self.load_job_products(job_id).await?;

        Ok(Some(JobSnapshot {
            job_id,
            invoice,
            job_products,
        }))
    }

    async fn eligible_job_ids(&self) -> AppResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT j.id
            FROM jobs j
            WHERE EXISTS(SELECT 1 FROM invoices i WHERE i.job_id = j.id)
              AND EXISTS(SELECT 1 FROM job_products jp WHERE jp.job_id = j.id)
            ORDER BY j.created_at
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(ids)
    }

    async fn upsert_metrics(&self, metrics: &JobMetrics) -> AppResult<JobMetrics> {
        let query = format!(
            r#"
            INSERT INTO job_metrics ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (job_id) DO UPDATE SET
                revenue = EXCLUDED.revenue,
                material_cost = EXCLUDED.material_cost,
                ink_cost = EXCLUDED.ink_cost,
                gross_profit = EXCLUDED.gross_profit,
                profit_margin = EXCLUDED.profit_margin,
                total_quantity = EXCLUDED.total_quantity,
                total_time = EXCLUDED.total_time,
                last_updated = EXCLUDED.last_updated
            RETURNING {columns}
            "#,
            columns = METRICS_COLUMNS
        );

        let row = sqlx::query_as::<_, JobMetricsRow>(&query)
            .bind(metrics.job_id)
            .bind(metrics.revenue)
            .bind(metrics.material_cost)
            .bind(metrics.ink_cost)
            .bind(metrics.gross_profit)
            .bind(metrics.profit_margin)
            .bind(metrics.total_quantity)
            .bind(metrics.total_time)
            .bind(metrics.last_updated)
            .fetch_one(&self.db)
            .await?;

        Ok(row.into())
    }

    async fn insert_metrics(&self, metrics: &JobMetrics) -> AppResult<()> {
        let query = format!(
            "INSERT INTO job_metrics ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            METRICS_COLUMNS
        );

        sqlx::query(&query)
            .bind(metrics.job_id)
            .bind(metrics.revenue)
            .bind(metrics.material_cost)
            .bind(metrics.ink_cost)
            .bind(metrics.gross_profit)
            .bind(metrics.profit_margin)
            .bind(metrics.total_quantity)
            .bind(metrics.total_time)
            .bind(metrics.last_updated)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn clear_metrics(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM job_metrics")
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get_metrics(&self, job_id: Uuid) -> AppResult<Option<JobMetrics>> {
        let query = format!("SELECT {} FROM job_metrics WHERE job_id = $1", METRICS_COLUMNS);

        let row = sqlx::query_as::<_, JobMetricsRow>(&query)
            .bind(job_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(row.map(JobMetrics::from))
    }

    async fn list_metrics(&self, filter: &MetricsFilter) -> AppResult<Vec<JobMetrics>> {
        let query = format!(
            r#"
            SELECT {}
            FROM job_metrics
            WHERE ($1::timestamptz IS NULL OR last_updated >= $1)
              AND ($2::numeric IS NULL OR profit_margin >= $2)
              AND ($3::numeric IS NULL OR profit_margin <= $3)
            ORDER BY {} DESC, job_id
            LIMIT $4
            "#,
            METRICS_COLUMNS,
            filter.sort.column()
        );

        let rows = sqlx::query_as::<_, JobMetricsRow>(&query)
            .bind(filter.updated_since)
            .bind(filter.min_margin)
            .bind(filter.max_margin)
            .bind(filter.limit)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(JobMetrics::from).collect())
    }

    async fn all_metrics(&self) -> AppResult<Vec<JobMetrics>> {
        let query = format!("SELECT {} FROM job_metrics", METRICS_COLUMNS);

        let rows = sqlx::query_as::<_, JobMetricsRow>(&query)
            .fetch_all(&self.db)
            .await?;

        Ok(rows.into_iter().map(JobMetrics::from).collect())
    }
}
