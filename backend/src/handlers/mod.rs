//! HTTP handlers for the Print Shop Management backend

pub mod health;
pub mod job_metrics;
pub mod reporting;

pub use health::health_check;
pub use job_metrics::{get_job_metrics, recalculate_job_metrics};
pub use reporting::{get_metrics_summary, list_job_metrics};
