//! Business logic services for the Print Shop Management backend

pub mod job_metrics;
pub mod reporting;

pub use job_metrics::JobMetricsService;
pub use reporting::ReportingService;
