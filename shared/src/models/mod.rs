//! Domain models for the Print Shop Management Platform

mod invoice;
mod job;
mod metrics;
mod product;

pub use invoice::*;
pub use job::*;
pub use metrics::*;
pub use product::*;
