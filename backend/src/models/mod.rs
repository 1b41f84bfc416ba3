//! Domain models for the Print Shop Management backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
