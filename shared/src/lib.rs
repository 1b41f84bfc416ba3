//! Shared types and models for the Print Shop Management Platform
//!
//! This crate contains the job cost / margin rules and the models they work
//! on. It does no I/O, so the backend, the portal (via WASM) and the tests
//! all run the exact same arithmetic.

pub mod calculator;
pub mod models;
pub mod types;
pub mod validation;

pub use calculator::*;
pub use models::*;
pub use types::*;
pub use validation::*;
