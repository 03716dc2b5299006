//! Calculations

pub mod errors;
pub mod models;
pub mod service;

pub use errors::CalculationsServiceError;
pub use service::*;
