//! Pack Sizes

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::PackSizesServiceError;
pub use service::*;
