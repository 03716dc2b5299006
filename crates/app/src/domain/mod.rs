//! Packopt Domain Concerns

pub mod cache;
pub mod calculations;
pub mod packs;
