//! Calculation Handlers

pub(crate) mod create;
mod pack_counts;

pub(crate) use pack_counts::PackCounts;
