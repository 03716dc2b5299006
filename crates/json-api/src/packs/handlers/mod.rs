//! Pack Size Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;

/// Pack Sizes Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PackSizesResponse {
    /// Active pack sizes, ascending
    pub sizes: Vec<u32>,
}

impl From<Vec<u32>> for PackSizesResponse {
    fn from(sizes: Vec<u32>) -> Self {
        Self { sizes }
    }
}
