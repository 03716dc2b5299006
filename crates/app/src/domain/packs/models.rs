//! Pack Set Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored version of the pack size configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSet {
    /// Monotonically increasing version; later writes win.
    pub version: i64,

    /// Pack sizes, ascending and distinct.
    pub sizes: Vec<u32>,

    /// When this version was written.
    pub created_at: Timestamp,
}

/// The active sizes together with the version they were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionedSizes {
    /// Version the sizes belong to; `0` when nothing has been stored.
    pub version: i64,

    /// Pack sizes, ascending and distinct.
    pub sizes: Vec<u32>,
}

impl From<PackSet> for VersionedSizes {
    fn from(set: PackSet) -> Self {
        Self {
            version: set.version,
            sizes: set.sizes,
        }
    }
}

/// Drop zero sizes, sort ascending and collapse duplicates.
pub fn normalize(mut sizes: Vec<u32>) -> Vec<u32> {
    sizes.retain(|&size| size > 0);
    sizes.sort_unstable();
    sizes.dedup();

    sizes
}
