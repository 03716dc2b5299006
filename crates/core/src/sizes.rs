//! Pack Sizes

use smallvec::SmallVec;

/// A normalised set of pack sizes.
///
/// Members are distinct, strictly positive and stored in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackSizes {
    sizes: SmallVec<[u64; 8]>,
}

impl PackSizes {
    /// Normalise caller-supplied sizes.
    ///
    /// Non-positive values are dropped, duplicates are collapsed and the remainder is sorted
    /// ascending. Any integer sequence is accepted; the result may be empty.
    pub fn sanitize(raw: &[i64]) -> Self {
        let mut sizes: SmallVec<[u64; 8]> = raw
            .iter()
            .filter_map(|&size| u64::try_from(size).ok())
            .filter(|&size| size > 0)
            .collect();

        sizes.sort_unstable();
        sizes.dedup();

        Self { sizes }
    }

    /// Returns `true` when no usable pack size remains.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Number of distinct pack sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Smallest pack size, if any.
    pub fn smallest(&self) -> Option<u64> {
        self.sizes.first().copied()
    }

    /// Largest pack size, if any.
    pub fn largest(&self) -> Option<u64> {
        self.sizes.last().copied()
    }

    /// Sizes in ascending order.
    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    /// Iterate sizes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.sizes.iter().copied()
    }
}

impl<'a> IntoIterator for &'a PackSizes {
    type Item = u64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sizes.iter().copied()
    }
}
