//! Cache key layout.

/// Prefix of every cached pack list.
pub const PACK_LIST_PREFIX: &str = "packlist:v1:";

/// Prefix of every cached calculation.
pub const CALCULATION_PREFIX: &str = "calc:v1:";

/// Key for the pack list at `version`.
pub fn pack_list(version: i64) -> String {
    format!("{PACK_LIST_PREFIX}{version}")
}

/// Key for a calculation of `amount` against the pack list at `version`.
pub fn calculation(version: i64, amount: i64) -> String {
    format!("{CALCULATION_PREFIX}{version}:{amount}")
}
