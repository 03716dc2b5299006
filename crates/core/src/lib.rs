//! Packopt
//!
//! Packopt is a pack-distribution optimiser: given a requested quantity and a set of allowed
//! pack sizes it finds the combination of whole packs that ships the fewest surplus items,
//! and among those the one that uses the fewest packs.
//!
//! ```
//! use packopt::compute;
//!
//! let allocation = compute(12_001, &[250, 500, 1_000, 2_000, 5_000])?;
//!
//! assert_eq!(allocation.total_items(), 12_250);
//! assert_eq!(allocation.total_packs(), 4);
//! # Ok::<(), packopt::SolverError>(())
//! ```

pub mod breakdown;
pub mod calculation;
pub mod interrupt;
pub mod prelude;
pub mod sizes;
pub mod slip;
pub mod solver;
pub mod table;

pub use solver::{Allocation, SolverError, compute, compute_with};
