//! Packopt prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    breakdown::Breakdown,
    calculation::Calculation,
    slip::{PackingSlip, SlipError},
    interrupt::{Interrupt, NeverInterrupt},
    sizes::PackSizes,
    solver::{Allocation, SolverError, compute, compute_with},
    table::{PackTable, Reachability},
};
