//! Interrupts
//!
//! The table builder polls an [`Interrupt`] once per item total it fills in, which lets a
//! caller running the solver on a worker thread abandon an expensive call (for example after a
//! timeout) without waiting for the table to complete.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Cooperative cancellation checkpoint.
pub trait Interrupt {
    /// Returns `true` once the computation should stop.
    fn is_interrupted(&self) -> bool;
}

/// An interrupt that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    #[inline]
    fn is_interrupted(&self) -> bool {
        false
    }
}

impl Interrupt for AtomicBool {
    #[inline]
    fn is_interrupted(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Interrupt + ?Sized> Interrupt for Arc<T> {
    #[inline]
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

impl<T: Interrupt + ?Sized> Interrupt for &T {
    #[inline]
    fn is_interrupted(&self) -> bool {
        (**self).is_interrupted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_interrupt_is_never_interrupted() {
        assert!(!NeverInterrupt.is_interrupted());
    }

    #[test]
    fn atomic_flag_reflects_its_value() {
        let flag = Arc::new(AtomicBool::new(false));

        assert!(!flag.is_interrupted());

        flag.store(true, Ordering::Relaxed);

        assert!(flag.is_interrupted());
        assert!((&*flag).is_interrupted());
    }
}
