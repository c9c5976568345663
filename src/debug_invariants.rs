//! Opt-in structural checks for constructed meshes.
//!
//! Checks run under `debug_assertions` or when either the `strict-invariants`
//! or `check-invariants` feature is enabled; otherwise they compile away.

use crate::mesh_error::MeshError;

/// Trait for validating structural invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Panic on the first violated invariant when checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "structure");
    }
}

/// Run a fallible check and panic with context on error when invariant
/// checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            log::error!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
