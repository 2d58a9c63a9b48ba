//! Delivery decider.

use serde::{Deserialize, Serialize};

/// The three exposed verdict flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    /// Result of the symmetry check.
    pub symmetry_ok: bool,
    /// Plugin status and error bound combined.
    pub error_ok: bool,
    /// `symmetry_ok && error_ok`.
    pub true_delivery: bool,
}

/// Combine checker outputs.
///
/// Both `symmetry_ok` and `error_ok` are always computed and reported,
/// whatever `true_delivery` turns out to be.
pub const fn decide(symmetry_ok: bool, plugin_status_ok: bool, error_within_bound: bool) -> Verdict {
    let error_ok = plugin_status_ok & error_within_bound;
    Verdict {
        symmetry_ok,
        error_ok,
        true_delivery: symmetry_ok & error_ok,
    }
}
