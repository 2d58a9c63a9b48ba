//! Computed results, expected outcomes, and output records.

use serde::{Deserialize, Serialize};

use crate::fixed::{Q16, Triple};
use crate::phase::PhaseState;

/// The result of one True Delivery evaluation.
///
/// Recomputed fresh for every vector and never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Sum of the warp vectors of every evaluated plugin.
    pub warp_total: Triple,
    /// Sum of the errors of every evaluated plugin.
    pub error_total: Q16,
    /// The initial phase state with `warp_total` added to every face.
    pub phase_state_warped: PhaseState,
    /// All adjacent face pairs lie within epsilon on every axis.
    pub symmetry_ok: bool,
    /// Every plugin reported OK and the error total is within epsilon.
    pub error_ok: bool,
    /// `symmetry_ok && error_ok`.
    pub true_delivery: bool,
}

/// The published expected outcome for a vector (`<id>_expected.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Vector this outcome belongs to.
    pub vector_id: String,
    /// Expected warp total.
    pub warp_total: Triple,
    /// Expected error total.
    pub error_total: Q16,
    /// Expected warped phase state.
    pub phase_state_warped: PhaseState,
    /// Expected symmetry flag.
    pub symmetry_ok: bool,
    /// Expected error flag.
    pub error_ok: bool,
    /// Expected verdict.
    pub true_delivery: bool,
    /// Expected Tetra-Seal, 64 hex characters.
    pub tetra_seal: String,
}

/// Output record for the canonical pipeline (`<id>_result.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Vector identifier.
    pub vector_id: String,
    /// Computed warp total.
    pub warp_total: Triple,
    /// Computed error total.
    pub error_total: Q16,
    /// Tetra-Seal, 64 lowercase hex characters.
    pub seal_out: String,
    /// Final verdict.
    pub true_delivery: bool,
}

/// Output record for the cycle-accurate engine (`<id>_cycle_result.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleResultRecord {
    /// Vector identifier.
    pub vector_id: String,
    /// X component of the accumulated warp, as raw 32-bit signal bits.
    pub warp_sum_x: u32,
    /// Accumulated error, as raw 32-bit signal bits.
    pub error_sum: u32,
    /// Cycle seal, 64 lowercase hex characters.
    pub seal_out: String,
    /// Final verdict.
    pub true_delivery: bool,
    /// Cycle counter when the engine reached DONE.
    pub cycles: u32,
}
