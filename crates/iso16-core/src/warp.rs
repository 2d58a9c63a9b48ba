//! Phase warp applier.

use iso16_types::{PhaseState, Triple};

use crate::fixed;

/// Add `warp_total` to every face of `phase_state`, preserving face order.
pub fn apply_warp(phase_state: &PhaseState, warp_total: Triple) -> PhaseState {
    phase_state.map(|face| fixed::add_triple(face, warp_total))
}
