//! The True Delivery pipeline.
//!
//! Runs the stages in their fixed order and assembles a [`DeliveryResult`]:
//!
//! 1. Evaluate plugins into warp and error totals.
//! 2. Apply the warp total to the initial phase state.
//! 3. Check symmetry of the warped state.
//! 4. Check the error bound.
//! 5. Decide.

use iso16_types::{ConformanceVector, DeliveryResult};
use tracing::debug;

use crate::check::{check_error, check_symmetry};
use crate::decide::decide;
use crate::plugin::evaluate_plugins;
use crate::warp::apply_warp;

/// Evaluate one conformance vector.
pub fn evaluate(vector: &ConformanceVector) -> DeliveryResult {
    let totals = evaluate_plugins(&vector.plugins);
    let phase_state_warped = apply_warp(&vector.initial_phase_state, totals.warp_total);
    let symmetry_ok = check_symmetry(&phase_state_warped);
    let error_within_bound = check_error(totals.error_total);
    let verdict = decide(symmetry_ok, totals.plugin_status_ok, error_within_bound);

    debug!(
        vector_id = vector.vector_id.as_str(),
        plugins_evaluated = totals.evaluated,
        warp_x = %totals.warp_total.x,
        warp_y = %totals.warp_total.y,
        warp_z = %totals.warp_total.z,
        error_total = %totals.error_total,
        plugin_status_ok = totals.plugin_status_ok,
        symmetry_ok = verdict.symmetry_ok,
        error_ok = verdict.error_ok,
        true_delivery = verdict.true_delivery,
        "vector evaluated"
    );

    DeliveryResult {
        warp_total: totals.warp_total,
        error_total: totals.error_total,
        phase_state_warped,
        symmetry_ok: verdict.symmetry_ok,
        error_ok: verdict.error_ok,
        true_delivery: verdict.true_delivery,
    }
}
