//! Property tests for the True Delivery pipeline.
//!
//! Each test drives the public API from a JSON vector or a built one, the
//! way a loader would hand vectors to the core.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::missing_panics_doc)]

use iso16_core::{PluginTotals, compare, evaluate, evaluate_plugins, fixed};
use iso16_types::{ConformanceVector, ExpectedOutcome, PhaseState, PluginSet, Q16, Triple};

// =============================================================================
// Helpers
// =============================================================================

fn faces(json_face: &str) -> String {
    format!("[{}]", vec![json_face; 16].join(","))
}

fn plugin_json(id: &str, warp: [i32; 3], error: i32, status: &str) -> String {
    format!(
        r#""{id}":{{"id":"{id}","domain":"Refraction","warp_vector":[{},{},{}],"error":{error},"status":"{status}","version":"1.0"}}"#,
        warp[0], warp[1], warp[2]
    )
}

fn vector_json(phase: &str, plugins: &[String]) -> ConformanceVector {
    let json = format!(
        r#"{{"vector_id":"VP","initial_phase_state":{phase},"plugins":{{{}}}}}"#,
        plugins.join(",")
    );
    serde_json::from_str(&json).unwrap()
}

// =============================================================================
// Arithmetic
// =============================================================================

#[test]
fn signed_wrap_and_abs_clamp() {
    assert_eq!(fixed::add(Q16(0x7FFF_FFFF), Q16(1)), Q16(-0x8000_0000));
    assert_eq!(fixed::abs(Q16(-0x8000_0000)), Q16(0x7FFF_FFFF));
}

// =============================================================================
// Plugins
// =============================================================================

#[test]
fn failing_second_of_three_plugins_short_circuits() {
    let v = vector_json(
        &faces("[0,0,0]"),
        &[
            plugin_json("first", [1, 2, 3], 1, "OK"),
            plugin_json("second", [10, 20, 30], 0, "FAIL"),
            plugin_json("third", [100, 200, 300], 5, "OK"),
        ],
    );
    let totals: PluginTotals = evaluate_plugins(&v.plugins);
    assert_eq!(totals.warp_total, Triple::from_raw(11, 22, 33));
    assert_eq!(totals.error_total, Q16(1));
    assert!(!totals.plugin_status_ok);
    assert_eq!(totals.evaluated, 2);

    let r = evaluate(&v);
    assert!(!r.error_ok);
    assert!(!r.true_delivery);
}

#[test]
fn unknown_status_counts_as_failure() {
    let v = vector_json(&faces("[0,0,0]"), &[plugin_json("p", [0, 0, 0], 0, "DEGRADED")]);
    assert!(!evaluate(&v).error_ok);
}

// =============================================================================
// Symmetry
// =============================================================================

#[test]
fn identical_faces_are_symmetric() {
    let v = vector_json(&faces("[65536,-3,7]"), &[]);
    assert!(evaluate(&v).symmetry_ok);
}

#[test]
fn perturbing_face_five_by_two_breaks_symmetry() {
    let mut phase = PhaseState::default();
    phase.get_mut(5).unwrap().x = Q16(2);
    let r = evaluate(&ConformanceVector::new("VP", phase, PluginSet::new()));
    assert!(!r.symmetry_ok);
    assert!(r.error_ok);
    assert!(!r.true_delivery);
}

#[test]
fn perturbing_face_five_by_epsilon_keeps_symmetry() {
    let mut phase = PhaseState::default();
    phase.get_mut(5).unwrap().x = Q16(1);
    let r = evaluate(&ConformanceVector::new("VP", phase, PluginSet::new()));
    assert!(r.symmetry_ok);
}

#[test]
fn last_and_first_face_are_not_compared() {
    // A staircase of +1 steps stays within epsilon pairwise even though
    // face 15 is 15 units away from face 0.
    let mut phase = PhaseState::default();
    for (i, raw) in (0..16).enumerate() {
        phase.get_mut(i).unwrap().y = Q16(raw);
    }
    let r = evaluate(&ConformanceVector::new("VP", phase, PluginSet::new()));
    assert!(r.symmetry_ok);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn zero_vector_delivers() {
    let r = evaluate(&vector_json(&faces("[0,0,0]"), &[]));
    assert_eq!(r.warp_total, Triple::ZERO);
    assert_eq!(r.error_total, Q16::ZERO);
    assert!(r.symmetry_ok);
    assert!(r.error_ok);
    assert!(r.true_delivery);
}

#[test]
fn error_of_two_denies_delivery() {
    let r = evaluate(&vector_json(&faces("[4,4,4]"), &[plugin_json("p", [0, 0, 0], 2, "OK")]));
    assert!(r.symmetry_ok);
    assert!(!r.error_ok);
    assert!(!r.true_delivery);
}

#[test]
fn evaluation_is_deterministic() {
    let v = vector_json(
        &faces("[1,2,3]"),
        &[plugin_json("a", [5, -5, 0], 1, "OK"), plugin_json("b", [-1, 0, 9], 0, "OK")],
    );
    assert_eq!(evaluate(&v), evaluate(&v));
}

#[test]
fn result_matches_its_own_expected_outcome() {
    let v = vector_json(&faces("[0,0,0]"), &[plugin_json("p", [3, 0, 0], 0, "OK")]);
    let r = evaluate(&v);
    let expected = ExpectedOutcome {
        vector_id: v.vector_id.clone(),
        warp_total: r.warp_total,
        error_total: r.error_total,
        phase_state_warped: r.phase_state_warped,
        symmetry_ok: r.symmetry_ok,
        error_ok: r.error_ok,
        true_delivery: r.true_delivery,
        tetra_seal: String::new(),
    };
    assert!(compare(&r, &expected).is_empty());
}
