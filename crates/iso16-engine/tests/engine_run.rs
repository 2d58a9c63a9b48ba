//! Integration tests for the cycle-accurate engine.
//!
//! The engine must agree with the pure pipeline on every flag and total,
//! and its cycle and snapshot counts must follow the documented timing.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::arithmetic_side_effects
)]

use iso16_core::evaluate;
use iso16_engine::{
    CycleEngine, EngineState, NullSink, RecordingSink, Signal, SignalValue, TracingSink, VcdSink,
    run_vector,
};
use iso16_seal::{cycle_seal, tetra_seal};
use iso16_types::{ConformanceVector, Domain, PhaseState, Plugin, PluginSet, PluginStatus, Q16, Triple};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Fixtures
// =============================================================================

fn random_vector(rng: &mut StdRng, index: usize) -> ConformanceVector {
    let base = Triple::from_raw(rng.random_range(-8..8), rng.random_range(-8..8), 0);
    let mut phase = PhaseState::uniform(base);
    if rng.random_bool(0.3) {
        let face = rng.random_range(0..16);
        phase.get_mut(face).unwrap().z = Q16(rng.random_range(-3..=3));
    }

    let count = rng.random_range(0..6);
    let plugins = (0..count).map(|i| Plugin {
        id: format!("p{i}"),
        domain: Domain::Jitter,
        warp_vector: Triple::from_raw(rng.random_range(-100..100), rng.random_range(-100..100), 0),
        error: Q16(rng.random_range(0..=1)),
        status: if rng.random_bool(0.15) {
            PluginStatus::Fail
        } else {
            PluginStatus::Ok
        },
        version: "1".to_owned(),
    });

    ConformanceVector::new(
        format!("VR{index:03}"),
        phase,
        PluginSet::from_plugins(plugins).unwrap(),
    )
}

// =============================================================================
// Agreement with the pure pipeline
// =============================================================================

#[test]
fn engine_agrees_with_pipeline() {
    let mut rng = StdRng::seed_from_u64(16);
    let mut denied = 0_u32;

    for index in 0..200 {
        let v = random_vector(&mut rng, index);
        let expected = evaluate(&v);

        let mut engine = CycleEngine::new(&v);
        let record = engine.run(&mut NullSink).unwrap();
        let last = engine.snapshot();

        assert_eq!(record.warp_sum_x, expected.warp_total.x.to_bits(), "{}", v.vector_id);
        assert_eq!(record.error_sum, expected.error_total.to_bits(), "{}", v.vector_id);
        assert_eq!(last.symmetry_ok, expected.symmetry_ok, "{}", v.vector_id);
        assert_eq!(last.error_ok, expected.error_ok, "{}", v.vector_id);
        assert_eq!(record.true_delivery, expected.true_delivery, "{}", v.vector_id);
        if !record.true_delivery {
            denied = denied.saturating_add(1);
        }
    }

    // The generator must exercise both verdicts.
    assert!(denied > 0 && denied < 200);
}

#[test]
fn cycle_seal_differs_from_tetra_seal() {
    let v = ConformanceVector::new("V0000", PhaseState::default(), PluginSet::new());
    let record = run_vector(&v, &mut NullSink).unwrap();
    let tetra = tetra_seal(&v, &evaluate(&v)).unwrap();
    assert_eq!(record.seal_out, cycle_seal(0, 0, 6).to_hex());
    assert_ne!(record.seal_out, tetra.to_hex());
}

// =============================================================================
// Timing
// =============================================================================

#[test]
fn cycles_and_snapshots_scale_with_plugins() {
    for n in 0..5_u32 {
        let plugins = (0..n).map(|i| Plugin {
            id: format!("p{i}"),
            domain: Domain::Custom,
            warp_vector: Triple::ZERO,
            error: Q16::ZERO,
            status: PluginStatus::Ok,
            version: "1".to_owned(),
        });
        let v = ConformanceVector::new("VT", PhaseState::default(), PluginSet::from_plugins(plugins).unwrap());
        let mut sink = RecordingSink::new();
        let record = run_vector(&v, &mut sink).unwrap();

        assert_eq!(record.cycles, n + 6);
        assert_eq!(sink.snapshots.len(), (n + 7) as usize);
        assert_eq!(sink.events.len(), sink.snapshots.len() * 10);
    }
}

#[test]
fn snapshots_precede_each_transition() {
    let v = ConformanceVector::new("VS", PhaseState::default(), PluginSet::new());
    let mut sink = RecordingSink::new();
    run_vector(&v, &mut sink).unwrap();

    let states: Vec<EngineState> = sink.snapshots.iter().map(|s| s.state).collect();
    assert_eq!(
        states,
        [
            EngineState::Collect,
            EngineState::Plugin,
            EngineState::Accumulate,
            EngineState::Check,
            EngineState::Seal,
            EngineState::Seal,
            EngineState::Done,
        ]
    );
    let cycles: Vec<u32> = sink.snapshots.iter().map(|s| s.cycle).collect();
    assert_eq!(cycles, [0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn signal_order_within_a_snapshot() {
    let v = ConformanceVector::new("VO", PhaseState::default(), PluginSet::new());
    let mut sink = RecordingSink::new();
    run_vector(&v, &mut sink).unwrap();

    let first: Vec<Signal> = sink.events.iter().take(10).map(|e| e.signal).collect();
    assert_eq!(first, Signal::ALL);
    let states = sink.values_of(Signal::State);
    assert_eq!(states.first(), Some(&SignalValue::Scalar(1)));
    assert_eq!(states.last(), Some(&SignalValue::Scalar(6)));
}

// =============================================================================
// Sinks
// =============================================================================

#[test]
fn tracing_sink_run_matches_null_sink_run() {
    let mut rng = StdRng::seed_from_u64(7);
    let v = random_vector(&mut rng, 0);
    assert_eq!(
        run_vector(&v, &mut TracingSink).unwrap(),
        run_vector(&v, &mut NullSink).unwrap()
    );
}

#[test]
fn vcd_trace_has_one_change_per_signal_per_snapshot() {
    let v = ConformanceVector::new("VV", PhaseState::default(), PluginSet::new());
    let mut sink = VcdSink::new("2026-01-01 00:00:00");
    run_vector(&v, &mut sink).unwrap();
    assert_eq!(sink.changes(), 70);

    let text = sink.finish();
    assert!(text.contains("b0110 s"));
    assert!(text.contains(&format!("b{} z", "0".repeat(256))));
}
