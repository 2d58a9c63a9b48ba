//! The cycle-accurate True Delivery engine.
//!
//! [`CycleEngine`] is a signal-level twin of the pure pipeline in
//! `iso16-core`. It advances one state transition per cycle and exposes the
//! same registers a hardware implementation would:
//!
//! ```text
//! COLLECT -> PLUGIN (one plugin per cycle) -> ACCUMULATE -> CHECK
//!         -> SEAL (seal_start) -> SEAL (seal_ready) -> DONE
//! ```
//!
//! Every [`step`](CycleEngine::step) increments the cycle counter first and
//! then applies the transition. DONE is terminal: stepping it changes
//! nothing, the counter included.
//!
//! With `N` consumed plugins a run takes `N + 6` cycles. A FAIL plugin is
//! consumed and ends consumption, exactly as in the pure plugin fold, so the
//! engine's flags always agree with `iso16_core::evaluate` for the same
//! vector. The engine seal is the cycle seal, not the Tetra-Seal.

use iso16_core::{PluginTotals, Verdict, apply_warp, check_error, check_symmetry, decide};
use iso16_seal::{Seal256, cycle_seal};
use iso16_types::{ConformanceVector, CycleResultRecord, Plugin, Q16};
use tracing::{debug, trace};

use crate::signal::{Signal, SignalSink, SignalValue};
use crate::state::EngineState;

/// Errors raised while stepping the engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The 32-bit cycle counter would overflow.
    #[error("cycle counter overflow: cannot advance beyond u32::MAX")]
    CycleOverflow,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The complete observable signal set at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSnapshot {
    /// Current state.
    pub state: EngineState,
    /// Cycle counter.
    pub cycle: u32,
    /// X component of the running warp sum, as raw bits.
    pub warp_sum_x: u32,
    /// Published error sum, as raw bits.
    pub error_sum: u32,
    /// Symmetry flag.
    pub symmetry_ok: bool,
    /// Error flag.
    pub error_ok: bool,
    /// Verdict flag.
    pub true_delivery: bool,
    /// First seal cycle has run.
    pub seal_start: bool,
    /// `seal_out` holds the final seal.
    pub seal_ready: bool,
    /// Seal register. Zero until `seal_ready`.
    pub seal_out: Seal256,
}

impl EngineSnapshot {
    /// The snapshot as `(signal, value)` pairs in [`Signal::ALL`] order.
    pub fn signals(&self) -> [(Signal, SignalValue); 10] {
        [
            (Signal::State, SignalValue::Scalar(u32::from(self.state.code()))),
            (Signal::Cycle, SignalValue::Scalar(self.cycle)),
            (Signal::WarpSumX, SignalValue::Scalar(self.warp_sum_x)),
            (Signal::ErrorSum, SignalValue::Scalar(self.error_sum)),
            (Signal::SymmetryOk, SignalValue::flag(self.symmetry_ok)),
            (Signal::ErrorOk, SignalValue::flag(self.error_ok)),
            (Signal::TrueDelivery, SignalValue::flag(self.true_delivery)),
            (Signal::SealStart, SignalValue::flag(self.seal_start)),
            (Signal::SealReady, SignalValue::flag(self.seal_ready)),
            (Signal::SealOut, SignalValue::Seal(self.seal_out)),
        ]
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Flags before CHECK has run.
const CLEARED: Verdict = Verdict {
    symmetry_ok: false,
    error_ok: false,
    true_delivery: false,
};

/// Cycle-accurate engine over one borrowed vector.
#[derive(Debug, Clone)]
pub struct CycleEngine<'v> {
    vector: &'v ConformanceVector,
    /// Plugins in input order.
    plugins: Vec<&'v Plugin>,
    /// Index of the next plugin to consume.
    cursor: usize,
    totals: PluginTotals,
    state: EngineState,
    cycle: u32,
    error_sum: Q16,
    verdict: Verdict,
    seal_start: bool,
    seal_ready: bool,
    seal_out: Seal256,
}

impl<'v> CycleEngine<'v> {
    /// Create an engine in COLLECT at cycle 0 with every register cleared.
    pub fn new(vector: &'v ConformanceVector) -> Self {
        Self {
            vector,
            plugins: vector.plugins.in_input_order().collect(),
            cursor: 0,
            totals: PluginTotals::EMPTY,
            state: EngineState::Collect,
            cycle: 0,
            error_sum: Q16::ZERO,
            verdict: CLEARED,
            seal_start: false,
            seal_ready: false,
            seal_out: Seal256::ZERO,
        }
    }

    /// Current state.
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Cycle counter.
    pub const fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Whether the engine has reached DONE.
    pub const fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of plugins consumed so far.
    pub const fn plugins_consumed(&self) -> usize {
        self.totals.evaluated
    }

    /// The current signal values.
    pub const fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            cycle: self.cycle,
            warp_sum_x: self.totals.warp_total.x.to_bits(),
            error_sum: self.error_sum.to_bits(),
            symmetry_ok: self.verdict.symmetry_ok,
            error_ok: self.verdict.error_ok,
            true_delivery: self.verdict.true_delivery,
            seal_start: self.seal_start,
            seal_ready: self.seal_ready,
            seal_out: self.seal_out,
        }
    }

    /// Advance one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CycleOverflow`] if the counter is already at
    /// `u32::MAX`. The engine is left unchanged in that case.
    pub fn step(&mut self) -> Result<(), EngineError> {
        if self.state.is_terminal() {
            return Ok(());
        }

        self.cycle = self.cycle.checked_add(1).ok_or(EngineError::CycleOverflow)?;
        let from = self.state;

        self.state = match from {
            EngineState::Collect => EngineState::Plugin,
            EngineState::Plugin => self.consume_plugin(),
            EngineState::Accumulate => {
                self.error_sum = self.totals.error_total;
                EngineState::Check
            }
            EngineState::Check => {
                self.run_checks();
                EngineState::Seal
            }
            EngineState::Seal if !self.seal_start => {
                self.seal_start = true;
                EngineState::Seal
            }
            EngineState::Seal => {
                self.seal_out = cycle_seal(
                    self.totals.warp_total.x.to_bits(),
                    self.error_sum.to_bits(),
                    self.cycle,
                );
                self.seal_ready = true;
                EngineState::Done
            }
            EngineState::Done => EngineState::Done,
        };

        trace!(cycle = self.cycle, from = %from, to = %self.state, "engine step");
        Ok(())
    }

    /// Consume the next plugin, or leave PLUGIN once none remain.
    fn consume_plugin(&mut self) -> EngineState {
        let Some(plugin) = self.plugins.get(self.cursor).copied() else {
            return EngineState::Accumulate;
        };

        self.totals = self.totals.absorb(plugin);
        self.cursor = if plugin.status.is_ok() {
            self.cursor.saturating_add(1)
        } else {
            debug!(
                plugin_id = plugin.id.as_str(),
                cycle = self.cycle,
                "plugin reported non-OK status, ending consumption"
            );
            self.plugins.len()
        };
        EngineState::Plugin
    }

    fn run_checks(&mut self) {
        let warped = apply_warp(&self.vector.initial_phase_state, self.totals.warp_total);
        self.verdict = decide(
            check_symmetry(&warped),
            self.totals.plugin_status_ok,
            check_error(self.totals.error_total),
        );
    }

    /// Drive the engine to DONE.
    ///
    /// The sink receives a snapshot before every step and one final
    /// snapshot in DONE, so a run of `n` cycles yields `n + 1` snapshots.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError`] from [`step`](Self::step).
    pub fn run(&mut self, sink: &mut dyn SignalSink) -> Result<CycleResultRecord, EngineError> {
        while !self.is_done() {
            sink.on_snapshot(&self.snapshot());
            self.step()?;
        }
        sink.on_snapshot(&self.snapshot());

        debug!(
            vector_id = self.vector.vector_id.as_str(),
            cycles = self.cycle,
            plugins_consumed = self.plugins_consumed(),
            true_delivery = self.verdict.true_delivery,
            seal = %self.seal_out,
            "engine run complete"
        );

        Ok(self.result())
    }

    /// The output record for the current register values.
    pub fn result(&self) -> CycleResultRecord {
        CycleResultRecord {
            vector_id: self.vector.vector_id.clone(),
            warp_sum_x: self.totals.warp_total.x.to_bits(),
            error_sum: self.error_sum.to_bits(),
            seal_out: self.seal_out.to_hex(),
            true_delivery: self.verdict.true_delivery,
            cycles: self.cycle,
        }
    }
}

/// Run a fresh engine over `vector` to completion.
///
/// # Errors
///
/// Propagates [`EngineError`] from [`CycleEngine::run`].
pub fn run_vector(vector: &ConformanceVector, sink: &mut dyn SignalSink) -> Result<CycleResultRecord, EngineError> {
    CycleEngine::new(vector).run(sink)
}
