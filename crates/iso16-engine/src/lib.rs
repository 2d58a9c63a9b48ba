//! Cycle-accurate True Delivery engine for ISO-16.
//!
//! The engine replays the True Delivery computation one state transition
//! per cycle and reports its registers to a [`SignalSink`] before every
//! transition. It exists so a software run can be lined up cycle by cycle
//! against an HDL simulation of the same vector.
//!
//! # Modules
//!
//! - [`state`] -- [`EngineState`] and its 4-bit codes.
//! - [`engine`] -- [`CycleEngine`], [`EngineSnapshot`], and [`run_vector`].
//! - [`signal`] -- [`Signal`], [`SignalValue`], the [`SignalSink`] trait,
//!   and the [`NullSink`], [`RecordingSink`], and [`TracingSink`] sinks.
//! - [`vcd`] -- [`VcdSink`], a Value Change Dump writer.
//!
//! # Usage
//!
//! ```
//! use iso16_engine::{RecordingSink, run_vector};
//! use iso16_types::{ConformanceVector, PhaseState, PluginSet};
//!
//! let vector = ConformanceVector::new("V0000", PhaseState::default(), PluginSet::new());
//! let mut sink = RecordingSink::new();
//! let record = run_vector(&vector, &mut sink).unwrap();
//! assert_eq!(record.cycles, 6);
//! assert_eq!(sink.snapshots.len(), 7);
//! ```

pub mod engine;
pub mod signal;
pub mod state;
pub mod vcd;

pub use engine::{CycleEngine, EngineError, EngineSnapshot, run_vector};
pub use signal::{NullSink, RecordingSink, Signal, SignalEvent, SignalSink, SignalValue, TracingSink};
pub use state::EngineState;
pub use vcd::VcdSink;
