//! Observable signals and the sinks that receive them.
//!
//! Every engine snapshot is delivered as ten `(signal, value)` events in a
//! fixed order. Values are typed so that a scalar can never exceed 32 bits
//! and the seal is always exactly 256 bits, which lets a waveform writer
//! emit them at their declared widths without truncation.

use iso16_seal::Seal256;
use tracing::trace;

use crate::engine::EngineSnapshot;

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// One observable engine signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// Current state code.
    State,
    /// Cycle counter.
    Cycle,
    /// X component of the running warp sum.
    WarpSumX,
    /// Published error sum.
    ErrorSum,
    /// Symmetry flag.
    SymmetryOk,
    /// Error flag.
    ErrorOk,
    /// Verdict flag.
    TrueDelivery,
    /// Set on the first seal cycle.
    SealStart,
    /// Set once `seal_out` holds the seal.
    SealReady,
    /// Seal register.
    SealOut,
}

impl Signal {
    /// All signals in snapshot order.
    pub const ALL: [Self; 10] = [
        Self::State,
        Self::Cycle,
        Self::WarpSumX,
        Self::ErrorSum,
        Self::SymmetryOk,
        Self::ErrorOk,
        Self::TrueDelivery,
        Self::SealStart,
        Self::SealReady,
        Self::SealOut,
    ];

    /// Signal name as it appears in waveform files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Cycle => "cycle",
            Self::WarpSumX => "warp_sum_x",
            Self::ErrorSum => "error_sum",
            Self::SymmetryOk => "symmetry_ok",
            Self::ErrorOk => "error_ok",
            Self::TrueDelivery => "true_delivery",
            Self::SealStart => "seal_start",
            Self::SealReady => "seal_ready",
            Self::SealOut => "seal_out",
        }
    }

    /// Declared width in bits.
    pub const fn width(self) -> u32 {
        match self {
            Self::State => 4,
            Self::Cycle | Self::WarpSumX | Self::ErrorSum => 32,
            Self::SymmetryOk | Self::ErrorOk | Self::TrueDelivery | Self::SealStart | Self::SealReady => 1,
            Self::SealOut => 256,
        }
    }

    /// Short identifier code used in VCD output.
    pub const fn vcd_id(self) -> char {
        match self {
            Self::State => 's',
            Self::Cycle => 'c',
            Self::WarpSumX => 'w',
            Self::ErrorSum => 'e',
            Self::SymmetryOk => 'y',
            Self::ErrorOk => 'r',
            Self::TrueDelivery => 't',
            Self::SealStart => 'a',
            Self::SealReady => 'b',
            Self::SealOut => 'z',
        }
    }
}

impl core::fmt::Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// The value carried by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalValue {
    /// A scalar of at most 32 bits.
    Scalar(u32),
    /// The 256-bit seal register.
    Seal(Seal256),
}

impl SignalValue {
    /// A 1-bit flag value.
    pub fn flag(value: bool) -> Self {
        Self::Scalar(u32::from(value))
    }

    /// The scalar payload, if this is a scalar.
    pub const fn as_scalar(&self) -> Option<u32> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Seal(_) => None,
        }
    }

    /// The seal payload, if this is the seal register.
    pub const fn as_seal(&self) -> Option<&Seal256> {
        match self {
            Self::Scalar(_) => None,
            Self::Seal(seal) => Some(seal),
        }
    }
}

impl core::fmt::Display for SignalValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "0x{v:08x}"),
            Self::Seal(seal) => write!(f, "{seal}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver of per-cycle signal events.
///
/// The engine calls [`on_snapshot`](Self::on_snapshot) once per cycle and
/// once more after reaching DONE. The provided implementation forwards each
/// signal to [`record`](Self::record) in [`Signal::ALL`] order.
pub trait SignalSink {
    /// Receive one signal value.
    fn record(&mut self, signal: Signal, value: SignalValue);

    /// Receive a full snapshot.
    fn on_snapshot(&mut self, snapshot: &EngineSnapshot) {
        for (signal, value) in snapshot.signals() {
            self.record(signal, value);
        }
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn record(&mut self, _signal: Signal, _value: SignalValue) {}

    fn on_snapshot(&mut self, _snapshot: &EngineSnapshot) {}
}

/// One recorded signal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalEvent {
    /// Which signal.
    pub signal: Signal,
    /// Its value at the snapshot.
    pub value: SignalValue,
}

/// An in-memory sink keeping every event and snapshot.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Events in emission order.
    pub events: Vec<SignalEvent>,
    /// Snapshots in emission order.
    pub snapshots: Vec<EngineSnapshot>,
}

impl RecordingSink {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Every recorded value of one signal, in order.
    pub fn values_of(&self, signal: Signal) -> Vec<SignalValue> {
        self.events
            .iter()
            .filter(|event| event.signal == signal)
            .map(|event| event.value)
            .collect()
    }
}

impl SignalSink for RecordingSink {
    fn record(&mut self, signal: Signal, value: SignalValue) {
        self.events.push(SignalEvent { signal, value });
    }

    fn on_snapshot(&mut self, snapshot: &EngineSnapshot) {
        for (signal, value) in snapshot.signals() {
            self.record(signal, value);
        }
        self.snapshots.push(*snapshot);
    }
}

/// A sink that emits each signal as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SignalSink for TracingSink {
    fn record(&mut self, signal: Signal, value: SignalValue) {
        trace!(signal = signal.name(), width = signal.width(), value = %value, "signal");
    }
}
