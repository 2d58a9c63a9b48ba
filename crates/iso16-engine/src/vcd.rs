//! Value Change Dump output.
//!
//! [`VcdSink`] renders the engine signal set as a VCD document that
//! waveform viewers and the hardware testbench can load side by side. Each
//! recorded value advances the timestamp by one, and values are written at
//! their declared widths in binary.

use crate::signal::{Signal, SignalSink, SignalValue};

/// Timescale declared in the header.
pub const TIMESCALE: &str = "1ns";

/// A [`SignalSink`] that accumulates a VCD document in memory.
#[derive(Debug, Clone)]
pub struct VcdSink {
    out: String,
    time: u64,
}

impl VcdSink {
    /// Start a document with the given `$date` text.
    pub fn new(date: &str) -> Self {
        let mut out = String::new();
        out.push_str("$date\n    ");
        out.push_str(date);
        out.push_str("\n$end\n");
        out.push_str("$version\n    iso16-engine ");
        out.push_str(env!("CARGO_PKG_VERSION"));
        out.push_str("\n$end\n");
        out.push_str(&format!("$timescale {TIMESCALE} $end\n"));
        out.push_str("$scope module iso16 $end\n");
        for signal in Signal::ALL {
            out.push_str(&format!(
                "$var wire {} {} {} $end\n",
                signal.width(),
                signal.vcd_id(),
                signal.name()
            ));
        }
        out.push_str("$upscope $end\n$enddefinitions $end\n\n");
        Self { out, time: 0 }
    }

    /// Number of value changes recorded.
    pub const fn changes(&self) -> u64 {
        self.time
    }

    /// Close the document and return its text.
    pub fn finish(mut self) -> String {
        self.out.push_str("\n$comment\n    iso16-engine trace closed\n$end\n");
        self.out
    }
}

/// Render a value as a VCD value change for `signal`.
fn value_change(signal: Signal, value: SignalValue) -> String {
    let id = signal.vcd_id();
    match value {
        SignalValue::Scalar(v) if signal.width() == 1 => format!("{}{id}", v & 1),
        SignalValue::Scalar(v) => {
            let width = usize::try_from(signal.width()).unwrap_or(32);
            format!("b{v:0width$b} {id}")
        }
        SignalValue::Seal(seal) => {
            let bits: String = seal.as_bytes().iter().map(|b| format!("{b:08b}")).collect();
            format!("b{bits} {id}")
        }
    }
}

impl SignalSink for VcdSink {
    fn record(&mut self, signal: Signal, value: SignalValue) {
        self.time = self.time.saturating_add(1);
        self.out.push_str(&format!("#{}\n", self.time));
        self.out.push_str(&value_change(signal, value));
        self.out.push('\n');
    }
}
