//! Engine states and their 4-bit signal codes.

use serde::{Deserialize, Serialize};

/// A state of the True Delivery state machine.
///
/// The codes match the hardware encoding and are what the `state` signal
/// carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineState {
    /// Load the phase state context.
    Collect,
    /// Consume one plugin per cycle.
    Plugin,
    /// Publish the accumulated error sum.
    Accumulate,
    /// Run the symmetry and error checks.
    Check,
    /// Two-cycle seal boundary.
    Seal,
    /// Terminal.
    Done,
}

impl EngineState {
    /// The 4-bit state code.
    pub const fn code(self) -> u8 {
        match self {
            Self::Collect => 0x1,
            Self::Plugin => 0x2,
            Self::Accumulate => 0x3,
            Self::Check => 0x4,
            Self::Seal => 0x5,
            Self::Done => 0x6,
        }
    }

    /// Decode a state code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x1 => Some(Self::Collect),
            0x2 => Some(Self::Plugin),
            0x3 => Some(Self::Accumulate),
            0x4 => Some(Self::Check),
            0x5 => Some(Self::Seal),
            0x6 => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether this is the terminal state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl core::fmt::Display for EngineState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Collect => "COLLECT",
            Self::Plugin => "PLUGIN",
            Self::Accumulate => "ACCUMULATE",
            Self::Check => "CHECK",
            Self::Seal => "SEAL",
            Self::Done => "DONE",
        };
        f.write_str(name)
    }
}
