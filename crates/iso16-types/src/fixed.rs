//! Q16.16 fixed-point scalar and three-axis vector.
//!
//! A [`Q16`] is a signed 32-bit two's-complement integer read as 16 integer
//! bits and 16 fractional bits. The type is a transparent wrapper: on the
//! wire it is a plain JSON integer holding the raw bits, never a float.
//!
//! Arithmetic on these values lives in `iso16-core::fixed`; this module only
//! defines the representation and its byte encodings.

use serde::{Deserialize, Serialize};

/// Number of fractional bits in the Q16.16 format.
pub const FRACTIONAL_BITS: u32 = 16;

/// A signed Q16.16 fixed-point value, stored as its raw 32-bit pattern.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Q16(pub i32);

impl Q16 {
    /// The value 0.
    pub const ZERO: Self = Self(0);

    /// The value 1.0 (`0x0001_0000`).
    pub const ONE: Self = Self(0x0001_0000);

    /// The smallest representable value, `-2^31` raw.
    pub const MIN: Self = Self(i32::MIN);

    /// The largest representable value, `2^31 - 1` raw.
    pub const MAX: Self = Self(i32::MAX);

    /// The ISO-16 tolerance: one unit in the last place (`2^-16`).
    pub const EPSILON: Self = Self(1);

    /// Wrap a raw 32-bit pattern.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Build a value with the given integer part and a zero fraction.
    pub fn from_int(int: i16) -> Self {
        // i16 << 16 always fits in i32.
        Self(i32::from(int).wrapping_shl(FRACTIONAL_BITS))
    }

    /// Return the raw signed bits.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Reinterpret the raw bits as unsigned, bit for bit.
    ///
    /// This is how the value appears on a 32-bit hardware signal.
    pub const fn to_bits(self) -> u32 {
        u32::from_be_bytes(self.0.to_be_bytes())
    }

    /// Reinterpret an unsigned 32-bit pattern as a Q16.16 value.
    pub const fn from_bits(bits: u32) -> Self {
        Self(i32::from_be_bytes(bits.to_be_bytes()))
    }

    /// Big-endian two's-complement encoding.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Approximate real value. Informative only; never used for verdicts.
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::ONE.0)
    }
}

impl From<i32> for Q16 {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl core::fmt::Display for Q16 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:08X}", self.to_bits())
    }
}

/// A three-axis Q16.16 vector `(x, y, z)`.
///
/// Serialized as a JSON array `[x, y, z]`, matching the conformance vector
/// layout for phase faces and plugin warp vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Q16; 3]", into = "[Q16; 3]")]
pub struct Triple {
    /// X axis.
    pub x: Q16,
    /// Y axis.
    pub y: Q16,
    /// Z axis.
    pub z: Q16,
}

impl Triple {
    /// The all-zero vector.
    pub const ZERO: Self = Self::new(Q16::ZERO, Q16::ZERO, Q16::ZERO);

    /// Construct a vector from its three axes.
    pub const fn new(x: Q16, y: Q16, z: Q16) -> Self {
        Self { x, y, z }
    }

    /// Construct a vector from three raw bit patterns.
    pub const fn from_raw(x: i32, y: i32, z: i32) -> Self {
        Self::new(Q16(x), Q16(y), Q16(z))
    }

    /// The axes in `x, y, z` order.
    pub const fn axes(self) -> [Q16; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[Q16; 3]> for Triple {
    fn from([x, y, z]: [Q16; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Triple> for [Q16; 3] {
    fn from(t: Triple) -> Self {
        t.axes()
    }
}
