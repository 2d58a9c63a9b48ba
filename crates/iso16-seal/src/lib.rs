//! Canonical serialization and seal computation for ISO-16.
//!
//! Two seal definitions exist, and they are deliberately kept apart:
//!
//! - [`tetra::tetra_seal`] -- the Tetra-Seal. SHA3-256 over the domain
//!   prefix `ISO16-SEAL-V1:` followed by the full canonical serialization of
//!   the vector and its computed [`DeliveryResult`]. This is the normative
//!   conformance seal.
//! - [`cycle::cycle_seal`] -- the cycle seal produced by the cycle-accurate
//!   engine. SHA3-256 over `ISO16-SEAL-V1` (no colon) followed by the
//!   warp sum, error sum, and cycle counter. It mirrors the hardware seal
//!   boundary and is only comparable against other cycle seals.
//!
//! Both return a [`Seal256`].
//!
//! # Modules
//!
//! - [`canonical`] -- The canonical byte layout and [`CanonicalWriter`].
//! - [`tetra`] -- The Tetra-Seal.
//! - [`cycle`] -- The cycle-engine seal.
//!
//! [`DeliveryResult`]: iso16_types::DeliveryResult

pub mod canonical;
pub mod cycle;
pub mod tetra;

pub use canonical::{CanonicalWriter, MAX_SHORT_STRING, serialize};
pub use cycle::{CYCLE_PREFIX, cycle_seal};
pub use tetra::{DOMAIN_PREFIX, seal_bytes, tetra_seal};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that abort canonical serialization of a vector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A length-prefixed string does not fit its one-byte length.
    #[error("{field} of plugin {plugin:?} is {len} UTF-8 bytes, limit is 255")]
    FieldTooLong {
        /// Which field overflowed (`id` or `version`).
        field: &'static str,
        /// Key of the plugin carrying the field.
        plugin: String,
        /// Encoded length in bytes.
        len: usize,
    },
}

/// Errors parsing a [`Seal256`] from text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SealParseError {
    /// The text is not valid hexadecimal.
    #[error("seal is not valid hex: {source}")]
    InvalidHex {
        /// The underlying decode error.
        #[from]
        source: hex::FromHexError,
    },

    /// The text did not decode to 32 bytes.
    #[error("seal must be 32 bytes (64 hex chars), got {actual} bytes")]
    Length {
        /// Decoded length in bytes.
        actual: usize,
    },
}

// ---------------------------------------------------------------------------
// Seal value
// ---------------------------------------------------------------------------

/// Length of a seal digest in bytes.
pub const SEAL_LEN: usize = 32;

/// A 256-bit seal digest.
///
/// Displays as 64 lowercase hex characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seal256([u8; SEAL_LEN]);

impl Seal256 {
    /// The all-zero value a seal register holds before it is computed.
    pub const ZERO: Self = Self([0; SEAL_LEN]);

    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; SEAL_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the digest bytes, most significant first.
    pub const fn as_bytes(&self) -> &[u8; SEAL_LEN] {
        &self.0
    }

    /// Lowercase hex encoding (64 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compare against a hex string, ignoring surrounding whitespace and
    /// letter case.
    pub fn matches_hex(&self, candidate: &str) -> bool {
        candidate.trim().eq_ignore_ascii_case(&self.to_hex())
    }
}

impl core::fmt::Display for Seal256 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl core::str::FromStr for Seal256 {
    type Err = SealParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(text.trim())?;
        <[u8; SEAL_LEN]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_err| SealParseError::Length {
                actual: bytes.len(),
            })
    }
}

impl From<[u8; SEAL_LEN]> for Seal256 {
    fn from(bytes: [u8; SEAL_LEN]) -> Self {
        Self(bytes)
    }
}
