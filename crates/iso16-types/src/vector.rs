//! The conformance vector input record.
//!
//! A vector arrives as JSON that an upstream validator has already checked
//! for structure. Deserialization here still enforces the invariants the
//! types carry (16 faces, 16-byte nonce, unique plugin keys) and fills in
//! the documented defaults for optional fields.

use serde::{Deserialize, Serialize};

use crate::phase::PhaseState;
use crate::plugin::PluginSet;

/// Implementation id used when a vector does not name one.
pub const DEFAULT_IMPLEMENTATION_ID: &str = "iso16-ref";

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 16;

// ---------------------------------------------------------------------------
// Nonce
// ---------------------------------------------------------------------------

/// Errors decoding a [`Nonce`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NonceError {
    /// The nonce string is not valid hexadecimal.
    #[error("nonce is not valid hex: {source}")]
    InvalidHex {
        /// The underlying decode error.
        #[from]
        source: hex::FromHexError,
    },

    /// The nonce decoded to the wrong number of bytes.
    #[error("nonce must be exactly 16 bytes, got {actual}")]
    Length {
        /// The decoded length.
        actual: usize,
    },
}

/// A 128-bit nonce, serialized as 32 hex characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// The all-zero nonce.
    pub const ZERO: Self = Self([0; NONCE_LEN]);

    /// Wrap 16 raw bytes.
    pub const fn new(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`NonceError::InvalidHex`] for malformed hex and
    /// [`NonceError::Length`] if the decoded value is not 16 bytes.
    pub fn from_hex(text: &str) -> Result<Self, NonceError> {
        let bytes = hex::decode(text.trim())?;
        Self::try_from(bytes.as_slice())
    }

    /// Borrow the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = NonceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        <[u8; NONCE_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_err| NonceError::Length {
                actual: bytes.len(),
            })
    }
}

impl TryFrom<String> for Nonce {
    type Error = NonceError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::from_hex(&text)
    }
}

impl From<Nonce> for String {
    fn from(nonce: Nonce) -> Self {
        nonce.to_hex()
    }
}

// ---------------------------------------------------------------------------
// ConformanceVector
// ---------------------------------------------------------------------------

/// One conformance test vector. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceVector {
    /// Vector identifier (e.g. `V0001`). Loaders fall back to the file stem
    /// when the document leaves it empty.
    #[serde(default, alias = "id")]
    pub vector_id: String,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The 16-face phase state before warping.
    pub initial_phase_state: PhaseState,

    /// Plugin contributors, keyed by id, in document order.
    #[serde(default)]
    pub plugins: PluginSet,

    /// Identifier of the implementation producing the seal.
    #[serde(default = "default_implementation_id")]
    pub implementation_id: String,

    /// Microseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: u64,

    /// 128-bit nonce.
    #[serde(default)]
    pub nonce: Nonce,

    /// Expected seal as 64 hex characters. Empty if the vector carries none.
    #[serde(default)]
    pub expected_seal: String,
}

impl ConformanceVector {
    /// Create a vector with default implementation id, timestamp, nonce, and
    /// no expected seal.
    pub fn new(vector_id: impl Into<String>, initial_phase_state: PhaseState, plugins: PluginSet) -> Self {
        Self {
            vector_id: vector_id.into(),
            description: None,
            initial_phase_state,
            plugins,
            implementation_id: default_implementation_id(),
            timestamp: 0,
            nonce: Nonce::ZERO,
            expected_seal: String::new(),
        }
    }
}

fn default_implementation_id() -> String {
    DEFAULT_IMPLEMENTATION_ID.to_owned()
}
