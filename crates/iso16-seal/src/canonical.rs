//! Canonical serialization.
//!
//! The byte layout is normative. Every multi-byte integer is big-endian and
//! every Q16.16 value is written as its 32-bit two's complement bits:
//!
//! | # | Field                | Encoding                                   |
//! |---|----------------------|--------------------------------------------|
//! | 1 | initial phase state  | 16 x (x, y, z), 4 bytes each (192 bytes)   |
//! | 2 | plugins, sorted by id| len+id, domain, warp (12), error (4), len+version |
//! | 3 | warp total           | 12 bytes                                   |
//! | 4 | error total          | 4 bytes                                    |
//! | 5 | warped phase state   | 192 bytes                                  |
//! | 6 | verdict flags        | symmetry, error, delivery: 1 byte each     |
//! | 7 | implementation id    | raw UTF-8, no length, no terminator        |
//! | 8 | timestamp            | u64                                        |
//! | 9 | nonce                | 16 raw bytes                               |

use iso16_types::{ConformanceVector, DeliveryResult, PhaseState, Plugin, Q16, Triple};

use crate::EncodeError;

/// Longest string the one-byte length prefix can describe.
pub const MAX_SHORT_STRING: usize = 255;

/// Append-only builder for canonical bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalWriter {
    buf: Vec<u8>,
}

impl CanonicalWriter {
    /// Create an empty writer.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append one byte.
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a boolean as `0x01` or `0x00`.
    pub fn put_bool(&mut self, value: bool) {
        self.put_u8(u8::from(value));
    }

    /// Append a big-endian u64.
    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a Q16.16 value as big-endian two's complement.
    pub fn put_q16(&mut self, value: Q16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append x, y, z.
    pub fn put_triple(&mut self, triple: Triple) {
        for axis in triple.axes() {
            self.put_q16(axis);
        }
    }

    /// Append all 16 faces in order.
    pub fn put_phase_state(&mut self, phase_state: &PhaseState) {
        for face in phase_state {
            self.put_triple(*face);
        }
    }

    /// Append bytes verbatim, with no length prefix.
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a one-byte length followed by the UTF-8 bytes of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FieldTooLong`] if `text` encodes to more than
    /// [`MAX_SHORT_STRING`] bytes. Nothing is written in that case.
    pub fn put_short_str(&mut self, field: &'static str, plugin: &str, text: &str) -> Result<(), EncodeError> {
        let len = u8::try_from(text.len()).map_err(|_err| EncodeError::FieldTooLong {
            field,
            plugin: plugin.to_owned(),
            len: text.len(),
        })?;
        self.put_u8(len);
        self.put_raw(text.as_bytes());
        Ok(())
    }

    /// Append one plugin record.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FieldTooLong`] if the id or version exceeds
    /// [`MAX_SHORT_STRING`] bytes.
    pub fn put_plugin(&mut self, key: &str, plugin: &Plugin) -> Result<(), EncodeError> {
        self.put_short_str("id", key, &plugin.id)?;
        self.put_u8(plugin.domain.code());
        self.put_triple(plugin.warp_vector);
        self.put_q16(plugin.error);
        self.put_short_str("version", key, &plugin.version)
    }
}

/// Bytes taken by the fixed-width fields of a serialization:
/// 192 + 12 + 4 + 192 + 3 + 8 + 16.
const FIXED_LEN: usize = 427;

/// Serialize a vector together with its computed result.
///
/// Plugins are written in ascending id order, so two vectors that differ
/// only in the document order of their plugin mapping produce identical
/// bytes.
///
/// # Errors
///
/// Returns [`EncodeError::FieldTooLong`] if any plugin id or version is
/// longer than [`MAX_SHORT_STRING`] bytes. The nonce has already been
/// checked for length when the vector was built.
pub fn serialize(vector: &ConformanceVector, result: &DeliveryResult) -> Result<Vec<u8>, EncodeError> {
    let mut w = CanonicalWriter::with_capacity(FIXED_LEN.saturating_add(vector.implementation_id.len()));

    w.put_phase_state(&vector.initial_phase_state);
    for (key, plugin) in vector.plugins.sorted_by_id() {
        w.put_plugin(key, plugin)?;
    }
    w.put_triple(result.warp_total);
    w.put_q16(result.error_total);
    w.put_phase_state(&result.phase_state_warped);
    w.put_bool(result.symmetry_ok);
    w.put_bool(result.error_ok);
    w.put_bool(result.true_delivery);
    w.put_raw(vector.implementation_id.as_bytes());
    w.put_u64(vector.timestamp);
    w.put_raw(vector.nonce.as_bytes());

    Ok(w.into_bytes())
}
