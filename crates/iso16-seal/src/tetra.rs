//! The Tetra-Seal: SHA3-256 over a domain prefix and the canonical bytes.

use iso16_types::{ConformanceVector, DeliveryResult};
use sha3::{Digest, Sha3_256};
use tracing::debug;

use crate::canonical::serialize;
use crate::{EncodeError, Seal256};

/// Domain-separation literal hashed ahead of the canonical bytes.
pub const DOMAIN_PREFIX: &[u8] = b"ISO16-SEAL-V1:";

/// Seal an already-serialized body.
pub fn seal_bytes(canonical: &[u8]) -> Seal256 {
    let mut hasher = Sha3_256::new();
    hasher.update(DOMAIN_PREFIX);
    hasher.update(canonical);
    Seal256::new(hasher.finalize().into())
}

/// Serialize `vector` with its computed `result` and seal the bytes.
///
/// # Errors
///
/// Propagates [`EncodeError`] from [`serialize`].
pub fn tetra_seal(vector: &ConformanceVector, result: &DeliveryResult) -> Result<Seal256, EncodeError> {
    let bytes = serialize(vector, result)?;
    let seal = seal_bytes(&bytes);
    debug!(
        vector_id = vector.vector_id.as_str(),
        canonical_len = bytes.len(),
        seal = %seal,
        "tetra-seal computed"
    );
    Ok(seal)
}
