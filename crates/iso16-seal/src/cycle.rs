//! The cycle-engine seal.
//!
//! This is not the Tetra-Seal. It hashes only the three registers the
//! engine exposes at its seal boundary, under a prefix with no trailing
//! colon, and is only meaningful next to another cycle seal.

use sha3::{Digest, Sha3_256};

use crate::Seal256;

/// Prefix hashed ahead of the seal registers.
pub const CYCLE_PREFIX: &[u8] = b"ISO16-SEAL-V1";

/// `SHA3-256(prefix || be32(warp_sum_x) || be32(error_sum) || be32(cycle))`.
pub fn cycle_seal(warp_sum_x: u32, error_sum: u32, cycle: u32) -> Seal256 {
    let mut hasher = Sha3_256::new();
    hasher.update(CYCLE_PREFIX);
    hasher.update(warp_sum_x.to_be_bytes());
    hasher.update(error_sum.to_be_bytes());
    hasher.update(cycle.to_be_bytes());
    Seal256::new(hasher.finalize().into())
}
