//! Shared type definitions for the ISO-16 True Delivery conformance engine.
//!
//! This crate is the single source of truth for the data that flows between
//! the evaluator, the serializer, the cycle engine, and the suite runner.
//! Every type here is plain data with serde derives; the computation lives
//! in `iso16-core`, `iso16-seal`, and `iso16-engine`.
//!
//! # Modules
//!
//! - [`fixed`] -- The [`Q16`] fixed-point scalar and the [`Triple`] vector
//! - [`phase`] -- The 16-face [`PhaseState`]
//! - [`plugin`] -- Plugin records and the input-ordered [`PluginSet`]
//! - [`vector`] -- The [`ConformanceVector`] input record and its [`Nonce`]
//! - [`outcome`] -- Computed results, expected outcomes, and output records
//!
//! # Invariants carried by the types
//!
//! - A [`PhaseState`] always has exactly 16 faces (it wraps `[Triple; 16]`).
//! - A [`Nonce`] is always exactly 16 bytes.
//! - A [`PluginSet`] never holds two plugins under the same key.

pub mod fixed;
pub mod outcome;
pub mod phase;
pub mod plugin;
pub mod vector;

// Re-export all public types at crate root for convenience.
pub use fixed::{Q16, Triple};
pub use outcome::{CycleResultRecord, DeliveryResult, ExpectedOutcome, ResultRecord};
pub use phase::{PHASE_FACES, PhaseState};
pub use plugin::{Domain, Plugin, PluginSet, PluginSetError, PluginStatus};
pub use vector::{ConformanceVector, DEFAULT_IMPLEMENTATION_ID, NONCE_LEN, Nonce, NonceError};
