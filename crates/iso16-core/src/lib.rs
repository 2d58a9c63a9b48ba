//! Deterministic True Delivery evaluation for ISO-16.
//!
//! This crate owns the normative computation that turns a validated
//! [`ConformanceVector`] into a [`DeliveryResult`]:
//!
//! ```text
//! plugins -> evaluate_plugins -> apply_warp -> check_symmetry
//!                             \-> check_error -> decide -> DeliveryResult
//! ```
//!
//! # Modules
//!
//! - [`fixed`] -- Q16.16 wrapping arithmetic (`add`, `sub`, `abs`, `leq`).
//! - [`plugin`] -- Plugin fold with early exit on the first failure.
//! - [`warp`] -- Broadcast of the warp total onto every phase face.
//! - [`check`] -- Per-axis symmetry check and scalar error check.
//! - [`decide`] -- Combination of the checks into a [`Verdict`].
//! - [`delivery`] -- The end-to-end pipeline, [`evaluate`].
//! - [`compare`] -- Expected-vs-actual field comparison.
//!
//! # Determinism
//!
//! Every function here is pure and total: no I/O, no shared state, no
//! floating point, and no error paths. Overflow is defined Q16.16
//! wraparound, never a failure. Evaluating the same vector twice yields
//! identical results, and distinct vectors may be evaluated concurrently
//! by the caller without coordination.
//!
//! # Usage
//!
//! ```
//! use iso16_core::evaluate;
//! use iso16_types::{ConformanceVector, PhaseState, PluginSet};
//!
//! let vector = ConformanceVector::new("V0000", PhaseState::default(), PluginSet::new());
//! let result = evaluate(&vector);
//! assert!(result.true_delivery);
//! ```
//!
//! [`ConformanceVector`]: iso16_types::ConformanceVector
//! [`DeliveryResult`]: iso16_types::DeliveryResult
//! [`Verdict`]: decide::Verdict

pub mod check;
pub mod compare;
pub mod decide;
pub mod delivery;
pub mod fixed;
pub mod plugin;
pub mod warp;

// Re-export primary operations at crate root.
pub use check::{check_error, check_symmetry};
pub use compare::{MismatchField, compare};
pub use decide::{Verdict, decide};
pub use delivery::evaluate;
pub use plugin::{PluginTotals, evaluate_plugins};
pub use warp::apply_warp;
