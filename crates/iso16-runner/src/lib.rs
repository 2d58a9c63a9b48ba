//! ISO-16 conformance suite runner.
//!
//! Runs a directory of conformance vectors through the canonical pipeline
//! and the cycle-accurate engine, compares the selected seal against each
//! vector's `expected_seal`, and writes per-vector result records plus an
//! aggregate report.
//!
//! # Architecture
//!
//! ```text
//! iso16-config.yaml --> RunnerConfig --> Suite
//!                                         |
//!   vectors/V*.json --> schema gate --> loader --> iso16-core + iso16-seal
//!                                               \-> iso16-engine
//!                                         |
//!                         results/<id>_result.json, conformance_report.json
//! ```
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`error`] -- Suite-level [`RunnerError`](error::RunnerError).
//! - [`loader`] -- Vector discovery and file loading.
//! - [`validation`] -- Schema gate with a per-run schema cache.
//! - [`suite`] -- The per-vector pipeline and the suite loop.
//! - [`report`] -- The aggregate report.

pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod suite;
pub mod validation;

pub use config::{ConfigError, LoggingConfig, RunnerConfig, SealMode, SuiteConfig};
pub use error::RunnerError;
pub use report::{FailureReason, SuiteReport, Summary, VectorDetail, VectorStatus};
pub use suite::{Suite, run_suite};
