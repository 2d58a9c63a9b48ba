//! The aggregate conformance report.

use std::path::Path;

use iso16_core::MismatchField;
use serde::{Deserialize, Serialize};

/// File name of the aggregate report inside the results directory.
pub const REPORT_FILE: &str = "conformance_report.json";

/// Per-vector verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VectorStatus {
    /// The computed seal matched and no field disagreed.
    Pass,
    /// Anything else.
    Fail,
}

/// Why a vector failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// `expected_seal` is not 64 hex characters.
    InvalidExpectedSealLength,
    /// The selected seal differs from `expected_seal`.
    SealMismatch,
    /// A field differs from the published expected outcome.
    FieldMismatch,
    /// The vector or its expected outcome could not be read.
    LoadError,
    /// The vector failed the schema gate.
    ValidationError,
    /// Canonical serialization was aborted.
    EncodingError,
    /// The cycle engine stopped before DONE.
    EngineError,
    /// An earlier vector file already used this `vector_id`.
    DuplicateVectorId,
}

impl FailureReason {
    /// The reason as written to the report.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidExpectedSealLength => "invalid_expected_seal_length",
            Self::SealMismatch => "seal_mismatch",
            Self::FieldMismatch => "field_mismatch",
            Self::LoadError => "load_error",
            Self::ValidationError => "validation_error",
            Self::EncodingError => "encoding_error",
            Self::EngineError => "engine_error",
            Self::DuplicateVectorId => "duplicate_vector_id",
        }
    }
}

impl core::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pass/fail counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Vectors that passed.
    pub pass: usize,
    /// Vectors that failed.
    pub fail: usize,
    /// Vectors discovered, including any skipped by strict mode.
    pub total: usize,
}

/// One vector's entry in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDetail {
    /// Vector identifier.
    pub vector_id: String,
    /// Verdict.
    pub status: VectorStatus,
    /// Failure reason, absent on PASS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    /// Human-readable error text for load, validation, encoding, and engine
    /// failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Fields that differ from the expected outcome.
    #[serde(default)]
    pub mismatched_fields: Vec<MismatchField>,
    /// Normalized expected seal.
    pub expected: String,
    /// Computed seal, absent if none was computed.
    pub actual: Option<String>,
    /// Wall time spent on the vector, absent if it was not run.
    pub elapsed_seconds: Option<f64>,
}

impl VectorDetail {
    /// A failure entry with no computed seal.
    pub fn failed(vector_id: impl Into<String>, reason: FailureReason, expected: impl Into<String>) -> Self {
        Self {
            vector_id: vector_id.into(),
            status: VectorStatus::Fail,
            reason: Some(reason),
            message: None,
            mismatched_fields: Vec::new(),
            expected: expected.into(),
            actual: None,
            elapsed_seconds: None,
        }
    }

    /// Attach an error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Whether this entry is a PASS.
    pub fn passed(&self) -> bool {
        self.status == VectorStatus::Pass
    }
}

/// The aggregate report written to [`REPORT_FILE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite start time, RFC 3339.
    pub timestamp: String,
    /// Pass/fail counts.
    pub summary: Summary,
    /// Per-vector entries in processing order.
    pub details: Vec<VectorDetail>,
}

impl SuiteReport {
    /// An empty report for a suite of `total` vectors.
    pub const fn new(timestamp: String, total: usize) -> Self {
        Self {
            timestamp,
            summary: Summary {
                pass: 0,
                fail: 0,
                total,
            },
            details: Vec::new(),
        }
    }

    /// Append an entry and update the counts.
    pub fn record(&mut self, detail: VectorDetail) {
        if detail.passed() {
            self.summary.pass = self.summary.pass.saturating_add(1);
        } else {
            self.summary.fail = self.summary.fail.saturating_add(1);
        }
        self.details.push(detail);
    }

    /// Whether no vector failed.
    pub const fn is_success(&self) -> bool {
        self.summary.fail == 0
    }

    /// Write the report as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
