//! Suite orchestration.
//!
//! [`Suite`] walks the vectors directory in file-name order and, for each
//! vector, runs the canonical pipeline and the cycle engine, writes the
//! per-vector result records, and classifies the outcome:
//!
//! ```text
//! read -> schema gate -> deserialize -> unique id -> expected seal length
//!      -> evaluate + tetra_seal -> cycle engine -> write records
//!      -> seal comparison -> expected-outcome comparison -> VectorDetail
//! ```
//!
//! A problem with one vector becomes a FAIL entry in the report and the
//! suite moves on (unless `strict` is set). Only failures to discover
//! vectors or to write outputs abort the run.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use iso16_core::{MismatchField, evaluate};
use iso16_engine::{TracingSink, VcdSink, run_vector};
use iso16_seal::tetra_seal;
use iso16_types::{ConformanceVector, CycleResultRecord, ResultRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{SealMode, SuiteConfig};
use crate::error::RunnerError;
use crate::loader::{discover_vectors, file_stem, load_expected, read_document, vector_from_document};
use crate::report::{FailureReason, REPORT_FILE, SuiteReport, VectorDetail, VectorStatus};
use crate::validation::Validator;

/// Length of a normalized expected seal in hex characters.
const SEAL_HEX_LEN: usize = 64;

/// Trim and lowercase a seal given as hex text.
pub fn normalize_seal(text: &str) -> String {
    text.trim().to_ascii_lowercase()
}

/// Run the suite described by `config` and write its report.
///
/// # Errors
///
/// See [`Suite::run`].
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteReport, RunnerError> {
    Suite::new(config).run()
}

/// One conformance suite run.
#[derive(Debug)]
pub struct Suite<'c> {
    config: &'c SuiteConfig,
    validator: Validator,
    /// Ids whose output files this run has claimed.
    seen_ids: HashSet<String>,
}

impl<'c> Suite<'c> {
    /// Prepare a run over `config`.
    pub fn new(config: &'c SuiteConfig) -> Self {
        Self {
            config,
            validator: Validator::new(),
            seen_ids: HashSet::new(),
        }
    }

    /// Process every discovered vector and write `conformance_report.json`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::NoVectors`] if the vectors directory is empty,
    /// [`RunnerError::Discovery`] if it cannot be listed, and
    /// [`RunnerError::Write`] or [`RunnerError::Encode`] if an output file
    /// cannot be produced.
    pub fn run(&mut self) -> Result<SuiteReport, RunnerError> {
        let results_dir = &self.config.results_dir;
        std::fs::create_dir_all(results_dir).map_err(|source| RunnerError::Write {
            path: results_dir.clone(),
            source,
        })?;

        let paths = discover_vectors(&self.config.vectors_dir)?;
        if paths.is_empty() {
            return Err(RunnerError::NoVectors {
                dir: self.config.vectors_dir.clone(),
            });
        }

        info!(
            vectors = paths.len(),
            vectors_dir = %self.config.vectors_dir.display(),
            seal_mode = %self.config.seal_mode,
            strict = self.config.strict,
            "suite started"
        );

        let mut report = SuiteReport::new(Utc::now().to_rfc3339(), paths.len());
        for path in &paths {
            let detail = self.process(path)?;
            let failed = !detail.passed();
            if failed {
                warn!(
                    vector_id = detail.vector_id.as_str(),
                    reason = ?detail.reason.map(FailureReason::as_str),
                    message = detail.message.as_deref().unwrap_or(""),
                    "vector failed"
                );
            } else {
                info!(
                    vector_id = detail.vector_id.as_str(),
                    elapsed_seconds = detail.elapsed_seconds.unwrap_or_default(),
                    "vector passed"
                );
            }
            report.record(detail);

            if failed && self.config.strict {
                warn!("strict mode: stopping after first failure");
                break;
            }
        }

        let report_path = results_dir.join(REPORT_FILE);
        report.write_to(&report_path).map_err(|source| RunnerError::Write {
            path: report_path.clone(),
            source,
        })?;

        info!(
            pass = report.summary.pass,
            fail = report.summary.fail,
            total = report.summary.total,
            report = %report_path.display(),
            "suite finished"
        );
        Ok(report)
    }

    /// Process one vector file into its report entry.
    fn process(&mut self, path: &Path) -> Result<VectorDetail, RunnerError> {
        let started = Instant::now();
        let fallback_id = file_stem(path);

        let document = match read_document(path) {
            Ok(document) => document,
            Err(err) => {
                return Ok(VectorDetail::failed(fallback_id, FailureReason::LoadError, "").with_message(err.to_string()));
            }
        };
        let expected = normalize_seal(document_seal(&document));

        let gate = self
            .config
            .schema_path
            .as_deref()
            .map_or(Ok(()), |schema_path| self.validator.validate(&document, schema_path));
        if let Err(err) = gate {
            return Ok(
                VectorDetail::failed(fallback_id, FailureReason::ValidationError, expected).with_message(err.to_string()),
            );
        }

        let vector = match vector_from_document(document, path) {
            Ok(vector) => vector,
            Err(err) => {
                return Ok(VectorDetail::failed(fallback_id, FailureReason::LoadError, expected).with_message(err.to_string()));
            }
        };
        let id = vector.vector_id.as_str();
        if !self.seen_ids.insert(id.to_owned()) {
            return Ok(VectorDetail::failed(id, FailureReason::DuplicateVectorId, expected)
                .with_message(format!("vector_id {id:?} was already used by an earlier vector file")));
        }

        let expected_len = expected.len();
        if expected_len != SEAL_HEX_LEN {
            return Ok(
                VectorDetail::failed(id, FailureReason::InvalidExpectedSealLength, expected)
                    .with_message(format!("expected_seal has {expected_len} characters, need {SEAL_HEX_LEN}")),
            );
        }

        let result = evaluate(&vector);
        let canonical = match tetra_seal(&vector, &result) {
            Ok(seal) => seal,
            Err(err) => {
                return Ok(VectorDetail::failed(id, FailureReason::EncodingError, expected).with_message(err.to_string()));
            }
        };

        let (cycle_record, vcd) = match self.run_engine(&vector) {
            Ok(output) => output,
            Err(err) => {
                return Ok(VectorDetail::failed(id, FailureReason::EngineError, expected).with_message(err.to_string()));
            }
        };

        let record = ResultRecord {
            vector_id: vector.vector_id.clone(),
            warp_total: result.warp_total,
            error_total: result.error_total,
            seal_out: canonical.to_hex(),
            true_delivery: result.true_delivery,
        };
        self.write_json(&format!("{id}_result.json"), &record)?;
        self.write_json(&format!("{id}_cycle_result.json"), &cycle_record)?;
        if let Some(vcd) = vcd {
            self.write_text(&format!("{id}.vcd"), &vcd)?;
        }

        let actual = match self.config.seal_mode {
            SealMode::Canonical => record.seal_out,
            SealMode::Cycle => cycle_record.seal_out,
        };

        let mismatched_fields = match load_expected(&self.config.expected_dir, id) {
            Ok(Some(outcome)) => {
                let mut fields = iso16_core::compare(&result, &outcome);
                if !canonical.matches_hex(&outcome.tetra_seal) {
                    fields.push(MismatchField::TetraSeal);
                }
                fields
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                return Ok(VectorDetail {
                    actual: Some(actual),
                    ..VectorDetail::failed(id, FailureReason::LoadError, expected).with_message(err.to_string())
                });
            }
        };

        let reason = if actual != expected {
            Some(FailureReason::SealMismatch)
        } else if !mismatched_fields.is_empty() {
            Some(FailureReason::FieldMismatch)
        } else {
            None
        };
        debug!(vector_id = id, actual = actual.as_str(), ?mismatched_fields, "vector checked");

        Ok(VectorDetail {
            vector_id: id.to_owned(),
            status: if reason.is_some() {
                VectorStatus::Fail
            } else {
                VectorStatus::Pass
            },
            reason,
            message: None,
            mismatched_fields,
            expected,
            actual: Some(actual),
            elapsed_seconds: Some(started.elapsed().as_secs_f64()),
        })
    }

    /// Run the cycle engine, capturing a VCD trace when configured.
    fn run_engine(
        &self,
        vector: &ConformanceVector,
    ) -> Result<(CycleResultRecord, Option<String>), iso16_engine::EngineError> {
        if self.config.write_vcd {
            let mut sink = VcdSink::new(&Utc::now().to_rfc2822());
            let record = run_vector(vector, &mut sink)?;
            Ok((record, Some(sink.finish())))
        } else {
            let record = run_vector(vector, &mut TracingSink)?;
            Ok((record, None))
        }
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        self.config.results_dir.join(file_name)
    }

    fn write_json(&self, file_name: &str, value: &impl Serialize) -> Result<(), RunnerError> {
        let path = self.output_path(file_name);
        let json = serde_json::to_string_pretty(value).map_err(|source| RunnerError::Encode {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| RunnerError::Write { path, source })
    }

    fn write_text(&self, file_name: &str, text: &str) -> Result<(), RunnerError> {
        let path = self.output_path(file_name);
        std::fs::write(&path, text).map_err(|source| RunnerError::Write { path, source })
    }
}

/// The raw `expected_seal` of a parsed document, or empty.
fn document_seal(document: &Value) -> &str {
    document.get("expected_seal").and_then(Value::as_str).unwrap_or_default()
}
