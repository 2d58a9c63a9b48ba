//! Structural validation gate.
//!
//! Vectors are checked against a JSON Schema document before they reach the
//! core. Schemas are compiled with `jsonschema`, which picks the draft from
//! the schema's `$schema` keyword.
//!
//! Compiled schemas are held in a [`SchemaCache`] owned by the [`Validator`],
//! keyed by absolute path, so a suite run compiles each schema once.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

/// Location reported for a violation at the document root.
const ROOT_LOCATION: &str = "<root>";

/// Errors from the validation gate.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The schema file could not be read.
    #[error("failed to read schema {}: {source}", path.display())]
    Io {
        /// Schema path as given.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("failed to parse schema {}: {source}", path.display())]
    Parse {
        /// Schema path as given.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The schema file is JSON but not a usable JSON Schema.
    #[error("invalid schema {}: {message}", path.display())]
    Compile {
        /// Schema path as given.
        path: PathBuf,
        /// The compiler's description of the problem.
        message: String,
    },

    /// The document does not satisfy the schema.
    #[error("schema validation failed:\n  {}", issues.join("\n  "))]
    Invalid {
        /// One `location: message` line per violation, sorted by location.
        issues: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Schema cache
// ---------------------------------------------------------------------------

/// Read-through cache of compiled schemas.
#[derive(Default)]
pub struct SchemaCache {
    schemas: HashMap<PathBuf, jsonschema::Validator>,
}

impl core::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("schemas", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Return the compiled schema at `path`, reading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Io`], [`ValidationError::Parse`] or
    /// [`ValidationError::Compile`] if the schema cannot be loaded. Failures
    /// are not cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<&jsonschema::Validator, ValidationError> {
        let key = std::path::absolute(path).map_err(|source| ValidationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match self.schemas.entry(key) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let text = std::fs::read_to_string(entry.key()).map_err(|source| ValidationError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let schema: Value = serde_json::from_str(&text).map_err(|source| ValidationError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
                let compiled = jsonschema::validator_for(&schema).map_err(|err| ValidationError::Compile {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                })?;
                debug!(schema = %entry.key().display(), "schema compiled");
                Ok(entry.insert(compiled))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Validates documents against schema files.
#[derive(Debug, Default)]
pub struct Validator {
    cache: SchemaCache,
}

impl Validator {
    /// Create a validator with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The schema cache.
    pub const fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Check `document` against the schema at `schema_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Invalid`] listing every violation, or a
    /// load error if the schema itself is unusable.
    pub fn validate(&mut self, document: &Value, schema_path: &Path) -> Result<(), ValidationError> {
        let schema = self.cache.get_or_load(schema_path)?;
        let issues = check_document(document, schema);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid { issues })
        }
    }
}

/// Collect every violation of `schema` by `document` as `location: message`
/// lines, sorted by location.
///
/// A location is the dotted instance path (`initial_phase_state.3.0`), or
/// `<root>` for the document itself.
pub fn check_document(document: &Value, schema: &jsonschema::Validator) -> Vec<String> {
    let mut issues: Vec<(String, String)> = schema
        .iter_errors(document)
        .map(|err| (dotted_location(&err.instance_path.to_string()), err.to_string()))
        .collect();
    issues.sort_by(|a, b| a.0.cmp(&b.0));
    issues
        .into_iter()
        .map(|(location, message)| format!("{location}: {message}"))
        .collect()
}

/// Turn a JSON pointer (`/a/0`) into a dotted path (`a.0`).
fn dotted_location(pointer: &str) -> String {
    let path = pointer.trim_start_matches('/');
    if path.is_empty() {
        ROOT_LOCATION.to_owned()
    } else {
        path.split('/')
            .map(|token| token.replace("~1", "/").replace("~0", "~"))
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["initial_phase_state", "expected_seal"],
            "properties": {
                "initial_phase_state": {
                    "type": "array",
                    "minItems": 16,
                    "items": {"type": "array", "items": {"type": "integer"}}
                },
                "timestamp": {"type": "integer"},
                "nonce": {"type": "string", "pattern": "^[0-9a-f]{32}$"},
                "expected_seal": {"type": "string", "minLength": 64},
                "implementation_id": {"enum": ["iso16-ref"]}
            }
        })
    }

    fn compiled() -> jsonschema::Validator {
        jsonschema::validator_for(&schema()).unwrap()
    }

    fn faces() -> Value {
        json!(vec![[0, 0, 0]; 16])
    }

    fn has_issue_at(issues: &[String], location: &str) -> bool {
        issues.iter().any(|issue| issue.starts_with(&format!("{location}: ")))
    }

    #[test]
    fn conforming_document_passes() {
        let doc = json!({"initial_phase_state": faces(), "expected_seal": "0".repeat(64), "timestamp": 5});
        assert!(check_document(&doc, &compiled()).is_empty());
    }

    #[test]
    fn missing_required_keys_are_reported_at_the_root() {
        let issues = check_document(&json!({}), &compiled());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.starts_with("<root>: ")));
        assert!(issues.iter().any(|i| i.contains("initial_phase_state")));
        assert!(issues.iter().any(|i| i.contains("expected_seal")));
    }

    #[test]
    fn wrong_root_type_is_reported() {
        let issues = check_document(&json!([1, 2]), &compiled());
        assert!(has_issue_at(&issues, "<root>"));
    }

    #[test]
    fn nested_keywords_are_enforced() {
        let doc = json!({
            "initial_phase_state": [["x"]],
            "nonce": "zz",
            "expected_seal": "abc",
            "implementation_id": "other",
            "timestamp": 1.5,
        });
        let issues = check_document(&doc, &compiled());
        for location in [
            "initial_phase_state",
            "initial_phase_state.0.0",
            "nonce",
            "expected_seal",
            "implementation_id",
            "timestamp",
        ] {
            assert!(has_issue_at(&issues, location), "no issue at {location}: {issues:?}");
        }
    }

    #[test]
    fn issues_are_sorted_by_location() {
        let doc = json!({"timestamp": "late", "nonce": 7, "initial_phase_state": faces()});
        let issues = check_document(&doc, &compiled());
        let locations: Vec<&str> = issues.iter().filter_map(|i| i.split(": ").next()).collect();
        let mut sorted = locations.clone();
        sorted.sort_unstable();
        assert_eq!(locations, sorted);
        assert_eq!(locations.first(), Some(&"<root>"));
    }

    #[test]
    fn pointer_becomes_dotted_path() {
        assert_eq!(dotted_location(""), "<root>");
        assert_eq!(dotted_location("/initial_phase_state/3/0"), "initial_phase_state.3.0");
        assert_eq!(dotted_location("/plugins/a~1b"), "plugins.a/b");
    }

    #[test]
    fn cache_reads_each_schema_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, schema().to_string()).unwrap();

        let mut validator = Validator::new();
        let doc = json!({"initial_phase_state": faces(), "expected_seal": "0".repeat(64)});
        validator.validate(&doc, &path).unwrap();
        // Removing the file proves the second call is served from the cache.
        std::fs::remove_file(&path).unwrap();
        validator.validate(&doc, &path).unwrap();
        assert_eq!(validator.cache().len(), 1);
    }

    #[test]
    fn invalid_document_is_an_invalid_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, schema().to_string()).unwrap();
        let err = Validator::new().validate(&json!({"nonce": "zz"}), &path).unwrap_err();
        let issues = match err {
            ValidationError::Invalid { issues } => issues,
            _ => Vec::new(),
        };
        assert!(has_issue_at(&issues, "nonce"));
    }

    #[test]
    fn unparseable_schema_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = Validator::new().validate(&json!({}), &path).unwrap_err();
        assert!(matches!(err, ValidationError::Parse { .. }));
    }

    #[test]
    fn malformed_schema_is_a_compile_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_schema.json");
        std::fs::write(&path, r#"{"type": 12}"#).unwrap();
        let mut validator = Validator::new();
        let err = validator.validate(&json!({}), &path).unwrap_err();
        assert!(matches!(err, ValidationError::Compile { .. }));
        assert!(validator.cache().is_empty());
    }
}
