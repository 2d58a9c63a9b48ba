//! Vector discovery and loading.

use std::path::{Component, Path, PathBuf};

use iso16_types::{ConformanceVector, ExpectedOutcome};
use serde_json::Value;

/// Errors reading vectors or expected outcomes from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A file is not valid JSON, or does not match the expected shape.
    #[error("failed to decode {}: {source}", path.display())]
    Json {
        /// The path being decoded.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The vector's id cannot be used to name its output files.
    #[error("vector_id {vector_id:?} in {} is not a plain file name", path.display())]
    InvalidVectorId {
        /// The vector file.
        path: PathBuf,
        /// The offending id.
        vector_id: String,
    },
}

/// List `V*.json` files in `dir`, sorted by file name.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the directory cannot be listed.
pub fn discover_vectors(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && is_vector_file_name(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn is_vector_file_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with('V')
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Read and parse a JSON document.
///
/// # Errors
///
/// Returns [`LoadError::Io`] or [`LoadError::Json`].
pub fn read_document(path: &Path) -> Result<Value, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a vector from a parsed document.
///
/// A missing or empty `vector_id` falls back to the file stem of `path`.
///
/// # Errors
///
/// Returns [`LoadError::Json`] if the document does not describe a valid
/// vector (wrong face count, bad nonce, duplicate plugin keys, etc.), and
/// [`LoadError::InvalidVectorId`] if the id is not a single path component.
pub fn vector_from_document(document: Value, path: &Path) -> Result<ConformanceVector, LoadError> {
    let mut vector: ConformanceVector = serde_json::from_value(document).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if vector.vector_id.is_empty() {
        vector.vector_id = file_stem(path);
    }
    if !is_plain_file_name(&vector.vector_id) {
        return Err(LoadError::InvalidVectorId {
            path: path.to_path_buf(),
            vector_id: vector.vector_id,
        });
    }
    Ok(vector)
}

/// Whether `name` is one normal path component with no separators.
///
/// Output files are named after the vector id, so the id must not be able
/// to leave the results directory.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}

/// Read a vector file.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or decoded.
pub fn load_vector(path: &Path) -> Result<ConformanceVector, LoadError> {
    vector_from_document(read_document(path)?, path)
}

/// Path of the expected-outcome file for `vector_id`.
pub fn expected_path(expected_dir: &Path, vector_id: &str) -> PathBuf {
    expected_dir.join(format!("{vector_id}_expected.json"))
}

/// Load `<expected_dir>/<vector_id>_expected.json` if it exists.
///
/// # Errors
///
/// Returns [`LoadError`] if the file exists but cannot be read or decoded.
pub fn load_expected(expected_dir: &Path, vector_id: &str) -> Result<Option<ExpectedOutcome>, LoadError> {
    let path = expected_path(expected_dir, vector_id);
    if !path.is_file() {
        return Ok(None);
    }
    let document = read_document(&path)?;
    serde_json::from_value(document)
        .map(Some)
        .map_err(|source| LoadError::Json { path, source })
}

/// The file stem of `path` as an owned string, or empty.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
