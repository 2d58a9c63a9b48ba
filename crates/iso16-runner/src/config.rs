//! Runner configuration.
//!
//! The configuration lives in `iso16-config.yaml`. Every field has a default,
//! so an empty or missing file yields a working setup that reads vectors from
//! `conformance/vectors` and writes results to `conformance_results`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`SuiteConfig::vectors_dir`].
pub const ENV_VECTORS_DIR: &str = "ISO16_VECTORS_DIR";

/// Environment variable overriding [`SuiteConfig::results_dir`].
pub const ENV_RESULTS_DIR: &str = "ISO16_RESULTS_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level runner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Suite inputs, outputs, and policy.
    #[serde(default)]
    pub suite: SuiteConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RunnerConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string and apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is null in YAML; treat it as all defaults.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.suite.apply_env_overrides();
        Ok(config)
    }
}

/// Which seal the suite compares against a vector's `expected_seal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SealMode {
    /// The Tetra-Seal over the canonical serialization.
    #[default]
    Canonical,
    /// The cycle seal produced by the cycle-accurate engine.
    Cycle,
}

impl core::fmt::Display for SealMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Canonical => "canonical",
            Self::Cycle => "cycle",
        })
    }
}

/// Suite inputs, outputs, and policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Directory scanned for `V*.json` vectors.
    #[serde(default = "default_vectors_dir")]
    pub vectors_dir: PathBuf,

    /// Directory holding optional `<vector_id>_expected.json` files.
    #[serde(default = "default_expected_dir")]
    pub expected_dir: PathBuf,

    /// Directory receiving per-vector results and the aggregate report.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Schema every vector is checked against before loading, if set.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Stop after the first failing vector.
    #[serde(default)]
    pub strict: bool,

    /// Which seal is compared against `expected_seal`.
    #[serde(default)]
    pub seal_mode: SealMode,

    /// Write a `<vector_id>.vcd` waveform per vector.
    #[serde(default)]
    pub write_vcd: bool,
}

impl SuiteConfig {
    /// Override directories with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override directories from an arbitrary variable lookup.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup(ENV_VECTORS_DIR) {
            self.vectors_dir = PathBuf::from(val);
        }
        if let Some(val) = lookup(ENV_RESULTS_DIR) {
            self.results_dir = PathBuf::from(val);
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            vectors_dir: default_vectors_dir(),
            expected_dir: default_expected_dir(),
            results_dir: default_results_dir(),
            schema_path: None,
            strict: false,
            seal_mode: SealMode::default(),
            write_vcd: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_vectors_dir() -> PathBuf {
    PathBuf::from("conformance/vectors")
}

fn default_expected_dir() -> PathBuf {
    PathBuf::from("conformance/expected")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("conformance_results")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.suite.vectors_dir, Path::new("conformance/vectors"));
        assert_eq!(config.suite.seal_mode, SealMode::Canonical);
        assert!(!config.suite.strict);
        assert!(config.suite.schema_path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
suite:
  vectors_dir: "vec"
  expected_dir: "exp"
  results_dir: "out"
  schema_path: "schema/vector_schema.json"
  strict: true
  seal_mode: cycle
  write_vcd: true
logging:
  level: "debug"
  json: true
"#;
        let mut config: RunnerConfig = serde_yml::from_str(yaml).unwrap();
        config.suite.apply_overrides_from(|_| None);
        assert_eq!(config.suite.expected_dir, Path::new("exp"));
        assert_eq!(config.suite.results_dir, Path::new("out"));
        assert_eq!(
            config.suite.schema_path.as_deref(),
            Some(Path::new("schema/vector_schema.json"))
        );
        assert!(config.suite.strict);
        assert!(config.suite.write_vcd);
        assert_eq!(config.suite.seal_mode, SealMode::Cycle);
        assert!(config.logging.json);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: RunnerConfig = serde_yml::from_str("suite:\n  strict: true\n").unwrap();
        assert!(config.suite.strict);
        assert_eq!(config.suite.results_dir, Path::new("conformance_results"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn env_overrides_replace_directories() {
        let mut suite = SuiteConfig::default();
        suite.apply_overrides_from(|key| match key {
            ENV_VECTORS_DIR => Some("/tmp/v".to_owned()),
            ENV_RESULTS_DIR => Some("/tmp/r".to_owned()),
            _ => None,
        });
        assert_eq!(suite.vectors_dir, Path::new("/tmp/v"));
        assert_eq!(suite.results_dir, Path::new("/tmp/r"));
        assert_eq!(suite.expected_dir, Path::new("conformance/expected"));
    }

    #[test]
    fn unknown_seal_mode_is_rejected() {
        assert!(serde_yml::from_str::<RunnerConfig>("suite:\n  seal_mode: fuzzy\n").is_err());
    }
}
