//! Command-line entry point for the ISO-16 conformance suite.
//!
//! Loads `iso16-config.yaml` (or the file given with `--config`), applies
//! command-line overrides, runs the suite, and prints a summary table.
//!
//! Exit status is 0 when every vector passes, 1 when any vector fails or the
//! suite cannot run, and 2 when the configuration cannot be loaded.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use iso16_runner::{FailureReason, LoggingConfig, RunnerConfig, SealMode, SuiteReport, run_suite};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG: &str = "iso16-config.yaml";

/// Run ISO-16 conformance vectors and verify their seals.
#[derive(Debug, Parser)]
#[command(name = "iso16-runner", version, about)]
struct Cli {
    /// Configuration file [default: iso16-config.yaml if present].
    #[arg(short, long, env = "ISO16_CONFIG")]
    config: Option<PathBuf>,

    /// Directory containing `V*.json` vectors.
    #[arg(long)]
    vectors: Option<PathBuf>,

    /// Directory receiving results and the report.
    #[arg(long)]
    results: Option<PathBuf>,

    /// Directory containing `<vector_id>_expected.json` files.
    #[arg(long)]
    expected: Option<PathBuf>,

    /// Schema every vector is validated against.
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Stop after the first failing vector.
    #[arg(long)]
    strict: bool,

    /// Seal compared against `expected_seal`.
    #[arg(long, value_enum)]
    seal_mode: Option<SealMode>,

    /// Write a VCD waveform per vector.
    #[arg(long)]
    vcd: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(self, config: &mut RunnerConfig) {
        let suite = &mut config.suite;
        if let Some(dir) = self.vectors {
            suite.vectors_dir = dir;
        }
        if let Some(dir) = self.results {
            suite.results_dir = dir;
        }
        if let Some(dir) = self.expected {
            suite.expected_dir = dir;
        }
        if let Some(path) = self.schema {
            suite.schema_path = Some(path);
        }
        if let Some(mode) = self.seal_mode {
            suite.seal_mode = mode;
        }
        suite.strict |= self.strict;
        suite.write_vcd |= self.vcd;
    }
}

/// Application entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("iso16-runner: {err:#}");
            return ExitCode::from(2);
        }
    };
    cli.apply(&mut config);
    init_tracing(&config.logging);

    info!(
        vectors_dir = %config.suite.vectors_dir.display(),
        results_dir = %config.suite.results_dir.display(),
        seal_mode = %config.suite.seal_mode,
        "configuration loaded"
    );

    match run_suite(&config.suite).context("conformance suite failed") {
        Ok(report) => {
            print_summary(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!("suite aborted: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load the explicit config file, else the default file if it exists, else
/// built-in defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<RunnerConfig> {
    if let Some(path) = explicit {
        return RunnerConfig::from_file(path).with_context(|| format!("loading {}", path.display()));
    }
    let default = Path::new(DEFAULT_CONFIG);
    if default.is_file() {
        RunnerConfig::from_file(default).with_context(|| format!("loading {DEFAULT_CONFIG}"))
    } else {
        RunnerConfig::parse("").context("applying default configuration")
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_summary(report: &SuiteReport) {
    println!("{:<24} {:<6} {:<30} ACTUAL", "VECTOR", "STATUS", "REASON");
    for detail in &report.details {
        let status = if detail.passed() { "PASS" } else { "FAIL" };
        let reason = detail.reason.map_or("", FailureReason::as_str);
        let actual = detail.actual.as_deref().unwrap_or("-");
        println!("{:<24} {status:<6} {reason:<30} {actual}", detail.vector_id);
    }
    println!(
        "\n{} passed, {} failed, {} total",
        report.summary.pass, report.summary.fail, report.summary.total
    );
}
