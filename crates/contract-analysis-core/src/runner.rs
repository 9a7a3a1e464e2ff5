//! Sequential analyzer execution.
//!
//! Each contract is processed to completion before the next begins. The two
//! tools report failure differently: Mythril aborts the run on the first
//! non-zero exit, while Slither's exit status is recorded but never fails
//! the run.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::output::{ensure_output_dir, output_file_for};
use crate::targets::{self, resolve_targets, ContractTarget};
use crate::tool::{Tool, ToolInvocation};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of analyzing one contract.
#[derive(Debug, Clone, Serialize)]
pub struct ContractRun {
    /// Contract filename.
    pub contract: String,

    /// Resolved source path handed to the tool.
    pub source_path: PathBuf,

    /// File holding the tool's output.
    pub output_path: PathBuf,

    /// Exit code, `None` if terminated by a signal.
    pub exit_code: Option<i32>,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the tool exited successfully.
    pub success: bool,
}

/// Outcome of a complete run over all selected contracts.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub tool: Tool,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub runs: Vec<ContractRun>,
}

impl AnalysisReport {
    fn new(tool: Tool) -> Self {
        Self {
            tool,
            started_at: Utc::now(),
            duration_ms: 0,
            runs: Vec::new(),
        }
    }

    /// Number of contracts whose tool exited zero.
    pub fn passed_count(&self) -> usize {
        self.runs.iter().filter(|r| r.success).count()
    }

    /// Number of contracts whose tool exited non-zero.
    pub fn failed_count(&self) -> usize {
        self.runs.iter().filter(|r| !r.success).count()
    }
}

/// Prepare the output directory and resolve targets for `tool`.
fn prepare<S: AsRef<str>>(
    config: &AnalysisConfig,
    tool: Tool,
    files: &[S],
) -> Result<(PathBuf, Vec<ContractTarget>)> {
    let out_dir = config.output_dir(tool);
    ensure_output_dir(&out_dir)?;
    Ok((out_dir, resolve_targets(&config.contracts_dir, files)))
}

/// Output file for `contract`, with any directories implied by a nested
/// contract name created.
fn prepare_output_file(out_dir: &Path, contract: &str) -> Result<PathBuf> {
    let output_path = output_file_for(out_dir, contract);
    if let Some(parent) = output_path.parent() {
        ensure_output_dir(parent)?;
    }
    Ok(output_path)
}

fn spawn_error(invocation: &ToolInvocation, source: std::io::Error) -> AnalysisError {
    AnalysisError::Spawn {
        program: invocation.program.display().to_string(),
        source,
    }
}

/// Run `myth analyze` over each selected contract.
///
/// Stdout is captured and written to `<output>/mythril/<name>.txt`; stderr
/// goes to the terminal. The first non-zero exit stops the run with
/// [`AnalysisError::ToolFailed`] carrying the captured stdout, and no
/// output file is written for that contract or any after it.
pub async fn run_mythril<S: AsRef<str>>(
    config: &AnalysisConfig,
    files: &[S],
) -> Result<AnalysisReport> {
    let start = Instant::now();
    let mut report = AnalysisReport::new(Tool::Mythril);
    let (out_dir, contracts) = prepare(config, Tool::Mythril, files)?;

    info!(contracts = ?targets::names(&contracts), "Mythril: analyzing");

    for target in contracts {
        info!(contract = %target.name, path = %target.path.display(), "Analyzing contract");

        let invocation =
            ToolInvocation::mythril(config.command_for(Tool::Mythril), &target.path);
        debug!(command = %invocation.command_line(), "Spawning mythril");

        let stage_start = Instant::now();
        let child = invocation
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| spawn_error(&invocation, e))?;
        let output = child
            .wait_with_output()
            .await
            .map_err(|e| spawn_error(&invocation, e))?;

        if !output.status.success() {
            return Err(AnalysisError::ToolFailed {
                tool: Tool::Mythril,
                contract: target.name,
                exit_code: output.status.code(),
                output: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        let output_path = prepare_output_file(&out_dir, &target.name)?;
        tokio::fs::write(&output_path, &output.stdout)
            .await
            .map_err(|e| AnalysisError::io(&output_path, e))?;

        report.runs.push(ContractRun {
            contract: target.name,
            source_path: target.path,
            output_path,
            exit_code: output.status.code(),
            duration_ms: stage_start.elapsed().as_millis() as u64,
            success: true,
        });
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(passed = report.passed_count(), "Mythril: run complete");
    Ok(report)
}

/// Run `slither` over each selected contract.
///
/// The output file is created before the child starts and receives both
/// its stdout and stderr as they are written. A non-zero exit status is
/// recorded in the report and logged, but never returned as an error.
pub async fn run_slither<S: AsRef<str>>(
    config: &AnalysisConfig,
    files: &[S],
    printers: Option<&str>,
) -> Result<AnalysisReport> {
    let start = Instant::now();
    let mut report = AnalysisReport::new(Tool::Slither);
    let (out_dir, contracts) = prepare(config, Tool::Slither, files)?;

    info!(
        paths = ?targets::paths(&contracts),
        printers = printers.unwrap_or_default(),
        "Slither: analyzing"
    );

    for target in contracts {
        let output_path = prepare_output_file(&out_dir, &target.name)?;
        let stdout = tokio::fs::File::create(&output_path)
            .await
            .map_err(|e| AnalysisError::io(&output_path, e))?
            .into_std()
            .await;
        let stderr = stdout
            .try_clone()
            .map_err(|e| AnalysisError::io(&output_path, e))?;

        let invocation =
            ToolInvocation::slither(config.command_for(Tool::Slither), &target.path, printers);
        debug!(command = %invocation.command_line(), "Spawning slither");

        let stage_start = Instant::now();
        let status = invocation
            .command()
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .await
            .map_err(|e| spawn_error(&invocation, e))?;

        if !status.success() {
            warn!(
                contract = %target.name,
                exit_code = ?status.code(),
                output = %output_path.display(),
                "Slither exited non-zero; see output file"
            );
        }

        report.runs.push(ContractRun {
            contract: target.name,
            source_path: target.path,
            output_path,
            exit_code: status.code(),
            duration_ms: stage_start.elapsed().as_millis() as u64,
            success: status.success(),
        });
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        passed = report.passed_count(),
        failed = report.failed_count(),
        "Slither: run complete"
    );
    Ok(report)
}
