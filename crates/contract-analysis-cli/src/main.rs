//! Contract Analysis CLI
//!
//! The `contract-analysis` command runs external Solidity analyzers over the
//! project's contracts and stores their raw output.
//!
//! ## Commands
//!
//! - `mythril`: `myth analyze` each contract, failing on the first error
//! - `slither`: `slither` each contract, recording failures in the output

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contract_analysis_core::config::{default_contracts_dir, default_output_root};
use contract_analysis_core::{
    run_mythril, run_slither, AnalysisConfig, AnalysisReport, Tool, ToolCommand,
};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "contract-analysis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run Mythril and Slither static analysis", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines and a JSON run summary
    #[arg(long, global = true)]
    json: bool,

    /// Directory containing the Solidity sources
    #[arg(long, global = true, env = "CONTRACT_ANALYSIS_CONTRACTS_DIR")]
    contracts_dir: Option<PathBuf>,

    /// Root directory for analysis output (default: ./output)
    #[arg(long, global = true, env = "CONTRACT_ANALYSIS_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Mythril executable (default: myth)
    #[arg(long, global = true, env = "MYTHRIL_BIN")]
    mythril_bin: Option<PathBuf>,

    /// Slither executable (default: slither)
    #[arg(long, global = true, env = "SLITHER_BIN")]
    slither_bin: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run Mythril on each contract
    Mythril {
        /// Run on specific files
        #[arg(short, long = "files")]
        files: Vec<String>,
    },

    /// Run Slither on each contract
    Slither {
        /// Run on specific files
        #[arg(short, long = "files")]
        files: Vec<String>,

        /// Comma separated list of printers
        #[arg(short, long, default_value = "")]
        printers: String,
    },
}

impl Cli {
    fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            contracts_dir: self
                .contracts_dir
                .clone()
                .unwrap_or_else(default_contracts_dir),
            output_root: self.output_dir.clone().unwrap_or_else(default_output_root),
            mythril: tool_command(Tool::Mythril, self.mythril_bin.as_ref()),
            slither: tool_command(Tool::Slither, self.slither_bin.as_ref()),
        }
    }
}

fn tool_command(tool: Tool, program: Option<&PathBuf>) -> ToolCommand {
    program
        .map(ToolCommand::new)
        .unwrap_or_else(|| ToolCommand::default_for(tool))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    contract_analysis_core::init_tracing(cli.json, level);

    let config = cli.config();

    let report = match &cli.command {
        Commands::Mythril { files } => run_mythril(&config, files.as_slice())
            .await
            .context("Mythril analysis failed")?,
        Commands::Slither { files, printers } => {
            run_slither(&config, files.as_slice(), Some(printers.as_str()))
                .await
                .context("Slither analysis failed")?
        }
    };

    print_report(&report, cli.json)
}

fn print_report(report: &AnalysisReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("Tool: {}", report.tool);
    println!("Duration: {}ms", report.duration_ms);
    println!();

    for run in &report.runs {
        let status = if run.success { "✓" } else { "✗" };
        let exit_code = run
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        println!(
            "  {} {} ({}ms, exit code: {}) -> {}",
            status,
            run.contract,
            run.duration_ms,
            exit_code,
            run.output_path.display()
        );
    }

    println!();
    match report.tool {
        Tool::Mythril => println!("Summary: {} contracts analyzed", report.runs.len()),
        Tool::Slither => println!(
            "Summary: {}/{} contracts exited cleanly",
            report.passed_count(),
            report.runs.len()
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mythril_without_files() {
        let cli = Cli::try_parse_from(["contract-analysis", "mythril"]).unwrap();
        match cli.command {
            Commands::Mythril { files } => assert!(files.is_empty()),
            _ => panic!("expected mythril"),
        }
    }

    #[test]
    fn test_mythril_repeatable_files() {
        let cli = Cli::try_parse_from([
            "contract-analysis",
            "mythril",
            "-f",
            "Ownable.sol",
            "--files",
            "Moderator.sol",
        ])
        .unwrap();
        match cli.command {
            Commands::Mythril { files } => {
                assert_eq!(files, vec!["Ownable.sol", "Moderator.sol"])
            }
            _ => panic!("expected mythril"),
        }
    }

    #[test]
    fn test_slither_printers() {
        let cli = Cli::try_parse_from([
            "contract-analysis",
            "slither",
            "-f",
            "Ownable.sol",
            "-p",
            "human-summary,contract-summary",
        ])
        .unwrap();
        match cli.command {
            Commands::Slither { files, printers } => {
                assert_eq!(files, vec!["Ownable.sol"]);
                assert_eq!(printers, "human-summary,contract-summary");
            }
            _ => panic!("expected slither"),
        }
    }

    #[test]
    fn test_slither_printers_default_empty() {
        let cli = Cli::try_parse_from(["contract-analysis", "slither"]).unwrap();
        match cli.command {
            Commands::Slither { files, printers } => {
                assert!(files.is_empty());
                assert!(printers.is_empty());
            }
            _ => panic!("expected slither"),
        }
    }

    #[test]
    fn test_global_overrides_build_config() {
        let cli = Cli::try_parse_from([
            "contract-analysis",
            "slither",
            "--contracts-dir",
            "/repo/contracts",
            "--output-dir",
            "/tmp/analysis",
            "--slither-bin",
            "/opt/slither",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.contracts_dir, PathBuf::from("/repo/contracts"));
        assert_eq!(
            config.output_dir(Tool::Slither),
            PathBuf::from("/tmp/analysis/slither")
        );
        assert_eq!(config.slither.program, PathBuf::from("/opt/slither"));
    }

    #[test]
    fn test_tool_command_falls_back_to_default_program() {
        assert_eq!(
            tool_command(Tool::Mythril, None),
            ToolCommand::default_for(Tool::Mythril)
        );
        let custom = PathBuf::from("/opt/myth");
        assert_eq!(
            tool_command(Tool::Mythril, Some(&custom)).program,
            custom
        );
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["contract-analysis", "manticore"]).is_err());
    }
}
