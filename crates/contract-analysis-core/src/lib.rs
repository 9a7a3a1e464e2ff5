//! Contract Analysis - Mythril and Slither orchestration
//!
//! Runs the two external Solidity analyzers over a list of contract
//! sources and writes each tool's raw output to disk:
//! - Resolves contract names against the contracts directory
//! - Builds tool argument lists explicitly
//! - Executes one child process at a time and persists its output

pub mod config;
pub mod error;
pub mod output;
pub mod runner;
pub mod targets;
pub mod telemetry;
pub mod tool;

// Re-export key types
pub use config::{AnalysisConfig, ToolCommand};
pub use error::{AnalysisError, Result};
pub use output::{ensure_output_dir, output_file_for};
pub use runner::{run_mythril, run_slither, AnalysisReport, ContractRun};
pub use targets::{resolve_targets, ContractTarget, DEFAULT_CONTRACTS};
pub use telemetry::init_tracing;
pub use tool::{Tool, ToolInvocation};
