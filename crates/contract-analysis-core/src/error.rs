//! Error types for contract analysis runs

use crate::tool::Tool;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed on {contract} (exit code: {}):\n{output}", format_exit_code(*exit_code))]
    ToolFailed {
        tool: Tool,
        contract: String,
        exit_code: Option<i32>,
        output: String,
    },
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

fn format_exit_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

/// Result type for contract analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failed_message_carries_output() {
        let err = AnalysisError::ToolFailed {
            tool: Tool::Mythril,
            contract: "Ownable.sol".to_string(),
            exit_code: Some(1),
            output: "==== Unprotected Selfdestruct ====".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mythril failed on Ownable.sol"));
        assert!(msg.contains("exit code: 1"));
        assert!(msg.contains("Unprotected Selfdestruct"));
    }

    #[test]
    fn tool_failed_without_code_reports_signal() {
        let err = AnalysisError::ToolFailed {
            tool: Tool::Mythril,
            contract: "Moderator.sol".to_string(),
            exit_code: None,
            output: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
