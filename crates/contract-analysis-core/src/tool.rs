//! External analyzer definitions and argument construction.

use crate::config::ToolCommand;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Slither detector excluded from every run.
pub const SLITHER_EXCLUDED_DETECTOR: &str = "solc-version";

/// Supported analyzers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// `myth analyze <path>`
    Mythril,

    /// `slither <path> --exclude solc-version [--print <printers>]`
    Slither,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Mythril => "mythril",
            Tool::Slither => "slither",
        }
    }

    /// Directory under the output root that receives this tool's files.
    pub fn output_subdir(&self) -> &'static str {
        self.name()
    }

    /// Executable looked up on `PATH` when none is configured.
    pub fn default_program(&self) -> &'static str {
        match self {
            Tool::Mythril => "myth",
            Tool::Slither => "slither",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully built command line for one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub tool: Tool,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ToolInvocation {
    fn start(tool: Tool, command: &ToolCommand) -> Self {
        Self {
            tool,
            program: command.program.clone(),
            args: command.prefix_args.iter().map(OsString::from).collect(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// `myth analyze <source>`
    pub fn mythril(command: &ToolCommand, source: &Path) -> Self {
        Self::start(Tool::Mythril, command)
            .arg("analyze")
            .arg(source)
    }

    /// `slither <source> --exclude solc-version`, plus `--print <printers>`
    /// when `printers` is non-empty.
    pub fn slither(command: &ToolCommand, source: &Path, printers: Option<&str>) -> Self {
        let invocation = Self::start(Tool::Slither, command)
            .arg(source)
            .arg("--exclude")
            .arg(SLITHER_EXCLUDED_DETECTOR);

        match printers {
            Some(printers) if !printers.is_empty() => invocation.arg("--print").arg(printers),
            _ => invocation,
        }
    }

    /// Space-joined command line for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Build a tokio command for this invocation.
    pub(crate) fn command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}
