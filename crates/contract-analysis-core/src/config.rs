//! Run configuration: where contracts live, where output goes, and which
//! executables to invoke.

use crate::tool::Tool;
use std::path::{Path, PathBuf};

/// An external executable plus any arguments placed before the
/// tool-specific ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Executable name or path.
    pub program: PathBuf,

    /// Leading arguments (e.g. a script path when `program` is a shell).
    pub prefix_args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Add leading arguments.
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Default command for a tool: `myth` or `slither` from `PATH`.
    pub fn default_for(tool: Tool) -> Self {
        Self::new(tool.default_program())
    }
}

/// Immutable settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Directory holding the Solidity sources.
    pub contracts_dir: PathBuf,

    /// Root under which per-tool output directories are created.
    pub output_root: PathBuf,

    /// Mythril command.
    pub mythril: ToolCommand,

    /// Slither command.
    pub slither: ToolCommand,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            contracts_dir: default_contracts_dir(),
            output_root: default_output_root(),
            mythril: ToolCommand::default_for(Tool::Mythril),
            slither: ToolCommand::default_for(Tool::Slither),
        }
    }
}

impl AnalysisConfig {
    pub fn with_contracts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.contracts_dir = dir.into();
        self
    }

    pub fn with_output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_root = dir.into();
        self
    }

    pub fn with_mythril(mut self, command: ToolCommand) -> Self {
        self.mythril = command;
        self
    }

    pub fn with_slither(mut self, command: ToolCommand) -> Self {
        self.slither = command;
        self
    }

    /// Command configured for `tool`.
    pub fn command_for(&self, tool: Tool) -> &ToolCommand {
        match tool {
            Tool::Mythril => &self.mythril,
            Tool::Slither => &self.slither,
        }
    }

    /// Output directory for `tool`: `<output_root>/<tool>`.
    pub fn output_dir(&self, tool: Tool) -> PathBuf {
        self.output_root.join(tool.output_subdir())
    }
}

/// Root of this tool's workspace.
pub fn tool_root() -> PathBuf {
    // crates/contract-analysis-core -> workspace root
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// `contracts/` in the repository one level above the tool root.
pub fn default_contracts_dir() -> PathBuf {
    let root = tool_root();
    root.parent().unwrap_or(&root).join("contracts")
}

/// `./output`, relative to the working directory.
pub fn default_output_root() -> PathBuf {
    PathBuf::from(".").join("output")
}
