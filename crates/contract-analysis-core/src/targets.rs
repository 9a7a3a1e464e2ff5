//! Contract target resolution.

use std::path::{Component, Path, PathBuf};

/// Contracts analyzed when no files are named on the command line.
pub const DEFAULT_CONTRACTS: [&str; 10] = [
    "AccountManager.sol",
    "AccountStorage.sol",
    "Administrator.sol",
    "CampShareManager.sol",
    "CampShareStorage.sol",
    "CloneFactory.sol",
    "Moderator.sol",
    "Ownable.sol",
    "PLGProjectFactory.sol",
    "PLGProject.sol",
];

/// A contract filename and the source path it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractTarget {
    pub name: String,
    pub path: PathBuf,
}

impl ContractTarget {
    pub fn new(contracts_dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = join_under(contracts_dir, &name);
        Self { name, path }
    }
}

/// Append the normal components of `name` to `base`.
///
/// Root, prefix, `.` and `..` components are dropped, so the result always
/// stays under `base` even for absolute names.
pub(crate) fn join_under(base: &Path, name: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for component in Path::new(name).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}

/// Resolve the contracts to analyze.
///
/// An empty `explicit` list selects [`DEFAULT_CONTRACTS`]; otherwise the
/// supplied names are used verbatim and in order. Paths are not checked
/// for existence.
pub fn resolve_targets<S: AsRef<str>>(contracts_dir: &Path, explicit: &[S]) -> Vec<ContractTarget> {
    if explicit.is_empty() {
        DEFAULT_CONTRACTS
            .iter()
            .map(|name| ContractTarget::new(contracts_dir, *name))
            .collect()
    } else {
        explicit
            .iter()
            .map(|name| ContractTarget::new(contracts_dir, name.as_ref()))
            .collect()
    }
}

/// Names of `targets`, in order.
pub fn names(targets: &[ContractTarget]) -> Vec<&str> {
    targets.iter().map(|t| t.name.as_str()).collect()
}

/// Source paths of `targets`, in order.
pub fn paths(targets: &[ContractTarget]) -> Vec<&Path> {
    targets.iter().map(|t| t.path.as_path()).collect()
}
