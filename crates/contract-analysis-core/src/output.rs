//! Output directory handling.

use crate::error::{AnalysisError, Result};
use crate::targets::join_under;
use std::path::{Path, PathBuf};

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| AnalysisError::io(dir, e))
}

/// `<dir>/<contract>.txt`, always under `dir`.
pub fn output_file_for(dir: &Path, contract: &str) -> PathBuf {
    join_under(dir, &format!("{contract}.txt"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_output_dir_creates_parents() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("output").join("mythril");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_output_dir_idempotent() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("output").join("slither");
        ensure_output_dir(&dir).unwrap();
        ensure_output_dir(&dir).unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path().join("output"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ensure_output_dir_fails_on_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, b"x").unwrap();
        let err = ensure_output_dir(&file.join("sub")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn test_output_file_for_absolute_name_stays_under_dir() {
        let path = output_file_for(Path::new("/tmp/out/slither"), "/home/u/notes");
        assert_eq!(path, PathBuf::from("/tmp/out/slither/home/u/notes.txt"));
    }

    #[test]
    fn test_output_file_keeps_sol_extension() {
        let path = output_file_for(Path::new("./output/mythril"), "Ownable.sol");
        assert_eq!(path, PathBuf::from("./output/mythril/Ownable.sol.txt"));
    }
}
