//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - Service calls and the UI loop never block the runtime thread
//! - Only the view-model writes session state
//! - The terminal surface stays a thin client (no transport of its own)
//!
//! The helpers below walk workspace sources; the rules live under `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (two levels above this crate)
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// One production source line
#[derive(Debug)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line text with any trailing `//` comment removed
    pub code: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.number, self.code.trim())
    }
}

/// All `.rs` files under `dir` (relative to the workspace root)
#[must_use]
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Production lines of a file: everything before its `#[cfg(test)]` module,
/// skipping comment-only lines
#[must_use]
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .filter_map(|(idx, line)| {
            let code = line.split("//").next().unwrap_or(line);
            if code.trim().is_empty() {
                return None;
            }
            Some(SourceLine {
                path: path.to_path_buf(),
                number: idx + 1,
                code: code.to_string(),
            })
        })
        .collect()
}

/// Production lines under `dirs` containing any of `patterns`
#[must_use]
pub fn find_violations(dirs: &[&str], patterns: &[&str]) -> Vec<SourceLine> {
    dirs.iter()
        .flat_map(|dir| rust_files(dir))
        .flat_map(|path| production_lines(&path))
        .filter(|line| patterns.iter().any(|p| line.code.contains(p)))
        .collect()
}

/// Print violations and fail the test if there are any
///
/// # Panics
///
/// Panics when `violations` is not empty.
pub fn assert_no_violations(rule: &str, violations: &[SourceLine]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {rule}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!(
        "\nFound {} violation(s) of: {rule}\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
        assert!(workspace_root().join("client/core/src/lib.rs").exists());
    }

    #[test]
    fn test_production_lines_stop_at_tests() {
        let lines = production_lines(&workspace_root().join("client/core/src/state.rs"));
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| !l.code.contains("mod tests")));
    }
}
