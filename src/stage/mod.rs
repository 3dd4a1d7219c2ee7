//! Header staging - installing the bundled copy into a distribution tree.
//!
//! Staging is the side effect of bundled resolution: the vendored headers
//! are copied under a destination root, filtered to the header pattern,
//! preserving their relative layout. System-mode builds stage nothing;
//! their headers already live in the host prefix.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

use crate::util::fs::ensure_dir;
use crate::util::shell::Shell;

/// One file scheduled for staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Outcome counts for a staging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    pub copied: usize,
    pub skipped: usize,
}

/// The staging plan: which headers go where.
#[derive(Debug, Clone, Default)]
pub struct StagePlan {
    entries: Vec<StageEntry>,
}

impl StagePlan {
    /// Walk `include_dir` and plan every file whose name matches
    /// `pattern` into `dest_root`, preserving relative structure.
    ///
    /// A missing include tree yields an empty plan.
    pub fn new(include_dir: &Path, dest_root: &Path, pattern: &str) -> Result<Self> {
        let matcher = Pattern::new(pattern)
            .with_context(|| format!("invalid header pattern: {}", pattern))?;

        let mut entries = Vec::new();

        if !include_dir.is_dir() {
            return Ok(StagePlan { entries });
        }

        for entry in WalkDir::new(include_dir).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("failed to walk {}", include_dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if !matcher.matches(&entry.file_name().to_string_lossy()) {
                continue;
            }

            let rel = entry.path().strip_prefix(include_dir).unwrap_or(entry.path());
            entries.push(StageEntry {
                source: entry.path().to_path_buf(),
                dest: dest_root.join(rel),
            });
        }

        Ok(StagePlan { entries })
    }

    /// Get the planned entries.
    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    /// Check if nothing is planned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of planned headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Copy the planned headers.
    ///
    /// Files already up to date are skipped unless `force`.
    pub fn execute(&self, shell: &Shell, force: bool) -> Result<StageReport> {
        let mut progress = shell.progress(self.entries.len() as u64, "staging headers");
        let mut report = StageReport::default();

        for entry in &self.entries {
            if !force && is_up_to_date(&entry.source, &entry.dest) {
                report.skipped += 1;
            } else {
                if let Some(parent) = entry.dest.parent() {
                    ensure_dir(parent)?;
                }
                fs::copy(&entry.source, &entry.dest).with_context(|| {
                    format!(
                        "failed to copy {} to {}",
                        entry.source.display(),
                        entry.dest.display()
                    )
                })?;
                report.copied += 1;
            }
            progress.inc(1);
        }

        progress.finish();
        Ok(report)
    }
}

/// A destination is up to date when it matches the source length and is
/// no older than it.
fn is_up_to_date(source: &Path, dest: &Path) -> bool {
    let (Ok(src), Ok(dst)) = (fs::metadata(source), fs::metadata(dest)) else {
        return false;
    };
    if src.len() != dst.len() {
        return false;
    }
    match (src.modified(), dst.modified()) {
        (Ok(src_time), Ok(dst_time)) => dst_time >= src_time,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn header_tree(root: &Path) -> PathBuf {
        let include = root.join("include");
        fs::create_dir_all(include.join("pybind11/detail")).unwrap();
        fs::write(include.join("pybind11/pybind11.h"), "// top\n").unwrap();
        fs::write(include.join("pybind11/detail/common.h"), "// detail\n").unwrap();
        fs::write(include.join("pybind11/notes.txt"), "not a header\n").unwrap();
        include
    }

    fn shell() -> Shell {
        Shell::from_flags(true, false, crate::util::shell::ColorChoice::Never, false)
    }

    #[test]
    fn test_plan_filters_to_header_pattern() {
        let tmp = TempDir::new().unwrap();
        let include = header_tree(tmp.path());
        let dest = tmp.path().join("dist");

        let plan = StagePlan::new(&include, &dest, "*.h").unwrap();

        assert_eq!(plan.len(), 2);
        assert!(plan
            .entries()
            .iter()
            .all(|e| e.dest.extension().is_some_and(|ext| ext == "h")));
    }

    #[test]
    fn test_plan_preserves_relative_structure() {
        let tmp = TempDir::new().unwrap();
        let include = header_tree(tmp.path());
        let dest = tmp.path().join("dist");

        let plan = StagePlan::new(&include, &dest, "*.h").unwrap();

        let dests: Vec<_> = plan.entries().iter().map(|e| e.dest.clone()).collect();
        assert!(dests.contains(&dest.join("pybind11/detail/common.h")));
        assert!(dests.contains(&dest.join("pybind11/pybind11.h")));
    }

    #[test]
    fn test_missing_tree_yields_empty_plan() {
        let tmp = TempDir::new().unwrap();
        let plan = StagePlan::new(
            &tmp.path().join("nonexistent"),
            &tmp.path().join("dist"),
            "*.h",
        )
        .unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_execute_copies_then_skips() {
        let tmp = TempDir::new().unwrap();
        let include = header_tree(tmp.path());
        let dest = tmp.path().join("dist");
        let plan = StagePlan::new(&include, &dest, "*.h").unwrap();
        let shell = shell();

        let report = plan.execute(&shell, false).unwrap();
        assert_eq!(report, StageReport { copied: 2, skipped: 0 });
        assert!(dest.join("pybind11/detail/common.h").is_file());
        assert!(!dest.join("pybind11/notes.txt").exists());

        // Second run finds everything up to date.
        let report = plan.execute(&shell, false).unwrap();
        assert_eq!(report, StageReport { copied: 0, skipped: 2 });

        // Force recopies.
        let report = plan.execute(&shell, true).unwrap();
        assert_eq!(report, StageReport { copied: 2, skipped: 0 });
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let tmp = TempDir::new().unwrap();
        assert!(StagePlan::new(tmp.path(), &tmp.path().join("dist"), "[").is_err());
    }
}
