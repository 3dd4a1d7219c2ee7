//! Config-mode lookup: installed package metadata under known prefixes.
//!
//! Instead of parsing tool output, this lookup reads what a package
//! installation leaves on disk:
//!
//! ```text
//! <prefix>/
//! ├── include/<name>/<name>.h      # sentinel header
//! └── share/<name>/<name>.json     # metadata (version, include dirs)
//! ```
//!
//! Prefixes are probed in order: the `<NAME>_DIR` environment variable,
//! extra prefixes from configuration, `CONDA_PREFIX` when set, then
//! `/usr/local` and `/usr`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::dependency::HeaderLib;
use crate::core::target::Provenance;
use crate::resolver::lookup::{Discovery, Lookup};

/// Metadata a package installs alongside its headers.
#[derive(Debug, Deserialize)]
struct PackageInfo {
    #[serde(default)]
    version: Option<String>,
    #[serde(rename = "version-string", default)]
    version_string: Option<String>,
    #[serde(rename = "include-dirs", default)]
    include_dirs: Vec<PathBuf>,
}

impl PackageInfo {
    /// Get the version string from either version field.
    fn get_version(&self) -> Option<&str> {
        self.version.as_deref().or(self.version_string.as_deref())
    }
}

/// Lookup that reads installed package metadata directly from the
/// filesystem.
pub struct ConfigLookup {
    extra_prefixes: Vec<PathBuf>,
}

impl ConfigLookup {
    /// Create a config-mode lookup with extra prefixes from config.
    pub fn new(extra_prefixes: Vec<PathBuf>) -> Self {
        ConfigLookup { extra_prefixes }
    }

    /// Candidate prefixes in probe order.
    fn candidate_prefixes(&self, lib: &HeaderLib) -> Vec<PathBuf> {
        let mut prefixes = Vec::new();

        if let Some(root) = std::env::var_os(lib.root_env_var()) {
            prefixes.push(PathBuf::from(root));
        }

        prefixes.extend(self.extra_prefixes.iter().cloned());

        if let Some(conda) = std::env::var_os("CONDA_PREFIX") {
            prefixes.push(PathBuf::from(conda));
        }

        prefixes.push(PathBuf::from("/usr/local"));
        prefixes.push(PathBuf::from("/usr"));

        prefixes
    }

    /// Probe one prefix: metadata first, sentinel header as fallback.
    fn probe_prefix(&self, prefix: &Path, lib: &HeaderLib) -> Result<Option<Discovery>> {
        let include_dir = prefix.join("include");
        let metadata = prefix
            .join("share")
            .join(lib.name())
            .join(format!("{}.json", lib.name()));

        if metadata.is_file() {
            let contents = fs::read_to_string(&metadata)
                .with_context(|| format!("failed to read metadata: {}", metadata.display()))?;
            let info: PackageInfo = serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse metadata: {}", metadata.display()))?;

            let version = info.get_version().and_then(normalize_version);
            let include_dirs = if info.include_dirs.is_empty() {
                vec![include_dir]
            } else {
                info.include_dirs
                    .iter()
                    .map(|dir| {
                        if dir.is_absolute() {
                            dir.clone()
                        } else {
                            prefix.join(dir)
                        }
                    })
                    .collect()
            };

            tracing::debug!(
                "read metadata for `{}` at {}",
                lib.name(),
                metadata.display()
            );
            return Ok(Some(Discovery {
                include_dirs,
                version,
                provenance: Provenance::ConfigMode,
            }));
        }

        let sentinel = include_dir
            .join(lib.name())
            .join(format!("{}.h", lib.name()));
        if sentinel.is_file() {
            tracing::debug!("found sentinel header {}", sentinel.display());
            return Ok(Some(Discovery {
                include_dirs: vec![include_dir],
                version: None,
                provenance: Provenance::ConfigMode,
            }));
        }

        Ok(None)
    }
}

impl Lookup for ConfigLookup {
    fn name(&self) -> &'static str {
        "config-mode"
    }

    fn probe(&self, lib: &HeaderLib) -> Result<Option<Discovery>> {
        for prefix in self.candidate_prefixes(lib) {
            if !prefix.is_dir() {
                continue;
            }
            if let Some(discovery) = self.probe_prefix(&prefix, lib)? {
                return Ok(Some(discovery));
            }
        }
        Ok(None)
    }
}

/// Parse a version string, tolerating registry-style suffixes.
fn normalize_version(raw: &str) -> Option<Version> {
    let raw = raw.split('#').next().unwrap_or(raw);
    let raw = raw.split('+').next().unwrap_or(raw);
    if let Ok(version) = Version::parse(raw) {
        return Some(version);
    }

    // Pad out short forms like "2.12"
    let mut parts: Vec<&str> = raw.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    Version::parse(&parts.join(".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_metadata(prefix: &Path, name: &str, contents: &str) {
        let share = prefix.join("share").join(name);
        fs::create_dir_all(&share).unwrap();
        fs::write(share.join(format!("{}.json", name)), contents).unwrap();
    }

    #[test]
    fn test_probe_prefix_reads_metadata() {
        let tmp = TempDir::new().unwrap();
        let lib = HeaderLib::new("metalib");
        write_metadata(
            tmp.path(),
            "metalib",
            r#"{"version": "2.12.0", "include-dirs": ["include"]}"#,
        );

        let lookup = ConfigLookup::new(Vec::new());
        let discovery = lookup.probe_prefix(tmp.path(), &lib).unwrap().unwrap();

        assert_eq!(discovery.include_dirs, vec![tmp.path().join("include")]);
        assert_eq!(discovery.version, Some(Version::new(2, 12, 0)));
        assert_eq!(discovery.provenance, Provenance::ConfigMode);
    }

    #[test]
    fn test_probe_prefix_falls_back_to_sentinel_header() {
        let tmp = TempDir::new().unwrap();
        let lib = HeaderLib::new("hdrlib");
        let dir = tmp.path().join("include").join("hdrlib");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("hdrlib.h"), "// hdrlib\n").unwrap();

        let lookup = ConfigLookup::new(Vec::new());
        let discovery = lookup.probe_prefix(tmp.path(), &lib).unwrap().unwrap();

        assert_eq!(discovery.include_dirs, vec![tmp.path().join("include")]);
        assert_eq!(discovery.version, None);
    }

    #[test]
    fn test_probe_prefix_empty_prefix_finds_nothing() {
        let tmp = TempDir::new().unwrap();
        let lib = HeaderLib::new("nothere");

        let lookup = ConfigLookup::new(Vec::new());
        assert!(lookup.probe_prefix(tmp.path(), &lib).unwrap().is_none());
    }

    #[test]
    fn test_extra_prefix_is_probed() {
        let tmp = TempDir::new().unwrap();
        let lib = HeaderLib::new("extralib");
        write_metadata(tmp.path(), "extralib", r#"{"version": "1.0.0"}"#);

        let lookup = ConfigLookup::new(vec![tmp.path().to_path_buf()]);
        let discovery = lookup.probe(&lib).unwrap().unwrap();
        assert_eq!(discovery.version, Some(Version::new(1, 0, 0)));
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("2.12.0"), Some(Version::new(2, 12, 0)));
        assert_eq!(normalize_version("2.12"), Some(Version::new(2, 12, 0)));
        assert_eq!(normalize_version("2.12.0#1"), Some(Version::new(2, 12, 0)));
        assert_eq!(normalize_version("not a version"), None);
    }
}
