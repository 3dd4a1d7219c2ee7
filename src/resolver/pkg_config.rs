//! Generic lookup via the pkg-config command line tool.

use std::path::{Path, PathBuf};

use anyhow::Result;
use semver::Version;

use crate::core::dependency::HeaderLib;
use crate::core::target::Provenance;
use crate::resolver::lookup::{Discovery, Lookup};
use crate::util::process::{find_pkg_config, ProcessBuilder};

/// Lookup that shells out to `pkg-config`.
///
/// A host without pkg-config is treated as "not found", not an error,
/// so the lookup sequence simply exhausts.
pub struct PkgConfigLookup {
    binary: Option<PathBuf>,
}

impl PkgConfigLookup {
    /// Locate pkg-config via the PKG_CONFIG override or PATH.
    pub fn from_env() -> Self {
        PkgConfigLookup {
            binary: find_pkg_config(),
        }
    }

    /// Use a specific pkg-config binary (or none).
    pub fn with_binary(binary: Option<PathBuf>) -> Self {
        PkgConfigLookup { binary }
    }

    fn query(&self, binary: &Path, lib: &HeaderLib) -> Result<Option<Discovery>> {
        let module = lib.pkg_config_name();

        let exists = ProcessBuilder::new(binary)
            .arg("--exists")
            .arg(module)
            .exec()?;
        if !exists.status.success() {
            return Ok(None);
        }

        let cflags = ProcessBuilder::new(binary)
            .arg("--cflags-only-I")
            .arg(module)
            .exec_and_check()?;
        let include_dirs = parse_include_flags(&String::from_utf8_lossy(&cflags.stdout));

        if include_dirs.is_empty() {
            // The module resolves but exposes no include dirs to bind;
            // let the sequence continue rather than emit an empty target.
            tracing::debug!("pkg-config knows `{}` but reported no include dirs", module);
            return Ok(None);
        }

        let version = ProcessBuilder::new(binary)
            .arg("--modversion")
            .arg(module)
            .exec()
            .ok()
            .filter(|output| output.status.success())
            .and_then(|output| {
                Version::parse(String::from_utf8_lossy(&output.stdout).trim()).ok()
            });

        Ok(Some(Discovery {
            include_dirs,
            version,
            provenance: Provenance::PkgConfig,
        }))
    }
}

impl Lookup for PkgConfigLookup {
    fn name(&self) -> &'static str {
        "pkg-config"
    }

    fn probe(&self, lib: &HeaderLib) -> Result<Option<Discovery>> {
        let Some(binary) = &self.binary else {
            tracing::debug!("pkg-config not found in PATH");
            return Ok(None);
        };
        self.query(binary, lib)
    }
}

/// Extract -I directories from pkg-config cflags output.
fn parse_include_flags(output: &str) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for part in output.split_whitespace() {
        if let Some(dir) = part.strip_prefix("-I") {
            if dir.is_empty() {
                continue;
            }
            let dir = PathBuf::from(dir);
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
    }
    dirs
}
