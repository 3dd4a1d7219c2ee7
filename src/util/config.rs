//! Configuration file support for Headland.
//!
//! Headland supports two configuration file locations:
//! - Global: `~/.headland/config.toml` - User-wide defaults
//! - Project: `.headland/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::dependency::HeaderLib;
use crate::util::fs::read_to_string;

/// Headland configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolve: ResolveConfig,

    /// The header-only dependency this project wires up
    pub dependency: DependencyConfig,

    /// Host-language runtime settings
    pub runtime: RuntimeConfig,

    /// Header staging settings
    pub stage: StageConfig,
}

/// Resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Use the host-installed copy instead of the bundled one
    pub system: Option<bool>,

    /// Extra installation prefixes for the config-mode lookup
    pub prefixes: Vec<PathBuf>,
}

/// Dependency settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Library name (defaults to pybind11)
    pub name: Option<String>,

    /// Version requirement for discovered copies (e.g. "^2.12")
    pub version: Option<String>,

    /// pkg-config module name, when it differs from the library name
    pub pkg_config: Option<String>,

    /// Bundled copy location relative to the project root
    pub bundled_dir: Option<PathBuf>,
}

/// Runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Name of the runtime link target defined by the embedding build
    pub target: Option<String>,
}

/// Staging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Destination for staged headers, relative to the project root
    pub dest: Option<PathBuf>,

    /// Header file name pattern
    pub pattern: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.system.is_some() {
            self.resolve.system = other.resolve.system;
        }
        if !other.resolve.prefixes.is_empty() {
            self.resolve.prefixes = other.resolve.prefixes;
        }

        if other.dependency.name.is_some() {
            self.dependency.name = other.dependency.name;
        }
        if other.dependency.version.is_some() {
            self.dependency.version = other.dependency.version;
        }
        if other.dependency.pkg_config.is_some() {
            self.dependency.pkg_config = other.dependency.pkg_config;
        }
        if other.dependency.bundled_dir.is_some() {
            self.dependency.bundled_dir = other.dependency.bundled_dir;
        }

        if other.runtime.target.is_some() {
            self.runtime.target = other.runtime.target;
        }

        if other.stage.dest.is_some() {
            self.stage.dest = other.stage.dest;
        }
        if other.stage.pattern.is_some() {
            self.stage.pattern = other.stage.pattern;
        }
    }

    /// The system-vs-bundled selector (defaults to bundled).
    pub fn use_system(&self) -> bool {
        self.resolve.system.unwrap_or(false)
    }

    /// The dependency name (defaults to pybind11).
    pub fn dependency_name(&self) -> &str {
        self.dependency.name.as_deref().unwrap_or("pybind11")
    }

    /// Staging destination relative to the project root.
    pub fn stage_dest(&self) -> PathBuf {
        self.stage
            .dest
            .clone()
            .unwrap_or_else(|| PathBuf::from("dist").join("include"))
    }

    /// Header file name pattern for staging.
    pub fn stage_pattern(&self) -> &str {
        self.stage.pattern.as_deref().unwrap_or("*.h")
    }

    /// Build the dependency spec this configuration describes.
    pub fn header_lib(&self) -> Result<HeaderLib> {
        let mut lib = HeaderLib::new(self.dependency_name());

        if let Some(raw) = &self.dependency.version {
            let req = raw
                .parse()
                .with_context(|| format!("invalid version requirement: {}", raw))?;
            lib = lib.with_version_req(req);
        }

        if let Some(pkg_config) = &self.dependency.pkg_config {
            lib = lib.with_pkg_config_name(pkg_config);
        }

        if let Some(dir) = &self.dependency.bundled_dir {
            lib = lib.with_bundled_dir(dir);
        }

        if let Some(target) = &self.runtime.target {
            lib = lib.with_runtime(target);
        }

        Ok(lib)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.headland/config.toml)
/// 2. Global config (~/.headland/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global headland config directory (~/.headland).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".headland"))
}

/// Get the global config path (~/.headland/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.headland/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".headland").join("config.toml")
}
