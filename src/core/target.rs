//! Import target - the artifact downstream build targets consume.
//!
//! The ImportTarget is interface-only: it carries no compiled code, just
//! include paths and a link reference. It is created once per resolution
//! and never mutated afterwards; any number of downstream targets may
//! consume it by name.

use std::fmt;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};

/// A link-time reference carried by an import target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LinkRef {
    /// A target defined elsewhere in the embedding build, referenced by
    /// name and never resolved here (e.g. the host-language runtime).
    Runtime { name: String },

    /// System library (-l<name>).
    System { name: String },
}

impl LinkRef {
    /// Create a runtime target reference.
    pub fn runtime(name: impl Into<String>) -> Self {
        LinkRef::Runtime { name: name.into() }
    }

    /// Create a system library reference.
    pub fn system(name: impl Into<String>) -> Self {
        LinkRef::System { name: name.into() }
    }

    /// Get the referenced name.
    pub fn name(&self) -> &str {
        match self {
            LinkRef::Runtime { name } | LinkRef::System { name } => name,
        }
    }

    /// Convert to linker flag(s).
    pub fn to_flags(&self) -> Vec<String> {
        match self {
            // Resolved by the embedding build
            LinkRef::Runtime { .. } => vec![],
            LinkRef::System { name } => vec![format!("-l{}", name)],
        }
    }
}

/// Which lookup produced a resolved include set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    ConfigMode,
    PkgConfig,
    Bundled,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::ConfigMode => write!(f, "config-mode"),
            Provenance::PkgConfig => write!(f, "pkg-config"),
            Provenance::Bundled => write!(f, "bundled"),
        }
    }
}

/// The reusable build artifact produced by the resolution step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTarget {
    /// Target name (the library name)
    name: String,

    /// Include directories (-I)
    include_dirs: Vec<PathBuf>,

    /// The same directories published as system include paths
    /// (-isystem), suppressing warning diagnostics in consumers
    system_include_dirs: Vec<PathBuf>,

    /// Link references propagated to consumers
    links: Vec<LinkRef>,

    /// Which lookup produced the include set
    provenance: Provenance,

    /// Discovered version, when the lookup reported one
    version: Option<Version>,
}

impl ImportTarget {
    /// Build an import target from a resolved include set.
    ///
    /// The include directories are bound both as ordinary and as system
    /// include paths.
    pub fn new(
        name: impl Into<String>,
        include_dirs: Vec<PathBuf>,
        link: LinkRef,
        provenance: Provenance,
    ) -> Self {
        ImportTarget {
            name: name.into(),
            system_include_dirs: include_dirs.clone(),
            include_dirs,
            links: vec![link],
            provenance,
            version: None,
        }
    }

    /// Attach the discovered version.
    pub fn with_version(mut self, version: Option<Version>) -> Self {
        self.version = version;
        self
    }

    /// Get the target name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ordinary include directories.
    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Get the system include directories.
    pub fn system_include_dirs(&self) -> &[PathBuf] {
        &self.system_include_dirs
    }

    /// Get the link references.
    pub fn links(&self) -> &[LinkRef] {
        &self.links
    }

    /// Get the provenance of the include set.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Get the discovered version, if any.
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    /// Primary include directory.
    pub fn include_dir(&self) -> Option<&Path> {
        self.include_dirs.first().map(PathBuf::as_path)
    }

    /// Compile flags for consumers: ordinary then system include paths.
    pub fn compile_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        for dir in &self.include_dirs {
            flags.push(format!("-I{}", dir.display()));
        }
        for dir in &self.system_include_dirs {
            flags.push(format!("-isystem{}", dir.display()));
        }
        flags
    }

    /// Link flags for consumers.
    pub fn link_flags(&self) -> Vec<String> {
        self.links.iter().flat_map(LinkRef::to_flags).collect()
    }
}
