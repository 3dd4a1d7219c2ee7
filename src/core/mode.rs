//! Resolution mode - where the dependency's headers come from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selects where a header-only dependency is resolved from.
///
/// `System` probes the host for an installed copy; `Bundled` uses the
/// vendored copy inside the project tree. The mode is read once at
/// configuration time and never changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    /// Host-installed copy, discovered through the lookup sequence.
    System,

    /// Vendored in-tree copy.
    Bundled,
}

impl ResolutionMode {
    /// Map the system-vs-bundled selector flag to a mode.
    pub fn from_flag(system: bool) -> Self {
        if system {
            ResolutionMode::System
        } else {
            ResolutionMode::Bundled
        }
    }

    /// Check if this mode queries the host.
    pub fn is_system(&self) -> bool {
        matches!(self, ResolutionMode::System)
    }

    /// Check if this mode uses the in-tree copy.
    pub fn is_bundled(&self) -> bool {
        matches!(self, ResolutionMode::Bundled)
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::System => write!(f, "system"),
            ResolutionMode::Bundled => write!(f, "bundled"),
        }
    }
}

impl FromStr for ResolutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(ResolutionMode::System),
            "bundled" => Ok(ResolutionMode::Bundled),
            _ => Err(format!(
                "invalid resolution mode '{}'; expected 'system' or 'bundled'",
                s
            )),
        }
    }
}
