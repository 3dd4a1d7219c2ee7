//! Host lookup strategies.
//!
//! A Lookup is one way of locating an installed header-only library.
//! Strategies differ in how they probe the host, but all report the same
//! result shape, so the resolver can try them in order and take the
//! first success.

use std::path::PathBuf;

use anyhow::Result;
use semver::Version;

use crate::core::dependency::HeaderLib;
use crate::core::target::Provenance;

/// What a successful host lookup reports.
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    /// Include directories the installed copy exposes
    pub include_dirs: Vec<PathBuf>,

    /// Installed version, when the host reports one
    pub version: Option<Version>,

    /// Which strategy produced this discovery
    pub provenance: Provenance,
}

/// One strategy for locating an installed header-only library.
///
/// Returning `Ok(None)` means "not found here", which is not an error;
/// the resolver moves on to the next strategy.
pub trait Lookup {
    /// Short name used in status lines and not-found diagnostics.
    fn name(&self) -> &'static str;

    /// Probe the host for the library.
    fn probe(&self, lib: &HeaderLib) -> Result<Option<Discovery>>;
}
