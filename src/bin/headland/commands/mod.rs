//! Command implementations.

pub mod completions;
pub mod flags;
pub mod resolve;
pub mod stage;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use headland::resolver::ResolveError;
use headland::util::config::{self, Config};
use headland::util::diagnostic;
use headland::util::fs::normalize_path;
use headland::util::shell::Shell;

use crate::cli::GlobalOpts;

/// Project root from the CLI flag or the current directory.
pub(crate) fn project_root(globals: &GlobalOpts) -> Result<PathBuf> {
    match &globals.project_root {
        Some(path) => Ok(normalize_path(path)),
        None => std::env::current_dir().context("failed to determine the current directory"),
    }
}

/// Load layered configuration for a project.
pub(crate) fn load_config(project_root: &Path) -> Config {
    config::load_config(
        config::global_config_path().as_deref(),
        &config::project_config_path(project_root),
    )
}

/// Emit the rich not-found diagnostic and abort; pass through anything
/// else.
pub(crate) fn fatal_if_not_found(err: anyhow::Error, shell: &Shell) -> anyhow::Error {
    match err.downcast::<ResolveError>() {
        Ok(resolve_err) => {
            diagnostic::emit(&resolve_err.to_diagnostic(), shell.use_color());
            std::process::exit(1);
        }
        Err(other) => other,
    }
}
