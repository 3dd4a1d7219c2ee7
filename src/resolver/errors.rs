//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error during dependency resolution.
///
/// Only one kind exists: exhausting every host lookup in system mode.
/// Bundled resolution cannot fail, since it relies only on a path fixed
/// relative to the project root.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("dependency not found: `{name}`")]
    #[diagnostic(
        code(headland::resolve::not_found),
        help("Install `{name}` where a lookup can see it, or use the bundled copy with `--bundled`")
    )]
    DependencyNotFound {
        name: String,
        /// Lookup strategies attempted, in order
        attempted: Vec<String>,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::DependencyNotFound { name, attempted } => {
                let mut diag =
                    Diagnostic::error(format!("could not find `{}` on this host", name));

                for lookup in attempted {
                    diag = diag.with_context(format!("`{}` lookup found nothing", lookup));
                }

                diag.with_suggestion(format!(
                    "Install `{}` so pkg-config or a known prefix can see it",
                    name
                ))
                .with_suggestion(
                    "Use the bundled copy: `headland resolve --bundled`".to_string(),
                )
            }
        }
    }
}
