//! The resolution operation: configuration in, import target out.

use std::path::Path;

use anyhow::Result;

use crate::core::mode::ResolutionMode;
use crate::core::target::ImportTarget;
use crate::resolver::Resolver;
use crate::util::config::Config;
use crate::util::shell::Shell;

/// CLI-level overrides applied on top of configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Force system mode regardless of config
    pub system: bool,

    /// Force bundled mode regardless of config
    pub bundled: bool,
}

impl ResolveOptions {
    /// Effective mode: CLI flags win over the config selector.
    pub fn mode(&self, config: &Config) -> ResolutionMode {
        if self.system {
            ResolutionMode::System
        } else if self.bundled {
            ResolutionMode::Bundled
        } else {
            ResolutionMode::from_flag(config.use_system())
        }
    }
}

/// Run the dependency resolution step for the configured header library.
pub fn resolve_target(
    config: &Config,
    options: ResolveOptions,
    project_root: &Path,
    shell: &Shell,
) -> Result<ImportTarget> {
    let mode = options.mode(config);
    let lib = config.header_lib()?;
    let resolver = Resolver::with_host_lookups(config.resolve.prefixes.clone());

    resolver.resolve(mode, &lib, project_root, shell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_mode_precedence() {
        let mut config = Config::default();
        config.resolve.system = Some(true);

        let default = ResolveOptions::default();
        assert_eq!(default.mode(&config), ResolutionMode::System);

        let bundled = ResolveOptions {
            bundled: true,
            ..Default::default()
        };
        assert_eq!(bundled.mode(&config), ResolutionMode::Bundled);

        config.resolve.system = Some(false);
        let system = ResolveOptions {
            system: true,
            ..Default::default()
        };
        assert_eq!(system.mode(&config), ResolutionMode::System);
    }
}
