//! Dependency resolution.
//!
//! The resolution step proper: one mode flag in, one import target out.
//! System mode walks an ordered sequence of host lookups and takes the
//! first success; bundled mode never touches the host. Exhausting the
//! sequence in system mode is the single fatal condition.

pub mod bundled;
pub mod config_mode;
pub mod errors;
pub mod lookup;
pub mod pkg_config;

pub use config_mode::ConfigLookup;
pub use errors::ResolveError;
pub use lookup::{Discovery, Lookup};
pub use pkg_config::PkgConfigLookup;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::dependency::HeaderLib;
use crate::core::mode::ResolutionMode;
use crate::core::target::{ImportTarget, LinkRef};
use crate::util::shell::{Shell, Status};

/// Runs the lookup sequence and builds the import target.
pub struct Resolver {
    lookups: Vec<Box<dyn Lookup>>,
}

impl Resolver {
    /// Resolver with an explicit lookup sequence.
    pub fn new(lookups: Vec<Box<dyn Lookup>>) -> Self {
        Resolver { lookups }
    }

    /// Resolver with the standard order: config-mode first, then the
    /// generic pkg-config lookup.
    pub fn with_host_lookups(extra_prefixes: Vec<PathBuf>) -> Self {
        Resolver::new(vec![
            Box::new(ConfigLookup::new(extra_prefixes)),
            Box::new(PkgConfigLookup::from_env()),
        ])
    }

    /// Run the resolution step.
    ///
    /// Deterministic in the mode and host state: the same inputs yield
    /// an import target with the same include paths.
    pub fn resolve(
        &self,
        mode: ResolutionMode,
        lib: &HeaderLib,
        project_root: &Path,
        shell: &Shell,
    ) -> Result<ImportTarget> {
        shell.status(Status::Resolving, format!("{} ({})", lib.name(), mode));

        let discovery = match mode {
            ResolutionMode::Bundled => {
                let discovery = bundled::discover(lib, project_root);
                if !bundled::is_present(lib, project_root) {
                    shell.warn(format!(
                        "bundled copy missing at {}",
                        lib.bundled_include_dir(project_root).display()
                    ));
                }
                shell.status(Status::Located, format!("{} (bundled copy)", lib.name()));
                discovery
            }
            ResolutionMode::System => self.probe_host(lib, shell)?,
        };

        let target = ImportTarget::new(
            lib.name(),
            discovery.include_dirs,
            LinkRef::runtime(lib.runtime()),
            discovery.provenance,
        )
        .with_version(discovery.version);

        for dir in target.include_dirs() {
            shell.status(Status::Located, format!("include dir: {}", dir.display()));
        }

        Ok(target)
    }

    /// Walk the lookup sequence, first success wins.
    fn probe_host(&self, lib: &HeaderLib, shell: &Shell) -> Result<Discovery> {
        let mut attempted = Vec::new();

        for lookup in &self.lookups {
            attempted.push(lookup.name().to_string());

            let Some(discovery) = lookup.probe(lib)? else {
                tracing::debug!("`{}` lookup: nothing for `{}`", lookup.name(), lib.name());
                continue;
            };

            if let (Some(version), Some(req)) = (&discovery.version, lib.version_req()) {
                if !req.matches(version) {
                    shell.warn(format!(
                        "`{}` {} from {} does not satisfy `{}`",
                        lib.name(),
                        version,
                        lookup.name(),
                        req
                    ));
                    continue;
                }
            }

            let outcome = match &discovery.version {
                Some(version) => format!("{} {} via {}", lib.name(), version, lookup.name()),
                None => format!("{} via {}", lib.name(), lookup.name()),
            };
            shell.status(Status::Located, outcome);

            return Ok(discovery);
        }

        Err(ResolveError::DependencyNotFound {
            name: lib.name().to_string(),
            attempted,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::Provenance;
    use semver::Version;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Scripted lookup that counts how often it is probed.
    struct FakeLookup {
        name: &'static str,
        result: Option<Discovery>,
        probes: Rc<Cell<usize>>,
    }

    impl FakeLookup {
        fn new(name: &'static str, result: Option<Discovery>) -> (Self, Rc<Cell<usize>>) {
            let probes = Rc::new(Cell::new(0));
            (
                FakeLookup {
                    name,
                    result,
                    probes: Rc::clone(&probes),
                },
                probes,
            )
        }
    }

    impl Lookup for FakeLookup {
        fn name(&self) -> &'static str {
            self.name
        }

        fn probe(&self, _lib: &HeaderLib) -> Result<Option<Discovery>> {
            self.probes.set(self.probes.get() + 1);
            Ok(self.result.clone())
        }
    }

    fn discovery(dir: &str, version: Option<Version>) -> Discovery {
        Discovery {
            include_dirs: vec![PathBuf::from(dir)],
            version,
            provenance: Provenance::ConfigMode,
        }
    }

    fn quiet_shell() -> Shell {
        Shell::from_flags(true, false, crate::util::shell::ColorChoice::Never, false)
    }

    #[test]
    fn test_bundled_mode_never_probes_host() {
        let (lookup, probes) = FakeLookup::new("config-mode", Some(discovery("/found", None)));
        let resolver = Resolver::new(vec![Box::new(lookup)]);
        let lib = HeaderLib::new("pybind11");

        let target = resolver
            .resolve(
                ResolutionMode::Bundled,
                &lib,
                Path::new("/proj"),
                &quiet_shell(),
            )
            .unwrap();

        assert_eq!(probes.get(), 0);
        assert_eq!(
            target.include_dirs(),
            &[PathBuf::from("/proj/third_party/pybind11/include")]
        );
        assert_eq!(target.provenance(), Provenance::Bundled);
    }

    #[test]
    fn test_first_success_wins() {
        let (first, _) = FakeLookup::new("config-mode", Some(discovery("/first", None)));
        let (second, second_probes) = FakeLookup::new("pkg-config", Some(discovery("/second", None)));
        let resolver = Resolver::new(vec![Box::new(first), Box::new(second)]);
        let lib = HeaderLib::new("pybind11");

        let target = resolver
            .resolve(
                ResolutionMode::System,
                &lib,
                Path::new("/proj"),
                &quiet_shell(),
            )
            .unwrap();

        assert_eq!(target.include_dirs(), &[PathBuf::from("/first")]);
        assert_eq!(second_probes.get(), 0);
    }

    #[test]
    fn test_exhausted_sequence_is_fatal() {
        let (first, _) = FakeLookup::new("config-mode", None);
        let (second, _) = FakeLookup::new("pkg-config", None);
        let resolver = Resolver::new(vec![Box::new(first), Box::new(second)]);
        let lib = HeaderLib::new("pybind11");

        let err = resolver
            .resolve(
                ResolutionMode::System,
                &lib,
                Path::new("/proj"),
                &quiet_shell(),
            )
            .unwrap_err();

        match err.downcast_ref::<ResolveError>() {
            Some(ResolveError::DependencyNotFound { name, attempted }) => {
                assert_eq!(name, "pybind11");
                assert_eq!(attempted, &["config-mode", "pkg-config"]);
            }
            None => panic!("expected DependencyNotFound, got: {:#}", err),
        }
    }

    #[test]
    fn test_version_mismatch_falls_through() {
        let (first, _) = FakeLookup::new(
            "config-mode",
            Some(discovery("/old", Some(Version::new(1, 0, 0)))),
        );
        let (second, _) = FakeLookup::new(
            "pkg-config",
            Some(discovery("/new", Some(Version::new(2, 13, 0)))),
        );
        let resolver = Resolver::new(vec![Box::new(first), Box::new(second)]);
        let lib = HeaderLib::new("pybind11").with_version_req("^2.12".parse().unwrap());

        let target = resolver
            .resolve(
                ResolutionMode::System,
                &lib,
                Path::new("/proj"),
                &quiet_shell(),
            )
            .unwrap();

        assert_eq!(target.include_dirs(), &[PathBuf::from("/new")]);
        assert_eq!(target.version(), Some(&Version::new(2, 13, 0)));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let lib = HeaderLib::new("pybind11");
        let shell = quiet_shell();

        let resolve = |resolver: &Resolver| {
            resolver
                .resolve(ResolutionMode::System, &lib, Path::new("/proj"), &shell)
                .unwrap()
        };

        let (first, _) = FakeLookup::new(
            "config-mode",
            Some(discovery("/stable", Some(Version::new(2, 12, 0)))),
        );
        let resolver = Resolver::new(vec![Box::new(first)]);

        assert_eq!(resolve(&resolver), resolve(&resolver));
    }

    #[test]
    fn test_target_links_runtime_by_name() {
        let lib = HeaderLib::new("pybind11").with_runtime("python3.11");
        let resolver = Resolver::new(Vec::new());

        let target = resolver
            .resolve(
                ResolutionMode::Bundled,
                &lib,
                Path::new("/proj"),
                &quiet_shell(),
            )
            .unwrap();

        assert_eq!(target.links()[0], LinkRef::runtime("python3.11"));
    }
}
