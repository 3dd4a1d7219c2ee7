//! Header-only dependency specification.
//!
//! A HeaderLib describes the one library this step resolves: what it is
//! called, how the host lookups should find it, where its bundled copy
//! lives, and which runtime target its consumers must link against.

use std::path::{Path, PathBuf};

use semver::{Version, VersionReq};

/// A header-only library the project depends on.
#[derive(Debug, Clone)]
pub struct HeaderLib {
    /// Library name, also the import target name
    name: String,

    /// Version requirement enforced against discovered copies
    version_req: Option<VersionReq>,

    /// Module name used by the generic pkg-config lookup
    pkg_config_name: String,

    /// Bundled copy location, relative to the project root
    bundled_dir: PathBuf,

    /// Host-language runtime target the headers require at link time
    runtime: String,
}

impl HeaderLib {
    /// Create a spec with the conventional defaults for `name`: the
    /// pkg-config module is the name itself and the bundled copy lives
    /// under `third_party/<name>`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let bundled_dir = PathBuf::from("third_party").join(&name);
        HeaderLib {
            pkg_config_name: name.clone(),
            name,
            version_req: None,
            bundled_dir,
            runtime: "python3".to_string(),
        }
    }

    /// Require discovered copies to satisfy a version requirement.
    pub fn with_version_req(mut self, req: VersionReq) -> Self {
        self.version_req = Some(req);
        self
    }

    /// Override the pkg-config module name.
    pub fn with_pkg_config_name(mut self, name: impl Into<String>) -> Self {
        self.pkg_config_name = name.into();
        self
    }

    /// Override the bundled copy location (relative to the project root).
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = dir.into();
        self
    }

    /// Override the runtime link target.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Get the library name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the version requirement, if any.
    pub fn version_req(&self) -> Option<&VersionReq> {
        self.version_req.as_ref()
    }

    /// Get the pkg-config module name.
    pub fn pkg_config_name(&self) -> &str {
        &self.pkg_config_name
    }

    /// Get the bundled copy location, relative to the project root.
    pub fn bundled_dir(&self) -> &Path {
        &self.bundled_dir
    }

    /// Get the runtime link target name.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Include directory of the bundled copy, fixed relative to the
    /// project root.
    pub fn bundled_include_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.bundled_dir).join("include")
    }

    /// Environment variable consulted first by the config-mode lookup,
    /// pointing at an installation prefix (e.g. `PYBIND11_DIR`).
    pub fn root_env_var(&self) -> String {
        let mut var: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        var.push_str("_DIR");
        var
    }

    /// Check if a discovered version satisfies this spec's requirement.
    pub fn matches_version(&self, version: &Version) -> bool {
        match &self.version_req {
            Some(req) => req.matches(version),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_name() {
        let lib = HeaderLib::new("pybind11");
        assert_eq!(lib.name(), "pybind11");
        assert_eq!(lib.pkg_config_name(), "pybind11");
        assert_eq!(lib.bundled_dir(), Path::new("third_party/pybind11"));
        assert_eq!(lib.runtime(), "python3");
    }

    #[test]
    fn test_bundled_include_dir() {
        let lib = HeaderLib::new("pybind11");
        assert_eq!(
            lib.bundled_include_dir(Path::new("/proj")),
            PathBuf::from("/proj/third_party/pybind11/include")
        );
    }

    #[test]
    fn test_root_env_var_mapping() {
        assert_eq!(HeaderLib::new("pybind11").root_env_var(), "PYBIND11_DIR");
        assert_eq!(HeaderLib::new("my-lib.x").root_env_var(), "MY_LIB_X_DIR");
    }

    #[test]
    fn test_matches_version() {
        let lib = HeaderLib::new("pybind11");
        assert!(lib.matches_version(&Version::new(1, 0, 0)));

        let lib = lib.with_version_req("^2.12".parse().unwrap());
        assert!(lib.matches_version(&Version::new(2, 13, 1)));
        assert!(!lib.matches_version(&Version::new(2, 11, 0)));
    }
}
