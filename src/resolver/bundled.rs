//! Bundled resolution: the vendored in-tree copy.

use std::path::Path;

use crate::core::dependency::HeaderLib;
use crate::core::target::Provenance;
use crate::resolver::lookup::Discovery;

/// Resolve the bundled copy.
///
/// Cannot fail: the include path is fixed relative to the project root,
/// so there is nothing to probe. Callers may still want [`is_present`]
/// to warn when the vendored tree is missing.
pub fn discover(lib: &HeaderLib, project_root: &Path) -> Discovery {
    Discovery {
        include_dirs: vec![lib.bundled_include_dir(project_root)],
        version: None,
        provenance: Provenance::Bundled,
    }
}

/// Check whether the vendored include tree exists on disk.
pub fn is_present(lib: &HeaderLib, project_root: &Path) -> bool {
    lib.bundled_include_dir(project_root).is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_discover_uses_fixed_in_tree_path() {
        let lib = HeaderLib::new("pybind11");
        let discovery = discover(&lib, Path::new("/proj"));

        assert_eq!(
            discovery.include_dirs,
            vec![PathBuf::from("/proj/third_party/pybind11/include")]
        );
        assert_eq!(discovery.provenance, Provenance::Bundled);
        assert_eq!(discovery.version, None);
    }

    #[test]
    fn test_is_present_for_missing_tree() {
        let lib = HeaderLib::new("pybind11");
        assert!(!is_present(&lib, Path::new("/nonexistent")));
    }
}
