//! The staging operation: bundled headers into the distribution tree.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::ops::resolve::ResolveOptions;
use crate::stage::{StagePlan, StageReport};
use crate::util::config::Config;
use crate::util::fs::relative_path;
use crate::util::shell::{Shell, Status};

/// Options for the staging operation.
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    /// Destination override (defaults to the configured stage dest)
    pub dest: Option<PathBuf>,

    /// Print the plan without copying
    pub dry_run: bool,

    /// Recopy headers even when up to date
    pub force: bool,

    /// Mode overrides shared with resolution
    pub resolve: ResolveOptions,
}

/// Stage the bundled headers.
///
/// In system mode this stages zero files: the resolved headers already
/// live in the host prefix.
pub fn stage_headers(
    config: &Config,
    options: &StageOptions,
    project_root: &Path,
    shell: &Shell,
) -> Result<StageReport> {
    let mode = options.resolve.mode(config);

    if mode.is_system() {
        shell.status(
            Status::Skipped,
            "staging (system mode uses installed headers)",
        );
        return Ok(StageReport::default());
    }

    let lib = config.header_lib()?;
    let include_dir = lib.bundled_include_dir(project_root);
    let dest = options
        .dest
        .clone()
        .unwrap_or_else(|| project_root.join(config.stage_dest()));

    let plan = StagePlan::new(&include_dir, &dest, config.stage_pattern())?;

    if plan.is_empty() {
        shell.warn(format!(
            "no headers matched `{}` under {}",
            config.stage_pattern(),
            include_dir.display()
        ));
        return Ok(StageReport::default());
    }

    if options.dry_run {
        for entry in plan.entries() {
            shell.status(
                Status::Info,
                format!(
                    "would stage {}",
                    relative_path(project_root, &entry.dest).display()
                ),
            );
        }
        return Ok(StageReport::default());
    }

    shell.status(
        Status::Staging,
        format!("{} headers into {}", plan.len(), dest.display()),
    );

    let report = plan.execute(shell, options.force)?;

    shell.status(
        Status::Finished,
        format!(
            "staged {} headers ({} up to date)",
            report.copied, report.skipped
        ),
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::shell::ColorChoice;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_shell() -> Shell {
        Shell::from_flags(true, false, ColorChoice::Never, false)
    }

    fn project_with_bundled_copy(root: &Path) {
        let include = root.join("third_party/pybind11/include/pybind11");
        fs::create_dir_all(&include).unwrap();
        fs::write(include.join("pybind11.h"), "// pybind11\n").unwrap();
    }

    #[test]
    fn test_system_mode_stages_nothing() {
        let tmp = TempDir::new().unwrap();
        project_with_bundled_copy(tmp.path());

        let options = StageOptions {
            resolve: ResolveOptions {
                system: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let report =
            stage_headers(&Config::default(), &options, tmp.path(), &quiet_shell()).unwrap();

        assert_eq!(report, StageReport::default());
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn test_bundled_mode_stages_into_default_dest() {
        let tmp = TempDir::new().unwrap();
        project_with_bundled_copy(tmp.path());

        let options = StageOptions::default();
        let report =
            stage_headers(&Config::default(), &options, tmp.path(), &quiet_shell()).unwrap();

        assert_eq!(report.copied, 1);
        assert!(tmp
            .path()
            .join("dist/include/pybind11/pybind11.h")
            .is_file());
    }

    #[test]
    fn test_dry_run_copies_nothing() {
        let tmp = TempDir::new().unwrap();
        project_with_bundled_copy(tmp.path());

        let options = StageOptions {
            dry_run: true,
            ..Default::default()
        };
        let report =
            stage_headers(&Config::default(), &options, tmp.path(), &quiet_shell()).unwrap();

        assert_eq!(report, StageReport::default());
        assert!(!tmp.path().join("dist").exists());
    }
}
