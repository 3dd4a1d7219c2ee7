//! `headland resolve` command

use anyhow::Result;

use headland::ops::resolve::{resolve_target, ResolveOptions};
use headland::util::shell::Shell;

use crate::cli::{GlobalOpts, ResolveArgs};

pub fn execute(globals: &GlobalOpts, args: ResolveArgs) -> Result<()> {
    let shell = Shell::from_flags(globals.quiet, globals.verbose, globals.color, args.json);

    let project_root = super::project_root(globals)?;
    let config = super::load_config(&project_root);

    let options = ResolveOptions {
        system: args.system,
        bundled: args.bundled,
    };

    let target = resolve_target(&config, options, &project_root, &shell)
        .map_err(|err| super::fatal_if_not_found(err, &shell))?;

    if shell.is_json() {
        shell.json_event(&serde_json::json!({
            "reason": "import-target",
            "name": target.name(),
            "include_dirs": target.include_dirs(),
            "system_include_dirs": target.system_include_dirs(),
            "links": target.links(),
            "provenance": target.provenance().to_string(),
            "version": target.version().map(|v| v.to_string()),
        }));
    }

    Ok(())
}
