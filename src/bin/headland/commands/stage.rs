//! `headland stage` command

use anyhow::Result;

use headland::ops::resolve::ResolveOptions;
use headland::ops::stage::{stage_headers, StageOptions};
use headland::util::shell::Shell;

use crate::cli::{GlobalOpts, StageArgs};

pub fn execute(globals: &GlobalOpts, args: StageArgs) -> Result<()> {
    let shell = Shell::from_flags(globals.quiet, globals.verbose, globals.color, false);

    let project_root = super::project_root(globals)?;
    let config = super::load_config(&project_root);

    let options = StageOptions {
        dest: args.dest,
        dry_run: args.dry_run,
        force: args.force,
        resolve: ResolveOptions {
            system: args.system,
            bundled: args.bundled,
        },
    };

    stage_headers(&config, &options, &project_root, &shell)?;

    Ok(())
}
