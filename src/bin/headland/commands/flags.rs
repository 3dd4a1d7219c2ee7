//! `headland flags` command

use anyhow::Result;

use headland::core::target::LinkRef;
use headland::ops::resolve::{resolve_target, ResolveOptions};
use headland::util::shell::Shell;

use crate::cli::{FlagsArgs, GlobalOpts};

pub fn execute(globals: &GlobalOpts, args: FlagsArgs) -> Result<()> {
    // Quiet shell: status lines would interleave with the flag output.
    let shell = Shell::from_flags(true, false, globals.color, false);

    let project_root = super::project_root(globals)?;
    let config = super::load_config(&project_root);

    let options = ResolveOptions {
        system: args.system,
        bundled: args.bundled,
    };

    let target = resolve_target(&config, options, &project_root, &shell)
        .map_err(|err| super::fatal_if_not_found(err, &shell))?;

    if !args.link {
        println!("# Compile flags for `{}`:", target.name());

        for dir in target.include_dirs() {
            println!("  -I{}", dir.display());
        }

        for dir in target.system_include_dirs() {
            println!("  -isystem {}", dir.display());
        }
    }

    if !args.compile && !args.link {
        println!();
    }

    if !args.compile {
        println!("# Link flags for `{}`:", target.name());

        for link in target.links() {
            match link {
                LinkRef::Runtime { name } => {
                    println!("  {}    # runtime target, resolved by the embedding build", name);
                }
                other => {
                    for flag in other.to_flags() {
                        println!("  {}", flag);
                    }
                }
            }
        }
    }

    Ok(())
}
