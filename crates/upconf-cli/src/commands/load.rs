//! `upconf load` -- load one configuration file.

use anyhow::{Context, Result};
use upconf::{Explorer, ExplorerOptions};

use crate::cli::LoadArgs;
use crate::commands::apply_projection;
use crate::context::RuntimeContext;
use crate::output::output_result;

/// Execute the `upconf load` command.
pub fn run(ctx: &RuntimeContext, args: &LoadArgs) -> Result<()> {
    let mut options = ExplorerOptions::new(&args.module);
    options.cache = false;
    apply_projection(&mut options, &args.projection);

    let result = Explorer::new(options)
        .load(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    output_result(ctx, result.as_deref());
    if result.is_none() && !ctx.json {
        eprintln!("{} holds no '{}' configuration", args.file.display(), args.module);
        std::process::exit(1);
    }
    Ok(())
}
