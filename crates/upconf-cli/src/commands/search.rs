//! `upconf search` -- walk up from a directory looking for configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use upconf::Explorer;

use crate::cli::SearchArgs;
use crate::commands::{apply_projection, base_options};
use crate::context::RuntimeContext;
use crate::output::output_result;

/// Execute the `upconf search` command.
pub fn run(ctx: &RuntimeContext, args: &SearchArgs) -> Result<()> {
    let mut options = base_options(&args.module, args.no_meta)?;
    if !args.search_places.is_empty() {
        options.search_places = args.search_places.clone();
    }
    if let Some(stop_dir) = &args.stop_dir {
        options.stop_dir = stop_dir.clone();
    }
    if args.include_empty {
        options.ignore_empty_search_places = false;
    }
    apply_projection(&mut options, &args.projection);
    debug!(?options, "search options");

    let from = args.dir.clone().unwrap_or_else(PathBuf::new);
    let explorer = Explorer::new(options);
    let result = explorer
        .search(&from)
        .with_context(|| format!("failed to search for '{}' configuration", args.module))?;

    output_result(ctx, result.as_deref());
    if result.is_none() && !ctx.json {
        eprintln!("No configuration found for '{}'", args.module);
        std::process::exit(1);
    }
    Ok(())
}
