//! `upconf places` -- list the candidate files of a search.

use anyhow::Result;

use crate::cli::PlacesArgs;
use crate::commands::base_options;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `upconf places` command.
pub fn run(ctx: &RuntimeContext, args: &PlacesArgs) -> Result<()> {
    let options = base_options(&args.module, args.no_meta)?;

    if ctx.json {
        output_json(&serde_json::json!({
            "module": options.module_name,
            "searchPlaces": options.search_places,
            "metaConfig": options.meta_config_file_path,
        }));
        return Ok(());
    }

    if let Some(meta) = &options.meta_config_file_path {
        if !ctx.quiet {
            println!("# meta config: {}", meta.display());
        }
    }
    for place in &options.search_places {
        println!("{}", place);
    }
    Ok(())
}
