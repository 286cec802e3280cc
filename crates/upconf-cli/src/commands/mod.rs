//! Command handlers, one module per subcommand.

pub mod completion;
pub mod load;
pub mod places;
pub mod search;

use anyhow::{Context, Result};
use upconf::{ExplorerOptions, PropertyPath};

use crate::cli::ProjectionArgs;

/// Conventional options for `module`, with the working directory's
/// meta-config applied unless `no_meta` is set.
pub fn base_options(module: &str, no_meta: bool) -> Result<ExplorerOptions> {
    if no_meta {
        return Ok(ExplorerOptions::new(module));
    }
    upconf::options_for(module).context("failed to read meta config")
}

/// Apply `--package-prop` and `--apply-package-prop`.
pub fn apply_projection(options: &mut ExplorerOptions, projection: &ProjectionArgs) {
    if let Some(prop) = &projection.package_prop {
        options.package_prop = PropertyPath::from(prop.as_str());
    }
    if projection.apply_package_prop {
        options.apply_package_property_path_to_configuration = true;
    }
}
