//! Upward configuration file discovery and loading.
//!
//! An application named `myapp` typically asks an [`Explorer`] to search from
//! the current directory toward the home directory for the first of
//! `package.json` (its `myapp` property), `.myapprc`, `.myapprc.json`,
//! `.myapprc.yaml`, `.config/myapprc`, `myapp.config.toml` and so on, and to
//! parse whichever it finds:
//!
//! ```no_run
//! let explorer = upconf::explorer("myapp")?;
//! if let Some(found) = explorer.search("")? {
//!     println!("config at {}: {:?}", found.filepath().display(), found.config());
//! }
//! # Ok::<(), upconf::Error>(())
//! ```
//!
//! Results are memoized per directory and per file for the lifetime of the
//! explorer; see [`Explorer::clear_caches`].

pub mod error;
pub mod explorer;
pub mod loaders;
pub mod meta;
pub mod options;
pub mod property_path;
pub mod result;

mod cache;
mod paths;

use std::sync::Arc;

pub use error::{Error, LoaderError, Result};
pub use explorer::{Explorer, PACKAGE_MANIFEST};
pub use loaders::{LoaderFn, LoaderKey, Loaders};
pub use meta::{DiscoveredMetaConfig, MetaConfig};
pub use options::{ExplorerOptions, Transform, default_search_places};
pub use property_path::PropertyPath;
pub use result::{ResolvedConfig, SearchResult};

/// Build an explorer for `module_name` with the conventional options,
/// adjusted by any meta-config found in the current directory.
///
/// # Errors
///
/// Returns [`Error::CurrentDir`] if the working directory is unavailable and
/// any error from [`meta::discover`].
pub fn explorer(module_name: &str) -> Result<Explorer> {
    Ok(Explorer::new(options_for(module_name)?))
}

/// The options [`explorer`] would use for `module_name`.
///
/// # Errors
///
/// See [`explorer`].
pub fn options_for(module_name: &str) -> Result<ExplorerOptions> {
    let cwd = std::env::current_dir().map_err(|e| Error::CurrentDir(Arc::new(e)))?;
    let mut options = ExplorerOptions::new(module_name);
    if let Some(meta) = meta::discover(&cwd)? {
        options.apply_meta_config(meta.filepath, &meta.config);
    }
    Ok(options)
}
