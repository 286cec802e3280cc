//! Project-level overrides of the search setup.
//!
//! A project can reconfigure where applications look for their configuration
//! by adding an `upconf` section to one of a few well-known files in the
//! working directory:
//!
//! ```yaml
//! # .config/config.yaml
//! upconf:
//!   searchPlaces: ["{name}.yaml", ".config/{name}.yaml"]
//! myapp:
//!   level: debug
//! ```
//!
//! The file that carries the meta-config is also consulted first by every
//! search, so applications can keep their own section (`myapp` above) right
//! next to it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::explorer::Explorer;
use crate::options::ExplorerOptions;
use crate::property_path::PropertyPath;

/// Property that holds the meta-config inside its file.
pub const META_CONFIG_PROP: &str = "upconf";

/// Files that may carry a meta-config, relative to the working directory.
pub const META_SEARCH_PLACES: &[&str] = &[
    "package.json",
    "package.yaml",
    ".config/config.json",
    ".config/config.yaml",
    ".config/config.yml",
    ".config/config.toml",
];

/// Contents of the `upconf` section of a meta-config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaConfig {
    /// Replacement search places; `{name}` expands to the module name.
    #[serde(default)]
    pub search_places: Option<Vec<String>>,

    /// Override for [`ExplorerOptions::ignore_empty_search_places`].
    #[serde(default)]
    pub ignore_empty_search_places: Option<bool>,
}

/// A meta-config together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredMetaConfig {
    /// Absolute path of the file carrying the meta-config.
    pub filepath: PathBuf,
    /// The parsed section.
    pub config: MetaConfig,
}

/// Look for a meta-config in `cwd`. Parent directories are not searched.
///
/// A file with an empty `upconf` section still counts: it yields the default
/// [`MetaConfig`] and its path.
///
/// # Errors
///
/// Returns [`Error::MetaConfig`] when the section is malformed or tries to
/// declare loaders, and propagates read and parse errors of the candidates.
pub fn discover(cwd: &Path) -> Result<Option<DiscoveredMetaConfig>> {
    let mut options = ExplorerOptions::new(META_CONFIG_PROP);
    options.search_places = META_SEARCH_PLACES.iter().map(|s| s.to_string()).collect();
    options.package_prop = PropertyPath::from(META_CONFIG_PROP);
    options.stop_dir = cwd.to_path_buf();
    options.cache = false;
    options.ignore_empty_search_places = false;
    options.apply_package_property_path_to_configuration = true;

    let Some(found) = Explorer::new(options).search(cwd)? else {
        return Ok(None);
    };
    let filepath = found.filepath().to_path_buf();
    debug!(path = %filepath.display(), "found meta config");

    let config = match found.config() {
        None => MetaConfig::default(),
        Some(value) => parse_meta_config(&filepath, value)?,
    };
    Ok(Some(DiscoveredMetaConfig { filepath, config }))
}

fn parse_meta_config(filepath: &Path, value: &Value) -> Result<MetaConfig> {
    if value.get("loaders").is_some() {
        return Err(Error::MetaConfig {
            path: filepath.to_path_buf(),
            reason: "loaders cannot be specified in a meta config file".to_string(),
        });
    }
    MetaConfig::deserialize(value).map_err(|e| Error::MetaConfig {
        path: filepath.to_path_buf(),
        reason: e.to_string(),
    })
}
