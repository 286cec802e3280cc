//! Session configuration for an [`Explorer`](crate::Explorer).
//!
//! [`ExplorerOptions::new`] produces the conventional setup for an
//! application: the default search places for its name, the built-in loaders,
//! its name as the `package.json` property, and the home directory as the
//! highest directory the search may reach.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::LoaderError;
use crate::loaders::Loaders;
use crate::meta::MetaConfig;
use crate::paths;
use crate::property_path::PropertyPath;
use crate::result::ResolvedConfig;

/// Post-processing hook applied to every search and load result.
pub type Transform = Arc<
    dyn Fn(Option<ResolvedConfig>) -> Result<Option<ResolvedConfig>, LoaderError> + Send + Sync,
>;

/// Placeholder replaced by the module name in meta-config search places.
const NAME_PLACEHOLDER: &str = "{name}";

/// Options controlling one explorer session.
#[derive(Clone)]
pub struct ExplorerOptions {
    /// Name of the application whose configuration is being looked up.
    pub module_name: String,

    /// Candidate file names, relative to each directory, in priority order.
    pub search_places: Vec<String>,

    /// Parsers keyed by extension.
    pub loaders: Loaders,

    /// Section of `package.json` (and of the meta-config file) that holds
    /// this application's configuration.
    pub package_prop: PropertyPath,

    /// Highest directory the search may inspect (inclusive).
    pub stop_dir: PathBuf,

    /// Memoize search and load outcomes for the lifetime of the explorer.
    pub cache: bool,

    /// Skip files that exist but hold no configuration and keep searching.
    pub ignore_empty_search_places: bool,

    /// Project every loaded file through `package_prop`, not only
    /// `package.json`.
    pub apply_package_property_path_to_configuration: bool,

    /// File tried before the directory walk; a non-empty result there wins.
    pub meta_config_file_path: Option<PathBuf>,

    /// Hook applied to every result before it is returned.
    pub transform: Option<Transform>,
}

impl ExplorerOptions {
    /// Conventional options for `module_name`.
    pub fn new(module_name: impl Into<String>) -> Self {
        let module_name = module_name.into();
        Self {
            search_places: default_search_places(&module_name),
            loaders: Loaders::with_defaults(),
            package_prop: PropertyPath::Dotted(module_name.clone()),
            stop_dir: paths::home_dir().unwrap_or_else(|| PathBuf::from(std::path::MAIN_SEPARATOR_STR)),
            cache: true,
            ignore_empty_search_places: true,
            apply_package_property_path_to_configuration: false,
            meta_config_file_path: None,
            transform: None,
            module_name,
        }
    }

    /// Set the transform hook.
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Option<ResolvedConfig>) -> Result<Option<ResolvedConfig>, LoaderError>
            + Send
            + Sync
            + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Layer a discovered meta-config over these options.
    ///
    /// Search places from the meta-config replace the current ones, with
    /// `{name}` expanded to the module name, and the meta-config file becomes
    /// the file `search` consults first.
    pub fn apply_meta_config(&mut self, filepath: PathBuf, meta: &MetaConfig) {
        if let Some(places) = &meta.search_places {
            self.search_places = places
                .iter()
                .map(|place| place.replace(NAME_PLACEHOLDER, &self.module_name))
                .collect();
        }
        if let Some(ignore) = meta.ignore_empty_search_places {
            self.ignore_empty_search_places = ignore;
        }
        self.meta_config_file_path = Some(filepath);
    }
}

impl fmt::Debug for ExplorerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplorerOptions")
            .field("module_name", &self.module_name)
            .field("search_places", &self.search_places)
            .field("loaders", &self.loaders)
            .field("package_prop", &self.package_prop)
            .field("stop_dir", &self.stop_dir)
            .field("cache", &self.cache)
            .field("ignore_empty_search_places", &self.ignore_empty_search_places)
            .field(
                "apply_package_property_path_to_configuration",
                &self.apply_package_property_path_to_configuration,
            )
            .field("meta_config_file_path", &self.meta_config_file_path)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// The conventional candidate files for `module_name`, highest priority first.
pub fn default_search_places(module_name: &str) -> Vec<String> {
    let mut places = vec!["package.json".to_string(), format!(".{module_name}rc")];
    for ext in ["json", "yaml", "yml", "toml"] {
        places.push(format!(".{module_name}rc.{ext}"));
    }
    places.push(format!(".config/{module_name}rc"));
    for ext in ["json", "yaml", "yml", "toml"] {
        places.push(format!(".config/{module_name}rc.{ext}"));
    }
    for ext in ["json", "yaml", "yml", "toml"] {
        places.push(format!("{module_name}.config.{ext}"));
    }
    places
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_search_places_order() {
        let places = default_search_places("myapp");
        assert_eq!(places.len(), 15);
        assert_eq!(places[0], "package.json");
        assert_eq!(places[1], ".myapprc");
        assert_eq!(places[2], ".myapprc.json");
        assert_eq!(places[6], ".config/myapprc");
        assert_eq!(places[14], "myapp.config.toml");
    }

    #[test]
    fn test_new_defaults() {
        let options = ExplorerOptions::new("myapp");
        assert_eq!(options.module_name, "myapp");
        assert_eq!(options.package_prop, PropertyPath::from("myapp"));
        assert!(options.cache);
        assert!(options.ignore_empty_search_places);
        assert!(!options.apply_package_property_path_to_configuration);
        assert!(options.meta_config_file_path.is_none());
        assert!(options.transform.is_none());
        assert!(options.stop_dir.is_absolute());
    }

    #[test]
    fn test_apply_meta_config_expands_name() {
        let mut options = ExplorerOptions::new("myapp");
        let meta = MetaConfig {
            search_places: Some(vec!["{name}.yaml".to_string(), "conf/{name}.json".to_string()]),
            ignore_empty_search_places: Some(false),
        };
        options.apply_meta_config(PathBuf::from("/proj/.config/config.yaml"), &meta);

        assert_eq!(options.search_places, vec!["myapp.yaml", "conf/myapp.json"]);
        assert!(!options.ignore_empty_search_places);
        assert_eq!(
            options.meta_config_file_path,
            Some(PathBuf::from("/proj/.config/config.yaml"))
        );
    }

    #[test]
    fn test_apply_empty_meta_config_keeps_defaults() {
        let mut options = ExplorerOptions::new("myapp");
        options.apply_meta_config(PathBuf::from("/proj/package.json"), &MetaConfig::default());
        assert_eq!(options.search_places, default_search_places("myapp"));
        assert!(options.ignore_empty_search_places);
        assert!(options.meta_config_file_path.is_some());
    }

    #[test]
    fn test_debug_hides_transform_body() {
        let options = ExplorerOptions::new("myapp").with_transform(Ok);
        let rendered = format!("{options:?}");
        assert!(rendered.contains("transform: true"));
    }
}
