//! [`Explorer`] -- upward configuration search and direct loading.
//!
//! An explorer is one session: one set of options, one loader table and two
//! independent caches. The search cache answers "what does a search starting
//! from this directory find?", the load cache "what does this exact file
//! contain?". Entries are never shared between them.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::cache::{Outcome, OutcomeCache};
use crate::error::{Error, Result};
use crate::loaders;
use crate::options::ExplorerOptions;
use crate::paths;
use crate::result::{ResolvedConfig, SearchResult};

/// File name of the package manifest, which is always parsed as JSON and
/// projected through `package_prop`.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Load-cache key. A meta-config load projects differently from a plain load
/// of the same file, so the two are cached apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LoadKey {
    path: PathBuf,
    force_projection: bool,
}

/// What a file's contents parsed to, before normalisation.
enum Parsed {
    /// Treat the file as if it did not exist.
    Absent,
    /// The file exists but holds no configuration.
    Empty,
    /// A configuration value.
    Value(Value),
}

/// A configuration search and load session.
///
/// `Explorer` is `Send + Sync`; share it between threads by reference or
/// behind an `Arc`. Overlapping calls for the same directory or file run the
/// underlying work once and observe the same result.
pub struct Explorer {
    options: ExplorerOptions,
    search_cache: Option<OutcomeCache<PathBuf>>,
    load_cache: Option<OutcomeCache<LoadKey>>,
}

impl Explorer {
    /// Start a session with `options`.
    pub fn new(options: ExplorerOptions) -> Self {
        let (search_cache, load_cache) = if options.cache {
            (Some(OutcomeCache::new()), Some(OutcomeCache::new()))
        } else {
            (None, None)
        };
        Self {
            options,
            search_cache,
            load_cache,
        }
    }

    /// The options this session was created with.
    pub fn options(&self) -> &ExplorerOptions {
        &self.options
    }

    /// Search for configuration, starting in `from` and walking up to the
    /// stop directory. An empty path starts in the current directory.
    ///
    /// The configured meta-config file, if any, is loaded first; a non-empty
    /// result there is returned without walking any directory.
    ///
    /// # Errors
    ///
    /// Propagates every failure except missing candidates: unreadable files,
    /// parse errors, unknown extensions and transform errors abort the
    /// search. A missing meta-config file is an error too.
    pub fn search(&self, from: impl AsRef<Path>) -> Result<SearchResult> {
        if let Some(meta_path) = &self.options.meta_config_file_path {
            let meta_path = paths::resolve(meta_path)?;
            let result = self.load_file(&meta_path, true)?;
            if result.as_ref().is_some_and(|found| !found.is_empty()) {
                debug!(path = %meta_path.display(), "using config from meta config file");
                return Ok(result);
            }
        }

        let stop_dir = paths::resolve(&self.options.stop_dir)?;
        let from = paths::resolve(from.as_ref())?;
        debug!(
            module = %self.options.module_name,
            from = %from.display(),
            stop_dir = %stop_dir.display(),
            "searching for config"
        );
        self.search_from(&from, &stop_dir)
    }

    /// Load the configuration file at `filepath`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file is missing or is a directory,
    /// and any read, parse or transform error.
    pub fn load(&self, filepath: impl AsRef<Path>) -> Result<SearchResult> {
        let filepath = paths::resolve(filepath.as_ref())?;
        self.load_file(&filepath, false)
    }

    /// Forget every memoized direct load.
    pub fn clear_load_cache(&self) {
        if let Some(cache) = &self.load_cache {
            debug!(entries = cache.len(), "clearing load cache");
            cache.clear();
        }
    }

    /// Forget every memoized search.
    pub fn clear_search_cache(&self) {
        if let Some(cache) = &self.search_cache {
            debug!(entries = cache.len(), "clearing search cache");
            cache.clear();
        }
    }

    /// Forget both caches.
    pub fn clear_caches(&self) {
        self.clear_load_cache();
        self.clear_search_cache();
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    fn search_from(&self, dir: &Path, stop_dir: &Path) -> Outcome {
        let run = || self.search_directory(dir, stop_dir);
        match &self.search_cache {
            Some(cache) => cache.get_or_compute(&dir.to_path_buf(), run),
            None => run(),
        }
    }

    fn search_directory(&self, dir: &Path, stop_dir: &Path) -> Outcome {
        if dir.is_dir() {
            trace!(dir = %dir.display(), "probing directory");
            for place in &self.options.search_places {
                let filepath = dir.join(place);
                match self.read_configuration(&filepath, false) {
                    Ok(Some(found))
                        if !(found.is_empty() && self.options.ignore_empty_search_places) =>
                    {
                        debug!(path = %filepath.display(), empty = found.is_empty(), "found config");
                        return self.transform(Some(found));
                    }
                    Ok(_) => {}
                    Err(Error::NotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        match dir.parent() {
            Some(parent) if dir != stop_dir => self.search_from(parent, stop_dir),
            _ => {
                trace!(dir = %dir.display(), "search stopped");
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    fn load_file(&self, filepath: &Path, force_projection: bool) -> Outcome {
        let run = || {
            debug!(path = %filepath.display(), force_projection, "loading config file");
            let found = self.read_configuration(filepath, force_projection)?;
            self.transform(found)
        };
        match &self.load_cache {
            Some(cache) => {
                let key = LoadKey {
                    path: filepath.to_path_buf(),
                    force_projection,
                };
                cache.get_or_compute(&key, run)
            }
            None => run(),
        }
    }

    /// Read and parse one file into the normalised tri-state result.
    fn read_configuration(
        &self,
        filepath: &Path,
        force_projection: bool,
    ) -> Result<Option<ResolvedConfig>> {
        let bytes =
            std::fs::read(filepath).map_err(|e| Error::from_read(filepath.to_path_buf(), e))?;
        // Invalid UTF-8 is replaced rather than rejected; the loader decides.
        let contents = String::from_utf8_lossy(&bytes);

        let is_manifest = filepath.file_name().is_some_and(|name| name == PACKAGE_MANIFEST);
        let value = match self.parse_contents(filepath, &contents, is_manifest)? {
            Parsed::Absent => return Ok(None),
            Parsed::Empty => return Ok(Some(ResolvedConfig::empty(filepath))),
            Parsed::Value(value) => value,
        };

        let project = !is_manifest
            && (self.options.apply_package_property_path_to_configuration || force_projection);
        let value = if project {
            self.options.package_prop.project(&value).and_then(loaders::non_empty)
        } else {
            Some(value)
        };

        Ok(Some(match value {
            Some(value) => ResolvedConfig::new(filepath, value),
            None => ResolvedConfig::empty(filepath),
        }))
    }

    fn parse_contents(&self, filepath: &Path, contents: &str, is_manifest: bool) -> Result<Parsed> {
        if contents.trim().is_empty() {
            return Ok(Parsed::Empty);
        }

        if is_manifest {
            let manifest: Value =
                serde_json::from_str(contents).map_err(|e| Error::Manifest {
                    path: filepath.to_path_buf(),
                    source: Arc::new(e),
                })?;
            return Ok(match self.options.package_prop.project(&manifest) {
                Some(Value::Null) | None => Parsed::Absent,
                Some(value) => match loaders::non_empty(value) {
                    Some(value) => Parsed::Value(value),
                    None => Parsed::Empty,
                },
            });
        }

        let loader = self.options.loaders.resolve(filepath)?;
        let parsed = loader(filepath, contents).map_err(|e| Error::Parse {
            path: filepath.to_path_buf(),
            source: Arc::from(e),
        })?;
        Ok(match parsed {
            None => Parsed::Empty,
            Some(Value::Null) => Parsed::Absent,
            Some(value) => Parsed::Value(value),
        })
    }

    fn transform(&self, result: Option<ResolvedConfig>) -> Outcome {
        let result = match &self.options.transform {
            Some(transform) => transform(result).map_err(|e| Error::Transform {
                source: Arc::from(e),
            })?,
            None => result,
        };
        Ok(result.map(Arc::new))
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
