//! The value returned by a successful search or load.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Outcome of a search or load: `None` when nothing was found.
///
/// Results are reference-counted so that cached lookups hand every caller
/// the same allocation.
pub type SearchResult = Option<Arc<ResolvedConfig>>;

/// A configuration file that was found and parsed.
///
/// A file that exists but holds no configuration (blank contents, an empty
/// document, or a missing property path) is represented with `config == None`;
/// [`is_empty`](Self::is_empty) is derived from that, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    filepath: PathBuf,
    config: Option<Value>,
}

impl ResolvedConfig {
    /// A file at `filepath` that parsed to `config`.
    pub fn new(filepath: impl Into<PathBuf>, config: Value) -> Self {
        Self {
            filepath: filepath.into(),
            config: Some(config),
        }
    }

    /// A file at `filepath` that exists but holds no configuration.
    pub fn empty(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            config: None,
        }
    }

    /// Absolute path of the file the configuration came from.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    /// The parsed configuration, or `None` for an empty file.
    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    /// Whether the file existed but held no configuration.
    pub fn is_empty(&self) -> bool {
        self.config.is_none()
    }

    /// Consume the result, returning the parsed configuration.
    pub fn into_config(self) -> Option<Value> {
        self.config
    }

    /// Deserialize the configuration into a typed struct.
    ///
    /// Returns `Ok(None)` for an empty result.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.config
            .as_ref()
            .map(|value| T::deserialize(value))
            .transpose()
    }
}

// `isEmpty` is written out explicitly so consumers of the JSON form do not
// have to infer it from a `null` config.
impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedConfig", 3)?;
        state.serialize_field("filepath", &self.filepath)?;
        state.serialize_field("config", &self.config)?;
        state.serialize_field("isEmpty", &self.is_empty())?;
        state.end()
    }
}
