//! Extension-keyed parsers for configuration files.
//!
//! A [`Loaders`] table maps a [`LoaderKey`] to a parse function. Lookup for a
//! file is an explicit ordered chain: the file's extension, then
//! [`LoaderKey::NoExtension`] for files without one, then
//! [`LoaderKey::Default`]. When nothing matches the caller gets
//! [`Error::NoLoader`].
//!
//! Parse functions return `Ok(None)` for "no configuration in this file" and
//! `Ok(Some(Value::Null))` for an explicit null document, which callers treat
//! as if the file were absent.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, LoaderError, Result};

/// Signature of a loader: `(filepath, contents) -> parsed value`.
pub type LoaderFn = dyn Fn(&Path, &str) -> std::result::Result<Option<Value>, LoaderError> + Send + Sync;

/// Key of a [`Loaders`] table entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoaderKey {
    /// Files with this extension (stored without the leading dot).
    Extension(String),
    /// Files without an extension, such as `.myapprc`.
    NoExtension,
    /// Fallback for any file no other entry matches.
    Default,
}

impl LoaderKey {
    /// Key for an extension; a leading dot is accepted and stripped.
    pub fn extension(ext: &str) -> Self {
        LoaderKey::Extension(ext.strip_prefix('.').unwrap_or(ext).to_string())
    }
}

/// Mapping from file extension to parse function.
#[derive(Clone, Default)]
pub struct Loaders {
    entries: HashMap<LoaderKey, Arc<LoaderFn>>,
}

impl Loaders {
    /// An empty table. Every load fails with [`Error::NoLoader`] until
    /// entries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table: JSON, YAML (`yaml`, `yml` and extensionless
    /// files) and TOML.
    pub fn with_defaults() -> Self {
        let mut loaders = Self::new();
        loaders.insert(LoaderKey::extension("json"), load_json);
        loaders.insert(LoaderKey::extension("yaml"), load_yaml);
        loaders.insert(LoaderKey::extension("yml"), load_yaml);
        loaders.insert(LoaderKey::extension("toml"), load_toml);
        loaders.insert(LoaderKey::NoExtension, load_yaml);
        loaders
    }

    /// Register `loader` under `key`, replacing any previous entry.
    pub fn insert<F>(&mut self, key: LoaderKey, loader: F) -> &mut Self
    where
        F: Fn(&Path, &str) -> std::result::Result<Option<Value>, LoaderError> + Send + Sync + 'static,
    {
        self.entries.insert(key, Arc::new(loader));
        self
    }

    /// Remove the entry for `key`, returning whether one existed.
    pub fn remove(&mut self, key: &LoaderKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// The loader registered under exactly `key`.
    pub fn get(&self, key: &LoaderKey) -> Option<Arc<LoaderFn>> {
        self.entries.get(key).cloned()
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &LoaderKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Pick the loader for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLoader`] when neither the specific entry nor
    /// [`LoaderKey::Default`] exists.
    pub fn resolve(&self, path: &Path) -> Result<Arc<LoaderFn>> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned());
        let specific = match &extension {
            Some(ext) => LoaderKey::Extension(ext.clone()),
            None => LoaderKey::NoExtension,
        };

        self.get(&specific)
            .or_else(|| self.get(&LoaderKey::Default))
            .ok_or(Error::NoLoader { extension })
    }
}

impl fmt::Debug for Loaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .entries
            .keys()
            .map(|key| match key {
                LoaderKey::Extension(ext) => format!(".{ext}"),
                LoaderKey::NoExtension => "noExt".to_string(),
                LoaderKey::Default => "default".to_string(),
            })
            .collect();
        keys.sort();
        f.debug_struct("Loaders").field("keys", &keys).finish()
    }
}

// ---------------------------------------------------------------------------
// Built-in loaders
// ---------------------------------------------------------------------------

/// Parse JSON.
pub fn load_json(_path: &Path, contents: &str) -> std::result::Result<Option<Value>, LoaderError> {
    if contents.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(contents)?;
    Ok(non_empty(value))
}

/// Parse YAML.
pub fn load_yaml(_path: &Path, contents: &str) -> std::result::Result<Option<Value>, LoaderError> {
    if contents.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_yaml::from_str(contents)?;
    Ok(non_empty(value))
}

/// Parse TOML.
pub fn load_toml(_path: &Path, contents: &str) -> std::result::Result<Option<Value>, LoaderError> {
    if contents.trim().is_empty() {
        return Ok(None);
    }
    let table: toml::Table = toml::from_str(contents)?;
    Ok(non_empty(toml_table_to_json(table)))
}

fn toml_table_to_json(table: toml::Table) -> Value {
    Value::Object(
        table
            .into_iter()
            .map(|(key, value)| (key, toml_to_json(value)))
            .collect(),
    )
}

/// Datetimes become their RFC 3339 text; non-finite floats become null.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => toml_table_to_json(table),
    }
}

/// An empty top-level mapping carries no configuration.
pub(crate) fn non_empty(value: Value) -> Option<Value> {
    match &value {
        Value::Object(map) if map.is_empty() => None,
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_resolve_by_extension() {
        let loaders = Loaders::with_defaults();
        let loader = loaders.resolve(Path::new("/a/.apprc.json")).unwrap();
        let value = loader(Path::new("/a/.apprc.json"), r#"{"x": 1}"#).unwrap();
        assert_eq!(value, Some(json!({"x": 1})));
    }

    #[test]
    fn test_resolve_no_extension_uses_yaml() {
        let loaders = Loaders::with_defaults();
        let path = Path::new("/a/.apprc");
        let loader = loaders.resolve(path).unwrap();
        let value = loader(path, "x: 1\nname: demo\n").unwrap();
        assert_eq!(value, Some(json!({"x": 1, "name": "demo"})));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let mut loaders = Loaders::new();
        loaders.insert(LoaderKey::Default, |_, contents| {
            Ok(Some(Value::String(contents.trim().to_string())))
        });
        let path = Path::new("/a/app.ini");
        let loader = loaders.resolve(path).unwrap();
        assert_eq!(loader(path, "raw\n").unwrap(), Some(json!("raw")));
    }

    #[test]
    fn test_resolve_specific_beats_default() {
        let mut loaders = Loaders::new();
        loaders.insert(LoaderKey::Default, |_, _| Ok(Some(json!("default"))));
        loaders.insert(LoaderKey::extension(".json"), |_, _| Ok(Some(json!("json"))));
        let path = Path::new("/a/app.json");
        assert_eq!(loaders.resolve(path).unwrap()(path, "").unwrap(), Some(json!("json")));
    }

    #[test]
    fn test_resolve_missing_loader_names_extension() {
        let loaders = Loaders::with_defaults();
        let err = loaders.resolve(Path::new("/a/app.ini")).err().unwrap();
        assert!(matches!(&err, Error::NoLoader { extension: Some(ext) } if ext == "ini"));
        assert!(err.to_string().contains(".ini"));
    }

    #[test]
    fn test_resolve_missing_no_extension_loader() {
        let mut loaders = Loaders::with_defaults();
        assert!(loaders.remove(&LoaderKey::NoExtension));
        let err = loaders.resolve(Path::new("/a/.apprc")).err().unwrap();
        assert!(matches!(err, Error::NoLoader { extension: None }));
    }

    #[test]
    fn test_extension_key_strips_dot() {
        assert_eq!(LoaderKey::extension(".yaml"), LoaderKey::extension("yaml"));
    }

    #[test]
    fn test_builtin_loaders_treat_empty_mapping_as_empty() {
        let path = Path::new("/a/x");
        assert_eq!(load_json(path, "{}").unwrap(), None);
        assert_eq!(load_json(path, "  \n").unwrap(), None);
        assert_eq!(load_yaml(path, "{}").unwrap(), None);
        assert_eq!(load_toml(path, "# only a comment\n").unwrap(), None);
    }

    #[test]
    fn test_builtin_loaders_keep_null() {
        let path = Path::new("/a/x");
        assert_eq!(load_json(path, "null").unwrap(), Some(Value::Null));
        assert_eq!(load_yaml(path, "~").unwrap(), Some(Value::Null));
    }

    #[test]
    fn test_load_toml_tables() {
        let value = load_toml(
            Path::new("/a/app.toml"),
            "name = \"demo\"\n[server]\nport = 8080\n",
        )
        .unwrap();
        assert_eq!(value, Some(json!({"name": "demo", "server": {"port": 8080}})));
    }

    #[test]
    fn test_load_toml_datetimes_are_strings() {
        let value = load_toml(
            Path::new("/a/app.toml"),
            "when = 1979-05-27T07:32:00Z\nday = 1979-05-27\n[window]\nopens = 07:32:00\n",
        )
        .unwrap();
        assert_eq!(
            value,
            Some(json!({
                "when": "1979-05-27T07:32:00Z",
                "day": "1979-05-27",
                "window": {"opens": "07:32:00"}
            }))
        );
    }

    #[test]
    fn test_load_toml_arrays_of_tables() {
        let value = load_toml(
            Path::new("/a/app.toml"),
            "[[server]]\nport = 1\n[[server]]\nport = 2\nratio = 0.5\n",
        )
        .unwrap();
        assert_eq!(
            value,
            Some(json!({"server": [{"port": 1}, {"port": 2, "ratio": 0.5}]}))
        );
    }

    #[test]
    fn test_builtin_loaders_report_syntax_errors() {
        let path = Path::new("/a/x");
        assert!(load_json(path, "{not json").is_err());
        assert!(load_yaml(path, "key: [unterminated").is_err());
        assert!(load_toml(path, "= broken").is_err());
    }

    #[test]
    fn test_debug_lists_keys() {
        let rendered = format!("{:?}", Loaders::with_defaults());
        assert!(rendered.contains(".json"));
        assert!(rendered.contains("noExt"));
    }
}
