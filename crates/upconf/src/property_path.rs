//! Extraction of nested values by property path.
//!
//! A [`PropertyPath`] names the section of a document that belongs to an
//! application, e.g. `"myapp"` inside `package.json` or `"tools.myapp"` in a
//! shared YAML file.

use std::fmt;

use serde_json::Value;

/// A path into a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyPath {
    /// A dot-separated path such as `"tools.myapp"`.
    ///
    /// A key that literally contains the whole string (dots included) takes
    /// precedence over the split path.
    Dotted(String),
    /// Explicit path segments, used verbatim.
    Segments(Vec<String>),
}

impl PropertyPath {
    /// Project `source` through this path.
    ///
    /// Returns `None` when any segment is missing. Array elements are
    /// addressed with numeric segments.
    pub fn project(&self, source: &Value) -> Option<Value> {
        match self {
            PropertyPath::Dotted(path) => {
                if let Some(value) = source.as_object().and_then(|map| map.get(path)) {
                    return Some(value.clone());
                }
                walk(source, path.split('.'))
            }
            PropertyPath::Segments(segments) => walk(source, segments.iter().map(String::as_str)),
        }
    }
}

fn walk<'a>(source: &Value, segments: impl Iterator<Item = &'a str>) -> Option<Value> {
    let mut current = source;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

impl From<&str> for PropertyPath {
    fn from(path: &str) -> Self {
        PropertyPath::Dotted(path.to_string())
    }
}

impl From<String> for PropertyPath {
    fn from(path: String) -> Self {
        PropertyPath::Dotted(path)
    }
}

impl From<Vec<String>> for PropertyPath {
    fn from(segments: Vec<String>) -> Self {
        PropertyPath::Segments(segments)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPath::Dotted(path) => f.write_str(path),
            PropertyPath::Segments(segments) => f.write_str(&segments.join(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_single_key() {
        let doc = json!({"myapp": {"x": 1}, "name": "pkg"});
        let path = PropertyPath::from("myapp");
        assert_eq!(path.project(&doc), Some(json!({"x": 1})));
    }

    #[test]
    fn test_dotted_path() {
        let doc = json!({"tools": {"myapp": {"level": "debug"}}});
        let path = PropertyPath::from("tools.myapp.level");
        assert_eq!(path.project(&doc), Some(json!("debug")));
    }

    #[test]
    fn test_literal_dotted_key_wins() {
        let doc = json!({"a.b": 1, "a": {"b": 2}});
        assert_eq!(PropertyPath::from("a.b").project(&doc), Some(json!(1)));
    }

    #[test]
    fn test_segments_do_not_split() {
        let doc = json!({"a.b": 1, "a": {"b": 2}});
        let path = PropertyPath::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(path.project(&doc), Some(json!(2)));
    }

    #[test]
    fn test_array_index() {
        let doc = json!({"profiles": [{"name": "dev"}, {"name": "prod"}]});
        let path = PropertyPath::from("profiles.1.name");
        assert_eq!(path.project(&doc), Some(json!("prod")));
        assert_eq!(PropertyPath::from("profiles.7").project(&doc), None);
        assert_eq!(PropertyPath::from("profiles.first").project(&doc), None);
    }

    #[test]
    fn test_missing_segment() {
        let doc = json!({"other": {}});
        assert_eq!(PropertyPath::from("myapp").project(&doc), None);
        assert_eq!(PropertyPath::from("other.deep.key").project(&doc), None);
    }

    #[test]
    fn test_scalar_source() {
        assert_eq!(PropertyPath::from("myapp").project(&json!(42)), None);
        assert_eq!(PropertyPath::from("myapp").project(&Value::Null), None);
    }

    #[test]
    fn test_null_leaf_is_preserved() {
        let doc = json!({"myapp": null});
        assert_eq!(PropertyPath::from("myapp").project(&doc), Some(Value::Null));
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyPath::from("a.b").to_string(), "a.b");
        let segments = PropertyPath::from(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(segments.to_string(), "x.y");
    }
}
