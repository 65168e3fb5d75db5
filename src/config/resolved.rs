//! Resolved per-node configuration.

use crate::entity::SourceRef;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Option name to value mapping, as loaded from a config file.
pub type ConfigMap = Map<String, Value>;

/// Link from a node's config to the collection that owns it.
///
/// This is a lightweight handle, not an owning pointer: collections own their
/// children, children only remember who their parent is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub name: String,
    pub dir: PathBuf,
    /// True when the parent is the Source itself.
    pub is_source: bool,
}

/// Configuration for a single Component or Collection.
///
/// `values` is exactly what the resolver returned (defaults merged with the
/// node's config file, if any). `parent` and `source` are attached by the
/// builder and never appear in `values`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    values: ConfigMap,
    parent: Option<ParentRef>,
    source: Option<SourceRef>,
}

impl ResolvedConfig {
    pub fn new(values: ConfigMap, parent: Option<ParentRef>) -> Self {
        Self {
            values,
            parent,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn values(&self) -> &ConfigMap {
        &self.values
    }

    pub fn into_values(self) -> ConfigMap {
        self.values
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn name(&self) -> &str {
        self.get_str("name").unwrap_or_default()
    }

    /// Sort order. Accepts integers, floats and numeric strings, since config
    /// files are hand-written. Anything else, including non-finite values,
    /// sorts as 0.
    pub fn order(&self) -> f64 {
        let order = match self.get("order") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        order.filter(|o| o.is_finite()).unwrap_or(0.0)
    }

    pub fn is_hidden(&self) -> bool {
        self.get("isHidden").and_then(Value::as_bool).unwrap_or(false)
    }

    /// `dir` as a path, when present.
    pub fn dir(&self) -> Option<PathBuf> {
        self.get_str("dir").map(PathBuf::from)
    }

    /// Handle this config presents to its children.
    pub fn as_parent(&self, is_source: bool) -> ParentRef {
        ParentRef {
            name: self.name().to_string(),
            dir: self.dir().unwrap_or_default(),
            is_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> ResolvedConfig {
        let Value::Object(map) = value else {
            panic!("expected object");
        };
        ResolvedConfig::new(map, None)
    }

    #[test]
    fn test_typed_accessors() {
        let c = config(json!({"name": "button", "order": 3, "isHidden": true, "dir": "a/button"}));
        assert_eq!(c.name(), "button");
        assert_eq!(c.order(), 3.0);
        assert!(c.is_hidden());
        assert_eq!(c.dir(), Some(PathBuf::from("a/button")));
        assert!(c.parent().is_none());
        assert!(c.source().is_none());
    }

    #[test]
    fn test_order_from_float_and_string() {
        assert_eq!(config(json!({"order": 2.9})).order(), 2.9);
        assert_eq!(config(json!({"order": " 12 "})).order(), 12.0);
        assert_eq!(config(json!({"order": "-0.5"})).order(), -0.5);
        assert_eq!(config(json!({"order": "first"})).order(), 0.0);
        assert_eq!(config(json!({"order": "inf"})).order(), 0.0);
        assert_eq!(config(json!({})).order(), 0.0);
    }

    #[test]
    fn test_null_values_read_as_absent() {
        let c = config(json!({"name": null, "isHidden": null}));
        assert_eq!(c.name(), "");
        assert!(!c.is_hidden());
        assert!(c.get("name").is_none());
        assert!(c.values().contains_key("name"));
    }

    #[test]
    fn test_as_parent() {
        let c = config(json!({"name": "forms", "dir": "components/forms"}));
        let parent = c.as_parent(false);
        assert_eq!(parent.name, "forms");
        assert_eq!(parent.dir, PathBuf::from("components/forms"));
        assert!(!parent.is_source);
    }
}
