//! Deep merge for node config files and tool settings.
//!
//! Values from the overlay win on key collision. Objects are merged key by key,
//! arrays and scalars are replaced whole.

use super::resolved::ConfigMap;
use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - A null overlay keeps the base value (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use pattern_tree::config::deep_merge;
///
/// let defaults = json!({ "name": "button", "order": 3, "context": { "label": "Go" } });
/// let file = json!({ "order": 1, "context": { "size": "lg" } });
/// let merged = deep_merge(defaults, file);
/// assert_eq!(merged, json!({ "name": "button", "order": 1, "context": { "label": "Go", "size": "lg" } }));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            Value::Object(merge_maps(base_map, overlay_map))
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}

/// Merge a loaded config file's contents over computed defaults.
///
/// `defaults` is consumed; callers that need the original keep their own copy.
pub fn merge_over_defaults(defaults: ConfigMap, overrides: ConfigMap) -> ConfigMap {
    merge_maps(defaults, overrides)
}

fn merge_maps(mut base: ConfigMap, overlay: ConfigMap) -> ConfigMap {
    for (key, overlay_value) in overlay {
        let merged = match base.remove(&key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => overlay_value,
        };
        base.insert(key, merged);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_file_values_win_over_defaults() {
        let defaults = map(json!({"name": "button", "order": 2, "isHidden": false}));
        let file = map(json!({"order": 7, "status": "wip"}));
        let merged = merge_over_defaults(defaults, file);
        assert_eq!(
            Value::Object(merged),
            json!({"name": "button", "order": 7, "isHidden": false, "status": "wip"})
        );
    }

    #[test]
    fn test_nested_context_is_merged() {
        let base = json!({"context": {"title": "Card", "items": [1, 2]}});
        let overlay = json!({"context": {"items": [3]}});
        assert_eq!(
            deep_merge(base, overlay),
            json!({"context": {"title": "Card", "items": [3]}})
        );
    }

    #[test]
    fn test_null_keeps_default() {
        let defaults = map(json!({"name": "card", "order": 4}));
        let file = map(json!({"order": null}));
        let merged = merge_over_defaults(defaults, file);
        assert_eq!(merged.get("order"), Some(&json!(4)));
    }

    #[test]
    fn test_empty_overrides_leave_defaults_untouched() {
        let defaults = map(json!({"name": "card", "order": 4, "dir": "components/card"}));
        let merged = merge_over_defaults(defaults.clone(), ConfigMap::new());
        assert_eq!(merged, defaults);
    }

    #[test]
    fn test_merge_all_tiers() {
        let tiers = vec![
            json!({"conventions": {"view_ext": ".hbs", "readme_name": "readme"}}),
            json!({"conventions": {"view_ext": ".njk"}}),
            json!({"walk": {"hidden_prefix": "__"}}),
        ];
        assert_eq!(
            deep_merge_all(tiers),
            json!({
                "conventions": {"view_ext": ".njk", "readme_name": "readme"},
                "walk": {"hidden_prefix": "__"}
            })
        );
    }

    #[test]
    fn test_scalar_replaced_by_object() {
        let base = json!({"preview": "@preview"});
        let overlay = json!({"preview": {"handle": "@wide"}});
        assert_eq!(deep_merge(base, overlay), json!({"preview": {"handle": "@wide"}}));
    }
}
