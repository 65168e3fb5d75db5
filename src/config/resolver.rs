//! Loading node config files and merging them over computed defaults.

use super::merge::merge_over_defaults;
use super::resolved::ConfigMap;
use crate::error::{BuildError, BuildResult};
use crate::types::FileTreeNode;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Produces a node's configuration from its (optional) config file.
///
/// With no file the defaults come back unchanged. With a file, its parsed
/// contents are merged over the defaults and win on collision. Failures are
/// returned, never panicked, and abort the enclosing build.
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    async fn resolve(
        &self,
        file: Option<&FileTreeNode>,
        defaults: ConfigMap,
    ) -> BuildResult<ConfigMap>;
}

/// Reads JSON and YAML config files from disk.
#[derive(Debug, Clone, Default)]
pub struct FileConfigResolver;

impl FileConfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// Parse config file contents according to the file's extension.
    ///
    /// `.json` is parsed strictly as JSON; everything else as YAML. An empty
    /// document yields an empty mapping.
    pub fn parse(file: &FileTreeNode, content: &str) -> BuildResult<ConfigMap> {
        let value: Value = if file.ext.eq_ignore_ascii_case(".json") {
            serde_json::from_str(content).map_err(|e| BuildError::parse(&file.path, e))?
        } else {
            serde_yaml::from_str(content).map_err(|e| BuildError::parse(&file.path, e))?
        };

        match value {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(ConfigMap::new()),
            _ => Err(BuildError::ConfigNotMapping {
                path: file.path.clone(),
            }),
        }
    }
}

#[async_trait]
impl ConfigResolver for FileConfigResolver {
    async fn resolve(
        &self,
        file: Option<&FileTreeNode>,
        defaults: ConfigMap,
    ) -> BuildResult<ConfigMap> {
        let Some(file) = file else {
            return Ok(defaults);
        };

        let content = tokio::fs::read_to_string(&file.path)
            .await
            .map_err(|source| BuildError::ConfigRead {
                path: file.path.clone(),
                source,
            })?;
        let overrides = Self::parse(file, &content)?;
        debug!(path = %file.path.display(), keys = overrides.len(), "loaded config file");

        Ok(merge_over_defaults(defaults, overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(base: &str) -> FileTreeNode {
        FileTreeNode::file(base, format!("components/{base}"), 1)
    }

    #[test]
    fn test_parse_yaml() {
        let map = FileConfigResolver::parse(
            &node("button.config.yml"),
            "title: Button\ntags:\n  - atom\n",
        )
        .unwrap();
        assert_eq!(map.get("title"), Some(&json!("Button")));
        assert_eq!(map.get("tags"), Some(&json!(["atom"])));
    }

    #[test]
    fn test_parse_json() {
        let map =
            FileConfigResolver::parse(&node("button.config.json"), r#"{"order": 4}"#).unwrap();
        assert_eq!(map.get("order"), Some(&json!(4)));
    }

    #[test]
    fn test_parse_empty_yaml_is_empty_mapping() {
        let map = FileConfigResolver::parse(&node("button.config.yaml"), "").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_mapping() {
        let err = FileConfigResolver::parse(&node("button.config.yml"), "- a\n- b\n").unwrap_err();
        assert!(matches!(err, BuildError::ConfigNotMapping { .. }));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = FileConfigResolver::parse(&node("button.config.json"), "{ order: ").unwrap_err();
        assert!(matches!(err, BuildError::ConfigParse { .. }));
        assert!(err.is_config_failure());
    }

    #[tokio::test]
    async fn test_resolve_without_file_returns_defaults() {
        let mut defaults = ConfigMap::new();
        defaults.insert("name".into(), json!("card"));
        let resolved = FileConfigResolver::new()
            .resolve(None, defaults.clone())
            .await
            .unwrap();
        assert_eq!(resolved, defaults);
    }

    #[tokio::test]
    async fn test_resolve_missing_file_is_read_error() {
        let file = FileTreeNode::file("gone.config.yml", "/definitely/not/here/gone.config.yml", 1);
        let err = FileConfigResolver::new()
            .resolve(Some(&file), ConfigMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::ConfigRead { .. }));
    }
}
