//! The root collection and its cross-cutting state.

use super::collection::collect_components;
use super::component::Component;
use super::node::Node;
use crate::classify::{ConventionClassifier, FileClassifier};
use crate::config::{ConfigMap, ParentRef, ResolvedConfig, Settings};
use crate::types::FileTreeNode;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Back-reference from entities to the Source they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub name: String,
    pub dir: PathBuf,
    pub prefix: Option<String>,
}

/// State shared by the whole tree, seeded from the root directory's config.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceSettings {
    pub context: ConfigMap,
    pub tags: Vec<String>,
    pub status: Option<String>,
    pub preview: Option<String>,
    pub display: ConfigMap,
    pub prefix: Option<String>,
}

/// The long-lived root collection.
///
/// A Source outlives any single build. The builder seeds it once per build
/// from the root config and then fills in its items.
pub struct Source {
    name: String,
    dir: PathBuf,
    classifier: Arc<dyn FileClassifier>,
    settings: SourceSettings,
    config: Option<ResolvedConfig>,
    items: Vec<Node>,
}

impl Source {
    pub fn new(name: impl Into<String>, classifier: Arc<dyn FileClassifier>) -> Self {
        Self {
            name: name.into(),
            dir: PathBuf::new(),
            classifier,
            settings: SourceSettings::default(),
            config: None,
            items: Vec::new(),
        }
    }

    /// Create a Source using convention-based classification and the
    /// fallback field values from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let classifier = Arc::new(ConventionClassifier::new(settings.conventions.clone()));
        let defaults = &settings.source;
        let mut source = Self::new(defaults.name.clone(), classifier);
        source.settings = SourceSettings {
            status: defaults.status.clone(),
            preview: defaults.preview.clone(),
            display: defaults.display.clone(),
            prefix: defaults.prefix.clone(),
            ..SourceSettings::default()
        };
        source
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn classifier(&self) -> Arc<dyn FileClassifier> {
        Arc::clone(&self.classifier)
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    pub fn context(&self) -> &ConfigMap {
        &self.settings.context
    }

    pub fn tags(&self) -> &[String] {
        &self.settings.tags
    }

    pub fn set_context(&mut self, context: ConfigMap) {
        self.settings.context = context;
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.settings.tags = tags;
    }

    /// Apply the root directory's config to the cross-cutting fields.
    ///
    /// Each field is taken from the config when present and of the right
    /// shape, otherwise its prior value is kept.
    pub fn seed(&mut self, config: &ResolvedConfig) {
        if let Some(context) = config.get("context") {
            match context {
                Value::Object(map) => self.set_context(map.clone()),
                _ => warn!("root config `context` is not a mapping, ignoring"),
            }
        }
        if let Some(tags) = config.get("tags") {
            match tags {
                Value::Array(list) => {
                    let tags: Vec<String> = list
                        .iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect();
                    if tags.len() != list.len() {
                        warn!(
                            dropped = list.len() - tags.len(),
                            "root config `tags` has non-string entries, dropping them"
                        );
                    }
                    self.set_tags(tags);
                }
                _ => warn!("root config `tags` is not a list, ignoring"),
            }
        }
        if let Some(status) = config.get_str("status") {
            self.settings.status = Some(status.to_string());
        }
        if let Some(preview) = config.get_str("preview") {
            self.settings.preview = Some(preview.to_string());
        }
        if let Some(Value::Object(display)) = config.get("display") {
            self.settings.display = display.clone();
        }
        if let Some(prefix) = config.get_str("prefix") {
            self.settings.prefix = Some(prefix.to_string());
        }
        if let Some(dir) = config.dir() {
            self.dir = dir;
        }
        debug!(source = %self.name, tags = ?self.settings.tags, "seeded source from root config");
    }

    /// Handle carried by every entity built under this Source.
    pub fn handle(&self) -> SourceRef {
        SourceRef {
            name: self.name.clone(),
            dir: self.dir.clone(),
            prefix: self.settings.prefix.clone(),
        }
    }

    /// Parent link given to the root's direct children.
    pub fn parent_ref(&self) -> ParentRef {
        ParentRef {
            name: self.name.clone(),
            dir: self.dir.clone(),
            is_source: true,
        }
    }

    pub fn set_config(&mut self, config: ResolvedConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&ResolvedConfig> {
        self.config.as_ref()
    }

    pub fn set_items(&mut self, items: Vec<Node>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn components(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        collect_components(&self.items, &mut out);
        out
    }

    pub fn find(&self, handle: &str) -> Option<&Component> {
        self.components().into_iter().find(|c| c.handle() == handle)
    }
}

impl FileClassifier for Source {
    fn is_view(&self, file: &FileTreeNode) -> bool {
        self.classifier.is_view(file)
    }

    fn is_var_view(&self, file: &FileTreeNode) -> bool {
        self.classifier.is_var_view(file)
    }

    fn is_config(&self, file: &FileTreeNode) -> bool {
        self.classifier.is_config(file)
    }

    fn is_readme(&self, file: &FileTreeNode) -> bool {
        self.classifier.is_readme(file)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("dir", &self.dir)
            .field("settings", &self.settings)
            .field("items", &self.items.len())
            .finish_non_exhaustive()
    }
}
