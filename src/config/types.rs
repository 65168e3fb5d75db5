//! Tool settings types.
//!
//! These configure the tool itself (naming conventions, walker behavior,
//! Source fallbacks). They are distinct from the per-node config files found
//! inside the scanned tree.

use crate::error::{BuildError, BuildResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub conventions: Conventions,

    #[serde(default)]
    pub source: SourceDefaults,

    #[serde(default)]
    pub walk: WalkSettings,
}

impl Settings {
    /// Load settings from a single YAML file, filling gaps with defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> BuildResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BuildError::Settings(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| BuildError::Settings(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

/// File naming conventions used to classify files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Extension of view templates, with leading dot.
    #[serde(default = "default_view_ext")]
    pub view_ext: String,

    /// Separator that marks a view as a variant (`button.primary.hbs`).
    #[serde(default = "default_variant_separator")]
    pub variant_separator: String,

    /// Suffix a config file's name ends with (`button.config.yml`).
    #[serde(default = "default_config_suffix")]
    pub config_suffix: String,

    /// Extensions accepted for config files.
    #[serde(default = "default_config_exts")]
    pub config_exts: Vec<String>,

    /// Readme file name without extension, compared case-insensitively.
    #[serde(default = "default_readme_name")]
    pub readme_name: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            view_ext: default_view_ext(),
            variant_separator: default_variant_separator(),
            config_suffix: default_config_suffix(),
            config_exts: default_config_exts(),
            readme_name: default_readme_name(),
        }
    }
}

fn default_view_ext() -> String {
    ".hbs".to_string()
}

fn default_variant_separator() -> String {
    ".".to_string()
}

fn default_config_suffix() -> String {
    ".config".to_string()
}

fn default_config_exts() -> Vec<String> {
    vec![".json".to_string(), ".yaml".to_string(), ".yml".to_string()]
}

fn default_readme_name() -> String {
    "readme".to_string()
}

/// Fallback values for the Source's cross-cutting fields, used when the root
/// directory's config does not set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDefaults {
    /// Name of the root collection.
    #[serde(default = "default_source_name")]
    pub name: String,

    #[serde(default = "default_status")]
    pub status: Option<String>,

    #[serde(default = "default_preview")]
    pub preview: Option<String>,

    #[serde(default)]
    pub display: Map<String, Value>,

    #[serde(default)]
    pub prefix: Option<String>,
}

impl Default for SourceDefaults {
    fn default() -> Self {
        Self {
            name: default_source_name(),
            status: default_status(),
            preview: default_preview(),
            display: Map::new(),
            prefix: None,
        }
    }
}

fn default_source_name() -> String {
    "components".to_string()
}

fn default_status() -> Option<String> {
    Some("ready".to_string())
}

fn default_preview() -> Option<String> {
    None
}

/// Filesystem walker behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkSettings {
    /// Prefix that marks an entry (and everything under it) hidden.
    #[serde(default = "default_hidden_prefix")]
    pub hidden_prefix: String,

    /// Skip entries whose name starts with a dot.
    #[serde(default = "default_skip_dotfiles")]
    pub skip_dotfiles: bool,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            hidden_prefix: default_hidden_prefix(),
            skip_dotfiles: default_skip_dotfiles(),
        }
    }
}

fn default_hidden_prefix() -> String {
    "_".to_string()
}

fn default_skip_dotfiles() -> bool {
    true
}
