//! Tool settings loader with tier-based merging.
//!
//! Tiers, lowest to highest: built-in defaults, project file
//! (`./pattern-tree.yaml`), user file (`~/.pattern-tree/config.yaml`).
//! An explicit file (`PATTERN_TREE_CONFIG_PATH` or `--config`) replaces tier
//! discovery entirely.

use super::merge::deep_merge_all;
use super::types::Settings;
use crate::error::{BuildError, BuildResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "PATTERN_TREE_CONFIG_PATH";

/// Environment variable overriding the user settings directory.
pub const USER_DIR_ENV: &str = "PATTERN_TREE_USER_DIR";

/// Settings tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingsTier {
    Defaults = 0,
    Project = 1,
    User = 2,
    Explicit = 3,
}

impl std::fmt::Display for SettingsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsTier::Defaults => write!(f, "defaults"),
            SettingsTier::Project => write!(f, "project"),
            SettingsTier::User => write!(f, "user"),
            SettingsTier::Explicit => write!(f, "explicit"),
        }
    }
}

/// Locations of the settings files for each tier.
#[derive(Debug, Clone, Default)]
pub struct SettingsPaths {
    pub project_file: Option<PathBuf>,
    pub user_file: Option<PathBuf>,
    pub explicit_file: Option<PathBuf>,
}

impl SettingsPaths {
    /// Discover settings paths from the environment and the home directory.
    pub fn discover() -> Self {
        let user_dir = std::env::var(USER_DIR_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".pattern-tree")));

        Self {
            project_file: Some(PathBuf::from("pattern-tree.yaml")),
            user_file: user_dir.map(|d| d.join("config.yaml")),
            explicit_file: std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
        }
    }

    /// Paths with explicit tier files, ignoring the environment.
    pub fn with_files(project_file: Option<PathBuf>, user_file: Option<PathBuf>) -> Self {
        Self {
            project_file,
            user_file,
            explicit_file: None,
        }
    }

    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }
}

/// Loaded settings plus the files they came from.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    pub paths: SettingsPaths,
    settings: Settings,
    sources: Vec<(SettingsTier, PathBuf)>,
}

impl SettingsLoader {
    /// Load settings from discovered paths.
    pub fn load() -> BuildResult<Self> {
        Self::load_with_paths(SettingsPaths::discover())
    }

    /// Load settings with explicit paths.
    ///
    /// An explicit file must exist and parse. Tier files are optional, and a
    /// tier file that fails to parse is skipped with a warning.
    pub fn load_with_paths(paths: SettingsPaths) -> BuildResult<Self> {
        if let Some(ref explicit) = paths.explicit_file {
            let settings = Settings::load(explicit)?;
            let sources = vec![(SettingsTier::Explicit, explicit.clone())];
            return Ok(Self {
                paths,
                settings,
                sources,
            });
        }

        let mut layers: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        let defaults = serde_json::to_value(Settings::default())
            .map_err(|e| BuildError::Settings(e.to_string()))?;
        layers.push(defaults);

        let tiers = [
            (SettingsTier::Project, paths.project_file.as_deref()),
            (SettingsTier::User, paths.user_file.as_deref()),
        ];
        for (tier, file) in tiers {
            let Some(file) = file else { continue };
            if let Some(layer) = read_layer(file) {
                debug!(tier = %tier, path = %file.display(), "loaded settings tier");
                layers.push(layer);
                sources.push((tier, file.to_path_buf()));
            }
        }

        let merged = deep_merge_all(layers);
        let settings: Settings =
            serde_json::from_value(merged).map_err(|e| BuildError::Settings(e.to_string()))?;

        Ok(Self {
            paths,
            settings,
            sources,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Files that contributed to the loaded settings, lowest tier first.
    pub fn sources(&self) -> &[(SettingsTier, PathBuf)] {
        &self.sources
    }
}

fn read_layer(file: &Path) -> Option<Value> {
    if !file.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %file.display(), error = %e, "cannot read settings file, skipping");
            return None;
        }
    };
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %file.display(), error = %e, "invalid settings file, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_files_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let paths = SettingsPaths::with_files(
            Some(dir.path().join("missing.yaml")),
            Some(dir.path().join("also-missing.yaml")),
        );
        let loader = SettingsLoader::load_with_paths(paths).unwrap();
        assert_eq!(loader.settings(), &Settings::default());
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_user_tier_overrides_project_tier() {
        let dir = TempDir::new().unwrap();
        let project = write(
            &dir,
            "project.yaml",
            "conventions:\n  view_ext: .njk\n  readme_name: notes\n",
        );
        let user = write(&dir, "user.yaml", "conventions:\n  view_ext: .twig\n");
        let loader =
            SettingsLoader::load_with_paths(SettingsPaths::with_files(Some(project), Some(user)))
                .unwrap();

        let conventions = &loader.settings().conventions;
        assert_eq!(conventions.view_ext, ".twig");
        assert_eq!(conventions.readme_name, "notes");
        assert_eq!(conventions.config_suffix, ".config");
        assert_eq!(loader.sources().len(), 2);
        assert_eq!(loader.sources()[0].0, SettingsTier::Project);
    }

    #[test]
    fn test_invalid_tier_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let project = write(&dir, "project.yaml", "conventions: [unclosed\n");
        let loader =
            SettingsLoader::load_with_paths(SettingsPaths::with_files(Some(project), None))
                .unwrap();
        assert_eq!(loader.settings(), &Settings::default());
        assert!(loader.sources().is_empty());
    }

    #[test]
    fn test_explicit_file_replaces_tiers() {
        let dir = TempDir::new().unwrap();
        let project = write(&dir, "project.yaml", "walk:\n  hidden_prefix: '~'\n");
        let explicit = write(&dir, "explicit.yaml", "source:\n  prefix: acme\n");
        let paths = SettingsPaths::with_files(Some(project), None).with_explicit(&explicit);
        let loader = SettingsLoader::load_with_paths(paths).unwrap();

        assert_eq!(loader.settings().walk.hidden_prefix, "_");
        assert_eq!(loader.settings().source.prefix.as_deref(), Some("acme"));
        assert_eq!(loader.sources(), &[(SettingsTier::Explicit, explicit)]);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let paths = SettingsPaths::default().with_explicit("/nope/settings.yaml");
        assert!(SettingsLoader::load_with_paths(paths).is_err());
    }
}
