//! Configuration: per-node config files and tool settings.
//!
//! Per-node config files live inside the scanned tree next to the directory or
//! view they configure (`button.config.yml`). They are loaded by a
//! [`ConfigResolver`] and merged over defaults the builder computes.
//!
//! Tool settings configure the tool itself and are merged field-by-field
//! across tiers by [`SettingsLoader`].
//!
//! ## Environment Variables
//! - `PATTERN_TREE_CONFIG_PATH` - Explicit settings file (overrides all tiers)
//! - `PATTERN_TREE_USER_DIR` - User settings dir (default: `~/.pattern-tree`)

mod loader;
mod merge;
mod resolved;
mod resolver;
mod types;

pub use loader::{CONFIG_PATH_ENV, SettingsLoader, SettingsPaths, SettingsTier, USER_DIR_ENV};
pub use merge::{deep_merge, deep_merge_all, merge_over_defaults};
pub use resolved::{ConfigMap, ParentRef, ResolvedConfig};
pub use resolver::{ConfigResolver, FileConfigResolver};
pub use types::*;
