//! Core types for the pattern tree builder.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether a tree entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Directory,
}

/// A filesystem entry as produced by the walker.
///
/// `name` is the display name: the base name with its extension, order
/// prefix and hidden prefix removed. `base` is the raw file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTreeNode {
    pub name: String,
    pub base: String,
    /// Last extension including the leading dot, empty for directories.
    #[serde(default)]
    pub ext: String,
    pub path: PathBuf,
    pub order: i64,
    #[serde(default)]
    pub is_hidden: bool,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileTreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collated: Option<bool>,
}

impl FileTreeNode {
    /// Create a file node. `base` is split into name and extension.
    pub fn file(base: impl Into<String>, path: impl Into<PathBuf>, order: i64) -> Self {
        let base = base.into();
        let (name, ext) = split_ext(&base);
        Self {
            name,
            ext,
            base,
            path: path.into(),
            order,
            is_hidden: false,
            kind: NodeKind::File,
            children: Vec::new(),
            collated: None,
        }
    }

    /// Create a directory node with the given children.
    pub fn dir(
        base: impl Into<String>,
        path: impl Into<PathBuf>,
        order: i64,
        children: Vec<FileTreeNode>,
    ) -> Self {
        let base = base.into();
        Self {
            name: base.clone(),
            ext: String::new(),
            base,
            path: path.into(),
            order,
            is_hidden: false,
            kind: NodeKind::Directory,
            children,
            collated: None,
        }
    }

    pub fn hidden(mut self, is_hidden: bool) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_collated(mut self, collated: bool) -> Self {
        self.collated = Some(collated);
        self
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Path as a display string with forward slashes.
    pub fn path_str(&self) -> String {
        path_to_forward_slashes(&self.path)
    }
}

/// Split a file name into (stem, ".ext"). Names without a dot, or whose only
/// dot is leading, have no extension.
pub fn split_ext(base: &str) -> (String, String) {
    match base.rfind('.') {
        Some(idx) if idx > 0 => (base[..idx].to_string(), base[idx..].to_string()),
        _ => (base.to_string(), String::new()),
    }
}

/// Render a path with forward slashes regardless of platform.
pub fn path_to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ext() {
        assert_eq!(
            split_ext("button.hbs"),
            ("button".to_string(), ".hbs".to_string())
        );
        assert_eq!(
            split_ext("button.config.yml"),
            ("button.config".to_string(), ".yml".to_string())
        );
        assert_eq!(split_ext("Makefile"), ("Makefile".to_string(), String::new()));
        assert_eq!(split_ext(".gitkeep"), (".gitkeep".to_string(), String::new()));
    }

    #[test]
    fn test_file_constructor_splits_name() {
        let node = FileTreeNode::file("card.primary.hbs", "components/card/card.primary.hbs", 2);
        assert_eq!(node.name, "card.primary");
        assert_eq!(node.ext, ".hbs");
        assert_eq!(node.base, "card.primary.hbs");
        assert!(node.is_file());
        assert!(!node.is_directory());
    }

    #[test]
    fn test_dir_constructor() {
        let node = FileTreeNode::dir("forms", "components/forms", 1, vec![]).hidden(true);
        assert_eq!(node.name, "forms");
        assert!(node.is_directory());
        assert!(node.is_hidden);
        assert!(node.ext.is_empty());
        assert!(node.collated.is_none());
    }
}
