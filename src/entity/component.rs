//! Leaf entity anchored to a single view file.

use crate::config::ResolvedConfig;
use crate::types::FileTreeNode;

/// Files a component is built from.
#[derive(Debug, Clone)]
pub struct ComponentFiles {
    pub view: FileTreeNode,
    pub readme: Option<FileTreeNode>,
    pub var_views: Vec<FileTreeNode>,
    pub other: Vec<FileTreeNode>,
}

impl ComponentFiles {
    pub fn new(view: FileTreeNode) -> Self {
        Self {
            view,
            readme: None,
            var_views: Vec::new(),
            other: Vec::new(),
        }
    }
}

/// A component. Immutable once created.
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
    handle: String,
    view_name: String,
    files: ComponentFiles,
    config: ResolvedConfig,
}

impl Component {
    /// Build a component from its resolved config and files.
    ///
    /// The handle comes from a `handle` key in the config when set, otherwise
    /// from the name, prefixed with the Source prefix when one is configured.
    pub fn create(config: ResolvedConfig, files: ComponentFiles) -> Self {
        let view_name = config
            .get_str("viewName")
            .map(str::to_string)
            .unwrap_or_else(|| files.view.name.clone());
        let name = match config.name() {
            "" => view_name.clone(),
            name => name.to_string(),
        };
        let handle = match config.get_str("handle") {
            Some(handle) => handle.to_string(),
            None => match config.source().and_then(|s| s.prefix.as_deref()) {
                Some(prefix) if !prefix.is_empty() => format!("{}-{}", prefix, name),
                _ => name.clone(),
            },
        };

        Self {
            name,
            handle,
            view_name,
            files,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    pub fn order(&self) -> f64 {
        self.config.order()
    }

    pub fn is_hidden(&self) -> bool {
        self.config.is_hidden()
    }

    pub fn view(&self) -> &FileTreeNode {
        &self.files.view
    }

    pub fn readme(&self) -> Option<&FileTreeNode> {
        self.files.readme.as_ref()
    }

    pub fn var_views(&self) -> &[FileTreeNode] {
        &self.files.var_views
    }

    pub fn other(&self) -> &[FileTreeNode] {
        &self.files.other
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }
}
