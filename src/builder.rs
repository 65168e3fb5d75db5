//! Recursive tree builder.
//!
//! Turns a [`FileTreeNode`] tree into Components and ordered Collections.
//! Each directory is classified, its own config resolved, and then it becomes
//! either a Component (it holds a view named like itself) or a Collection
//! whose sub-directories and loose views are built concurrently and sorted
//! once all of them have finished.

use crate::classify::{ClassifiedSet, FileClassifier};
use crate::config::{ConfigMap, ConfigResolver, ParentRef, ResolvedConfig};
use crate::entity::{
    Collection, Component, ComponentFiles, Node, Source, SourceRef, order_items,
};
use crate::error::BuildResult;
use crate::types::FileTreeNode;
use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of building from the root directory.
#[derive(Debug)]
pub enum Root<'s> {
    /// The root was a collection; the Source now holds its items.
    Source(&'s Source),
    /// The root directory was itself a component.
    Component(Component),
}

impl Root<'_> {
    pub fn as_source(&self) -> Option<&Source> {
        match self {
            Root::Source(source) => Some(source),
            Root::Component(_) => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Root::Component(component) => Some(component),
            Root::Source(_) => None,
        }
    }
}

/// Read-only state shared by every recursive call of one build.
struct BuildContext {
    classifier: Arc<dyn FileClassifier>,
    source: SourceRef,
}

/// Builds component trees, resolving config through a [`ConfigResolver`].
#[derive(Clone)]
pub struct TreeBuilder {
    resolver: Arc<dyn ConfigResolver>,
}

impl TreeBuilder {
    pub fn new(resolver: Arc<dyn ConfigResolver>) -> Self {
        Self { resolver }
    }

    /// Build the tree rooted at `tree` into `source`.
    ///
    /// The Source is seeded from the root config exactly once, before any
    /// recursion, and only when the root is a collection. On failure nothing
    /// is attached to the Source.
    pub async fn build<'s>(
        &self,
        tree: &FileTreeNode,
        source: &'s mut Source,
    ) -> BuildResult<Root<'s>> {
        let classifier = source.classifier();
        let classified = ClassifiedSet::classify(tree, classifier.as_ref());
        let config = self.resolve_dir_config(tree, &classified, None).await?;

        if let Some(view) = classified.own_view(&tree.name) {
            let component = dir_component(tree, &classified, view, config, source.handle());
            info!(component = %component.handle(), "root directory is a component");
            return Ok(Root::Component(component));
        }

        source.seed(&config);
        let ctx = BuildContext {
            classifier,
            source: source.handle(),
        };
        let items = self
            .build_items(tree, &classified, source.parent_ref(), &ctx)
            .await?;

        source.set_config(config);
        source.set_items(items);
        info!(
            source = %source.name(),
            items = source.items().len(),
            components = source.components().len(),
            "built component tree"
        );
        Ok(Root::Source(source))
    }

    /// Build a non-root directory into a Component or Collection.
    fn build_dir<'a>(
        &'a self,
        dir: &'a FileTreeNode,
        parent: ParentRef,
        ctx: &'a BuildContext,
    ) -> BoxFuture<'a, BuildResult<Node>> {
        async move {
            let classified = ClassifiedSet::classify(dir, ctx.classifier.as_ref());
            let config = self
                .resolve_dir_config(dir, &classified, Some(parent))
                .await?;

            if let Some(view) = classified.own_view(&dir.name) {
                let component = dir_component(dir, &classified, view, config, ctx.source.clone());
                debug!(component = %component.handle(), path = %dir.path.display(), "built component");
                return Ok(Node::Component(component));
            }

            if classified.is_empty() {
                debug!(path = %dir.path.display(), "empty directory becomes an empty collection");
            }
            let mut collection = Collection::new(config, Vec::new()).with_source(ctx.source.clone());
            let items = self
                .build_items(dir, &classified, collection.parent_ref(), ctx)
                .await?;
            debug!(
                collection = %collection.name(),
                items = items.len(),
                "built collection"
            );
            collection.set_items(items);
            Ok(Node::Collection(collection))
        }
        .boxed()
    }

    /// Build a collection's children: every sub-directory and every loose
    /// view, all started together, joined, then ordered.
    async fn build_items(
        &self,
        dir: &FileTreeNode,
        classified: &ClassifiedSet<'_>,
        parent: ParentRef,
        ctx: &BuildContext,
    ) -> BuildResult<Vec<Node>> {
        let mut pending: Vec<BoxFuture<'_, BuildResult<Node>>> = Vec::new();

        for sub in &classified.directories {
            pending.push(self.build_dir(sub, parent.clone(), ctx));
        }
        for view in classified.views().filter(|v| v.name != dir.name) {
            pending.push(
                self.view_component(dir, classified, view, parent.clone(), ctx)
                    .boxed(),
            );
        }

        let nodes = try_join_all(pending).await?;
        Ok(order_items(nodes))
    }

    /// A view sitting loose in a collection directory becomes its own
    /// component, configured by the config file matching its name.
    async fn view_component(
        &self,
        dir: &FileTreeNode,
        classified: &ClassifiedSet<'_>,
        view: &FileTreeNode,
        parent: ParentRef,
        ctx: &BuildContext,
    ) -> BuildResult<Node> {
        let config_file = classified.config_for(&view.name);
        let values = self
            .resolver
            .resolve(config_file, view_defaults(dir, view))
            .await?;
        let config = ResolvedConfig::new(values, Some(parent)).with_source(ctx.source.clone());

        let files = ComponentFiles {
            view: view.clone(),
            readme: None,
            var_views: owned(classified.var_views_with_prefix(&view.name)),
            other: Vec::new(),
        };
        let component = Component::create(config, files);
        debug!(component = %component.handle(), "built view component");
        Ok(Node::Component(component))
    }

    async fn resolve_dir_config(
        &self,
        dir: &FileTreeNode,
        classified: &ClassifiedSet<'_>,
        parent: Option<ParentRef>,
    ) -> BuildResult<ResolvedConfig> {
        let config_file = classified.config_for(&dir.name);
        let values = self.resolver.resolve(config_file, dir_defaults(dir)).await?;
        Ok(ResolvedConfig::new(values, parent))
    }
}

/// A directory holding a view named like itself. Its sub-directories are not
/// visited.
fn dir_component(
    dir: &FileTreeNode,
    classified: &ClassifiedSet<'_>,
    view: &FileTreeNode,
    mut config: ResolvedConfig,
    source: SourceRef,
) -> Component {
    config.insert("view", view.base.clone());
    config.insert("viewName", dir.name.clone());
    config.insert("viewPath", view.path_str());
    let config = config.with_source(source);

    let files = ComponentFiles {
        view: view.clone(),
        readme: classified.first_readme().cloned(),
        var_views: owned(classified.var_views_with_prefix(&format!("{}.", dir.name))),
        other: owned(classified.unclaimed_files(view)),
    };
    Component::create(config, files)
}

/// Defaults for a directory's own config.
pub fn dir_defaults(dir: &FileTreeNode) -> ConfigMap {
    let mut defaults = ConfigMap::new();
    defaults.insert("name".into(), Value::from(dir.name.clone()));
    defaults.insert("isHidden".into(), Value::from(dir.is_hidden));
    defaults.insert("order".into(), Value::from(dir.order));
    defaults.insert("dir".into(), Value::from(dir.path_str()));
    if let Some(collated) = dir.collated {
        defaults.insert("collated".into(), Value::from(collated));
    }
    defaults
}

/// Defaults for a loose view's config.
pub fn view_defaults(dir: &FileTreeNode, view: &FileTreeNode) -> ConfigMap {
    let mut defaults = ConfigMap::new();
    defaults.insert("name".into(), Value::from(view.name.clone()));
    defaults.insert("order".into(), Value::from(view.order));
    defaults.insert("isHidden".into(), Value::from(view.is_hidden));
    defaults.insert("view".into(), Value::from(view.base.clone()));
    defaults.insert("viewName".into(), Value::from(view.name.clone()));
    defaults.insert("viewPath".into(), Value::from(view.path_str()));
    defaults.insert("dir".into(), Value::from(dir.path_str()));
    defaults
}

fn owned(files: Vec<&FileTreeNode>) -> Vec<FileTreeNode> {
    files.into_iter().cloned().collect()
}
