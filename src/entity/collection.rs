//! Ordered group of components and sub-collections.

use super::component::Component;
use super::node::Node;
use super::source::SourceRef;
use crate::config::{ParentRef, ResolvedConfig};

#[derive(Debug, Clone)]
pub struct Collection {
    config: ResolvedConfig,
    items: Vec<Node>,
    source: Option<SourceRef>,
}

impl Collection {
    pub fn new(config: ResolvedConfig, items: Vec<Node>) -> Self {
        Self {
            config,
            items,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the children. Callers pass them already ordered.
    pub fn set_items(&mut self, items: Vec<Node>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn order(&self) -> f64 {
        self.config.order()
    }

    pub fn is_hidden(&self) -> bool {
        self.config.is_hidden()
    }

    /// Handle given to children as their parent link.
    pub fn parent_ref(&self) -> ParentRef {
        self.config.as_parent(false)
    }

    /// All components below this collection, depth-first in item order.
    pub fn components(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        collect_components(&self.items, &mut out);
        out
    }

    /// Find a component anywhere below this collection by handle.
    pub fn find(&self, handle: &str) -> Option<&Component> {
        self.components().into_iter().find(|c| c.handle() == handle)
    }
}

pub(crate) fn collect_components<'a>(items: &'a [Node], out: &mut Vec<&'a Component>) {
    for item in items {
        match item {
            Node::Component(c) => out.push(c),
            Node::Collection(c) => collect_components(&c.items, out),
        }
    }
}
