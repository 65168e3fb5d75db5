//! Tree nodes and their ordering.

use super::collection::Collection;
use super::component::Component;
use crate::config::ResolvedConfig;

/// A child of a collection.
#[derive(Debug, Clone)]
pub enum Node {
    Component(Component),
    Collection(Collection),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Component(c) => c.name(),
            Node::Collection(c) => c.name(),
        }
    }

    pub fn order(&self) -> f64 {
        match self {
            Node::Component(c) => c.order(),
            Node::Collection(c) => c.order(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Node::Component(c) => c.is_hidden(),
            Node::Collection(c) => c.is_hidden(),
        }
    }

    pub fn config(&self) -> &ResolvedConfig {
        match self {
            Node::Component(c) => c.config(),
            Node::Collection(c) => c.config(),
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Node::Component(c) => Some(c),
            Node::Collection(_) => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Node::Collection(c) => Some(c),
            Node::Component(_) => None,
        }
    }
}

/// Sort nodes by `(order, name)` ascending.
///
/// Keys are materialised before sorting so the result depends only on the
/// nodes themselves, never on the order they arrived in.
pub fn order_items(nodes: Vec<Node>) -> Vec<Node> {
    let mut keyed: Vec<(f64, String, Node)> = nodes
        .into_iter()
        .map(|node| (node.order(), node.name().to_string(), node))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, node)| node).collect()
}
