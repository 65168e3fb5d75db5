//! Output formatting for built trees: JSON and indented outline.

use crate::builder::Root;
use crate::entity::{Collection, Component, Node, Source};
use crate::types::FileTreeNode;
use serde_json::{Value, json};

/// Output format for a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Tree,
}

/// Render a build result in the requested format.
pub fn render(root: &Root<'_>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let value = root_json(root);
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        }
        OutputFormat::Tree => root_tree(root),
    }
}

pub fn root_json(root: &Root<'_>) -> Value {
    match root {
        Root::Source(source) => source_json(source),
        Root::Component(component) => component_json(component),
    }
}

pub fn source_json(source: &Source) -> Value {
    let settings = source.settings();
    json!({
        "kind": "source",
        "name": source.name(),
        "dir": source.dir().to_string_lossy(),
        "status": settings.status,
        "preview": settings.preview,
        "prefix": settings.prefix,
        "tags": settings.tags,
        "context": settings.context,
        "display": settings.display,
        "items": source.items().iter().map(node_json).collect::<Vec<_>>(),
    })
}

pub fn node_json(node: &Node) -> Value {
    match node {
        Node::Component(c) => component_json(c),
        Node::Collection(c) => collection_json(c),
    }
}

fn collection_json(collection: &Collection) -> Value {
    json!({
        "kind": "collection",
        "name": collection.name(),
        "order": order_json(collection.order()),
        "hidden": collection.is_hidden(),
        "config": collection.config().values(),
        "items": collection.items().iter().map(node_json).collect::<Vec<_>>(),
    })
}

fn component_json(component: &Component) -> Value {
    json!({
        "kind": "component",
        "name": component.name(),
        "handle": component.handle(),
        "order": order_json(component.order()),
        "hidden": component.is_hidden(),
        "view": component.view().path_str(),
        "readme": component.readme().map(FileTreeNode::path_str),
        "variants": bases(component.var_views()),
        "files": bases(component.other()),
        "config": component.config().values(),
    })
}

/// Whole orders print as integers.
fn order_json(order: f64) -> Value {
    if order.fract() == 0.0 && order.abs() < i64::MAX as f64 {
        json!(order as i64)
    } else {
        json!(order)
    }
}

fn bases(files: &[FileTreeNode]) -> Vec<&str> {
    files.iter().map(|f| f.base.as_str()).collect()
}

/// Indented outline, two spaces per level.
pub fn root_tree(root: &Root<'_>) -> String {
    let mut out = String::new();
    match root {
        Root::Source(source) => {
            out.push_str(&format!("{}/\n", source.name()));
            for item in source.items() {
                push_node(&mut out, item, 1);
            }
        }
        Root::Component(component) => push_component(&mut out, component, 0),
    }
    out
}

fn push_node(out: &mut String, node: &Node, depth: usize) {
    match node {
        Node::Component(c) => push_component(out, c, depth),
        Node::Collection(c) => {
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!("{}/", c.name()));
            if c.is_hidden() {
                out.push_str(" (hidden)");
            }
            out.push('\n');
            for item in c.items() {
                push_node(out, item, depth + 1);
            }
        }
    }
}

fn push_component(out: &mut String, component: &Component, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&format!("{} [{}]", component.handle(), component.view().base));
    if !component.var_views().is_empty() {
        out.push_str(&format!(" +{} variants", component.var_views().len()));
    }
    if component.is_hidden() {
        out.push_str(" (hidden)");
    }
    out.push('\n');
}
