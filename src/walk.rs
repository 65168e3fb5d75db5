//! Filesystem walker producing [`FileTreeNode`] trees.
//!
//! Entry names may carry an order prefix (`02-button`) and a hidden prefix
//! (`_draft`). Both are stripped from the display name:
//!
//! | base                 | name         | order | hidden |
//! |----------------------|--------------|-------|--------|
//! | `02-button`          | `button`     | 2     | no     |
//! | `_draft.hbs`         | `draft`      | pos   | yes    |
//! | `01-_legacy.hbs`     | `legacy`     | 1     | yes    |

use crate::config::WalkSettings;
use crate::error::{BuildError, BuildResult};
use crate::types::{FileTreeNode, NodeKind, split_ext};
use futures::FutureExt;
use futures::future::BoxFuture;
use regex_lite::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static ORDER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(.+)$").expect("order prefix pattern is valid"));

/// Display name, order and hidden flag parsed from an entry's base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub name: String,
    pub order: Option<i64>,
    pub is_hidden: bool,
}

/// Parse a stem (base name without extension) into its parts.
pub fn parse_name(stem: &str, hidden_prefix: &str) -> ParsedName {
    let (order, rest) = match ORDER_PREFIX.captures(stem) {
        Some(caps) => match caps[1].parse::<i64>() {
            Ok(order) => (Some(order), caps.get(2).map_or(stem, |m| m.as_str())),
            Err(_) => (None, stem),
        },
        None => (None, stem),
    };

    let (is_hidden, name) = match rest.strip_prefix(hidden_prefix) {
        Some(stripped) if !hidden_prefix.is_empty() && !stripped.is_empty() => (true, stripped),
        _ => (false, rest),
    };

    ParsedName {
        name: name.to_string(),
        order,
        is_hidden,
    }
}

/// Walk `root` and describe it as a tree.
///
/// The root node keeps its directory name, order 0, and is never hidden.
pub async fn describe(root: &Path, settings: &WalkSettings) -> BuildResult<FileTreeNode> {
    let base = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string());
    let children = describe_children(root.to_path_buf(), false, settings).await?;
    debug!(root = %root.display(), children = children.len(), "walked directory tree");
    Ok(FileTreeNode::dir(base, root, 0, children))
}

fn describe_children<'a>(
    dir: PathBuf,
    parent_hidden: bool,
    settings: &'a WalkSettings,
) -> BoxFuture<'a, BuildResult<Vec<FileTreeNode>>> {
    async move {
        let mut read = tokio::fs::read_dir(&dir).await.map_err(|source| BuildError::Walk {
            path: dir.clone(),
            source,
        })?;

        let mut entries: Vec<(String, PathBuf, NodeKind)> = Vec::new();
        loop {
            let entry = match read.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(BuildError::Walk {
                        path: dir.clone(),
                        source,
                    });
                }
            };
            let base = entry.file_name().to_string_lossy().to_string();
            if settings.skip_dotfiles && base.starts_with('.') {
                continue;
            }
            let file_type = entry.file_type().await.map_err(|source| BuildError::Walk {
                path: entry.path(),
                source,
            })?;
            let kind = if file_type.is_dir() {
                NodeKind::Directory
            } else {
                NodeKind::File
            };
            entries.push((base, entry.path(), kind));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let mut nodes = Vec::with_capacity(entries.len());
        for (index, (base, path, kind)) in entries.into_iter().enumerate() {
            let position = index as i64 + 1;
            let node = match kind {
                NodeKind::File => {
                    let (stem, _) = split_ext(&base);
                    let parsed = parse_name(&stem, &settings.hidden_prefix);
                    FileTreeNode::file(base, path, parsed.order.unwrap_or(position))
                        .with_name(parsed.name)
                        .hidden(parent_hidden || parsed.is_hidden)
                }
                NodeKind::Directory => {
                    let parsed = parse_name(&base, &settings.hidden_prefix);
                    let is_hidden = parent_hidden || parsed.is_hidden;
                    let children = describe_children(path.clone(), is_hidden, settings).await?;
                    FileTreeNode::dir(base, path, parsed.order.unwrap_or(position), children)
                        .with_name(parsed.name)
                        .hidden(is_hidden)
                }
            };
            nodes.push(node);
        }
        Ok(nodes)
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_name_plain() {
        let parsed = parse_name("button", "_");
        assert_eq!(parsed.name, "button");
        assert_eq!(parsed.order, None);
        assert!(!parsed.is_hidden);
    }

    #[test]
    fn test_parse_name_order_prefix() {
        let parsed = parse_name("02-button", "_");
        assert_eq!(parsed.name, "button");
        assert_eq!(parsed.order, Some(2));
    }

    #[test]
    fn test_parse_name_hidden() {
        let parsed = parse_name("01-_legacy", "_");
        assert_eq!(parsed.name, "legacy");
        assert_eq!(parsed.order, Some(1));
        assert!(parsed.is_hidden);
    }

    #[test]
    fn test_parse_name_lone_prefix_is_not_hidden() {
        let parsed = parse_name("_", "_");
        assert_eq!(parsed.name, "_");
        assert!(!parsed.is_hidden);
    }

    #[test]
    fn test_parse_name_dashes_without_number() {
        let parsed = parse_name("date-picker", "_");
        assert_eq!(parsed.name, "date-picker");
        assert_eq!(parsed.order, None);
    }

    #[tokio::test]
    async fn test_describe_orders_and_hides() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("components");
        fs::create_dir_all(root.join("02-forms/input")).unwrap();
        fs::create_dir_all(root.join("_drafts")).unwrap();
        fs::write(root.join("02-forms/input/input.hbs"), "").unwrap();
        fs::write(root.join("_drafts/idea.hbs"), "").unwrap();
        fs::write(root.join("link.hbs"), "").unwrap();
        fs::write(root.join(".DS_Store"), "").unwrap();

        let tree = describe(&root, &WalkSettings::default()).await.unwrap();
        assert_eq!(tree.name, "components");
        assert!(tree.is_directory());

        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["forms", "drafts", "link"]);

        let forms = &tree.children[0];
        assert_eq!(forms.order, 2);
        assert!(!forms.is_hidden);
        assert_eq!(forms.children[0].children[0].ext, ".hbs");

        let drafts = &tree.children[1];
        assert!(drafts.is_hidden);
        assert!(drafts.children[0].is_hidden, "hidden parent hides children");

        let link = &tree.children[2];
        assert_eq!(link.order, 3, "positional order is 1-based");
        assert_eq!(link.base, "link.hbs");
    }

    #[tokio::test]
    async fn test_describe_missing_root_fails() {
        let err = describe(Path::new("/no/such/root"), &WalkSettings::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::Walk { .. }));
    }
}
