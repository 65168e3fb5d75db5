//! File role classification and name matching.
//!
//! A [`FileClassifier`] answers four independent questions about a file. The
//! answers are folded into a single [`FileRole`] once per file, so matching
//! downstream works on a closed set and never re-asks the classifier.

use crate::config::Conventions;
use crate::types::FileTreeNode;
use tracing::warn;

/// Predicates deciding what part a file plays in a component.
pub trait FileClassifier: Send + Sync {
    fn is_view(&self, file: &FileTreeNode) -> bool;
    fn is_var_view(&self, file: &FileTreeNode) -> bool;
    fn is_config(&self, file: &FileTreeNode) -> bool;
    fn is_readme(&self, file: &FileTreeNode) -> bool;
}

/// The single role a file plays within its directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Unclassified,
    View,
    VarView,
    Config,
    Readme,
}

impl FileRole {
    /// Fold the classifier's answers into one role.
    ///
    /// Precedence when several predicates hold: config, readme, variant view,
    /// view. A file that configures or documents something never becomes a
    /// view, and a variant is never mistaken for a primary view.
    pub fn of(file: &FileTreeNode, classifier: &dyn FileClassifier) -> Self {
        if classifier.is_config(file) {
            FileRole::Config
        } else if classifier.is_readme(file) {
            FileRole::Readme
        } else if classifier.is_var_view(file) {
            FileRole::VarView
        } else if classifier.is_view(file) {
            FileRole::View
        } else {
            FileRole::Unclassified
        }
    }

    pub fn is_claimed(self) -> bool {
        self != FileRole::Unclassified
    }
}

/// Classifier driven by file naming conventions.
#[derive(Debug, Clone, Default)]
pub struct ConventionClassifier {
    conventions: Conventions,
}

impl ConventionClassifier {
    pub fn new(conventions: Conventions) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &Conventions {
        &self.conventions
    }

    fn has_view_ext(&self, file: &FileTreeNode) -> bool {
        file.ext.eq_ignore_ascii_case(&self.conventions.view_ext)
    }

    fn has_separator(&self, file: &FileTreeNode) -> bool {
        let sep = &self.conventions.variant_separator;
        !sep.is_empty() && file.name.contains(sep.as_str())
    }
}

impl FileClassifier for ConventionClassifier {
    fn is_view(&self, file: &FileTreeNode) -> bool {
        file.is_file() && self.has_view_ext(file) && !self.has_separator(file)
    }

    fn is_var_view(&self, file: &FileTreeNode) -> bool {
        file.is_file() && self.has_view_ext(file) && self.has_separator(file)
    }

    fn is_config(&self, file: &FileTreeNode) -> bool {
        file.is_file()
            && file.name.ends_with(&self.conventions.config_suffix)
            && self
                .conventions
                .config_exts
                .iter()
                .any(|ext| file.ext.eq_ignore_ascii_case(ext))
    }

    fn is_readme(&self, file: &FileTreeNode) -> bool {
        file.is_file()
            && file.name.eq_ignore_ascii_case(&self.conventions.readme_name)
            && file.ext.eq_ignore_ascii_case(".md")
    }
}

/// A directory's children grouped by role.
///
/// Every group keeps the directory's enumeration order, which is what
/// "first match" refers to throughout.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedSet<'a> {
    pub directories: Vec<&'a FileTreeNode>,
    pub files: Vec<(&'a FileTreeNode, FileRole)>,
}

impl<'a> ClassifiedSet<'a> {
    pub fn classify(dir: &'a FileTreeNode, classifier: &dyn FileClassifier) -> Self {
        let mut set = ClassifiedSet::default();
        for child in &dir.children {
            if child.is_directory() {
                set.directories.push(child);
            } else if child.is_file() {
                set.files.push((child, FileRole::of(child, classifier)));
            }
        }
        set
    }

    fn with_role(&self, role: FileRole) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.files
            .iter()
            .filter(move |(_, r)| *r == role)
            .map(|(f, _)| *f)
    }

    pub fn files(&self) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.files.iter().map(|(f, _)| *f)
    }

    pub fn views(&self) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.with_role(FileRole::View)
    }

    pub fn var_views(&self) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.with_role(FileRole::VarView)
    }

    pub fn configs(&self) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.with_role(FileRole::Config)
    }

    pub fn readmes(&self) -> impl Iterator<Item = &'a FileTreeNode> + '_ {
        self.with_role(FileRole::Readme)
    }

    /// The view that makes this directory a component: one named exactly
    /// like the directory.
    pub fn own_view(&self, dir_name: &str) -> Option<&'a FileTreeNode> {
        self.views().find(|v| v.name == dir_name)
    }

    /// First config file whose name starts with `name`.
    ///
    /// Several candidates are not an error; the first in enumeration order
    /// wins and the rest are reported.
    pub fn config_for(&self, name: &str) -> Option<&'a FileTreeNode> {
        let mut candidates = self.configs().filter(|c| c.name.starts_with(name));
        let first = candidates.next()?;
        let ignored: Vec<&str> = candidates.map(|c| c.base.as_str()).collect();
        if !ignored.is_empty() {
            warn!(
                matched_name = name,
                chosen = %first.base,
                ignored = ?ignored,
                "several config files match, using the first"
            );
        }
        Some(first)
    }

    pub fn first_readme(&self) -> Option<&'a FileTreeNode> {
        self.readmes().next()
    }

    pub fn var_views_with_prefix(&self, prefix: &str) -> Vec<&'a FileTreeNode> {
        self.var_views()
            .filter(|v| v.name.starts_with(prefix))
            .collect()
    }

    /// Files not claimed by any role and not the component's own view.
    pub fn unclaimed_files(&self, view: &FileTreeNode) -> Vec<&'a FileTreeNode> {
        self.files
            .iter()
            .filter(|(f, role)| !role.is_claimed() && f.path != view.path)
            .map(|(f, _)| *f)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}
