//! Directory trees of standard-directory discoveries.
//!
//! Every discovered path is split into components; each prefix is counted
//! once per distinct path ([`PathCounts`]). Paths found outside PATH are
//! also folded into a per-resource segment tree ([`HierarchyNode`]) that the
//! report renders with those counts.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use super::reconcile::Inventory;

/// Split `path` into tree segments.
///
/// A drive prefix and the root directory after it form one segment
/// (`C:\`), so Windows paths nest the same way POSIX paths do under `/`.
pub fn segments(path: &Path) -> Vec<OsString> {
    let mut components = path.components().peekable();
    let mut out = Vec::new();

    if let Some(Component::Prefix(prefix)) = components.peek() {
        let mut root = prefix.as_os_str().to_os_string();
        components.next();
        if let Some(Component::RootDir) = components.peek() {
            root.push(Component::RootDir.as_os_str());
            components.next();
        }
        out.push(root);
    }

    out.extend(components.map(|c| c.as_os_str().to_os_string()));
    out
}

/// One segment of a directory tree; children sorted by segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyNode {
    children: BTreeMap<OsString, HierarchyNode>,
}

impl HierarchyNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every segment of `path` as a chain of nested nodes.
    pub fn insert(&mut self, path: &Path) {
        let mut current = self;
        for segment in segments(path) {
            current = current.children.entry(segment).or_default();
        }
    }

    pub fn children(&self) -> impl Iterator<Item = (&OsStr, &HierarchyNode)> {
        self.children.iter().map(|(k, v)| (k.as_os_str(), v))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Every root-to-leaf chain, rejoined into paths.
    pub fn leaves(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        self.collect_leaves(PathBuf::new(), &mut out);
        out
    }

    fn collect_leaves(&self, prefix: PathBuf, out: &mut Vec<PathBuf>) {
        for (segment, child) in &self.children {
            let path = prefix.join(segment);
            if child.is_leaf() {
                out.push(path);
            } else {
                child.collect_leaves(path, out);
            }
        }
    }
}

/// Number of distinct discovered paths under each path prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCounts {
    counts: HashMap<PathBuf, usize>,
}

impl PathCounts {
    /// Count every non-empty prefix of each distinct path.
    pub fn from_paths<'p>(paths: impl IntoIterator<Item = &'p Path>) -> Self {
        let distinct: BTreeSet<&Path> = paths.into_iter().collect();
        let mut counts = HashMap::new();

        for path in distinct {
            let mut prefix = PathBuf::new();
            for segment in segments(path) {
                prefix.push(segment);
                *counts.entry(prefix.clone()).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// Count for `prefix`, 0 when no path shares it.
    pub fn get(&self, prefix: &Path) -> usize {
        self.counts.get(prefix).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Per-resource trees plus the shared prefix counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    trees: Vec<(String, HierarchyNode)>,
    counts: PathCounts,
}

impl Hierarchy {
    /// Build trees from the standard-directory discoveries of `inventory`,
    /// counting prefixes over all of its paths.
    pub fn build(inventory: &Inventory) -> Self {
        let counts = PathCounts::from_paths(inventory.all_paths().map(|p| p.path.as_path()));

        let trees = inventory
            .resources
            .iter()
            .map(|resource| {
                let mut root = HierarchyNode::new();
                for discovered in resource.paths.iter().filter(|p| !p.in_path) {
                    root.insert(&discovered.path);
                }
                (resource.name.clone(), root)
            })
            .collect();

        Self { trees, counts }
    }

    /// Tree for the named resource.
    pub fn tree(&self, resource: &str) -> Option<&HierarchyNode> {
        self.trees
            .iter()
            .find(|(name, _)| name == resource)
            .map(|(_, tree)| tree)
    }

    pub fn counts(&self) -> &PathCounts {
        &self.counts
    }

    /// Report lines for the named resource's tree, depth first.
    pub fn render(&self, resource: &str) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(tree) = self.tree(resource) {
            self.render_node(tree, PathBuf::new(), 2, &mut lines);
        }
        lines
    }

    fn render_node(
        &self,
        node: &HierarchyNode,
        prefix: PathBuf,
        indent: usize,
        out: &mut Vec<String>,
    ) {
        for (segment, child) in node.children() {
            let path = prefix.join(segment);
            out.push(format!(
                "{}{} ({})",
                " ".repeat(indent),
                segment.to_string_lossy(),
                self.counts.get(&path)
            ));
            self.render_node(child, path, indent + 2, out);
        }
    }
}
