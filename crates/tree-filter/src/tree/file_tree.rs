//! FileTree - hierarchical tree wrapper for slab-based node storage.
//!
//! This module provides `FileTree` which encapsulates the slab storage along
//! with the root node index, and derives paths by walking parent chains.

use super::index_types::NodeId;
use super::listing::{Listing, ROOT_MARKER};
use super::node::TreeNode;
use super::slab::NodeSlab;

/// Hierarchical file tree backed by slab storage.
///
/// Paths are `/`-joined names under the root marker. Directory paths carry a
/// trailing slash (`res://a/b/`), file paths do not (`res://a/b/x.txt`).
#[derive(Debug, Clone)]
pub struct FileTree {
    slab: NodeSlab<TreeNode>,
    root: NodeId,
}

impl FileTree {
    /// Creates a tree holding only an empty root directory.
    pub fn new() -> Self {
        Self::with_root_name(ROOT_MARKER)
    }

    /// Creates a tree whose root directory has the given name.
    pub fn with_root_name(name: &str) -> Self {
        let mut slab = NodeSlab::new();
        let root = slab.insert(TreeNode::directory(None, name));
        Self { slab, root }
    }

    /// Builds a tree from a provider listing in a single preorder pass.
    ///
    /// A directory listing becomes the root; a bare file is placed under a
    /// fresh root directory.
    pub fn from_listing(listing: &Listing) -> Self {
        let root_name = match listing {
            Listing::Directory { name, .. } => &**name,
            Listing::File { .. } => ROOT_MARKER,
        };
        let mut slab = NodeSlab::with_capacity(listing.entry_count() + 1);
        let root = slab.insert(TreeNode::directory(None, root_name));
        let mut tree = Self { slab, root };

        match listing {
            Listing::Directory { children, .. } => {
                for child in children {
                    tree.insert_listing(root, child);
                }
            }
            Listing::File { .. } => tree.insert_listing(root, listing),
        }
        tree
    }

    fn insert_listing(&mut self, parent: NodeId, listing: &Listing) {
        match listing {
            Listing::File {
                name,
                declared_type,
            } => {
                self.insert_file(parent, name, declared_type.as_deref());
            }
            Listing::Directory { name, children } => {
                if let Some(id) = self.insert_directory(parent, name) {
                    for child in children {
                        self.insert_listing(id, child);
                    }
                }
            }
        }
    }

    /// Inserts a file under `parent`. Returns `None` if `parent` is not a
    /// live directory.
    pub fn insert_file(
        &mut self,
        parent: NodeId,
        name: &str,
        declared_type: Option<&str>,
    ) -> Option<NodeId> {
        self.insert_node(parent, TreeNode::file(Some(parent), name, declared_type))
    }

    /// Inserts an empty directory under `parent`.
    pub fn insert_directory(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.insert_node(parent, TreeNode::directory(Some(parent), name))
    }

    fn insert_node(&mut self, parent: NodeId, node: TreeNode) -> Option<NodeId> {
        if !self.slab.get(parent)?.is_dir() {
            return None;
        }
        let id = self.slab.insert(node);
        // Fresh slab ids are never already children.
        self.slab[parent].children.push(id);
        Some(id)
    }

    /// Returns the root node index.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        self.slab.get(id)
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slab.contains(id)
    }

    /// Returns the children of a node (empty for files and unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slab
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of live nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.slab.len()
    }

    /// Returns true if the root has no children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.slab.iter().filter(|(_, node)| node.is_file()).count()
    }

    /// Number of directories, root excluded.
    pub fn directory_count(&self) -> usize {
        self.slab
            .iter()
            .filter(|(id, node)| node.is_dir() && *id != self.root)
            .count()
    }

    fn root_prefix(&self) -> String {
        let name = self.slab[self.root].name();
        if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{name}/")
        }
    }

    /// Computes the full path for a node by walking up the parent chain.
    ///
    /// Returns `None` if the node doesn't exist or the chain is broken.
    pub fn node_path(&self, id: NodeId) -> Option<String> {
        let node = self.slab.get(id)?;
        let mut segments = Vec::new();
        let mut current = id;

        loop {
            let node = self.slab.get(current)?;
            match node.parent() {
                Some(parent) => {
                    segments.push(node.name());
                    current = parent;
                }
                None => break,
            }
        }

        if current != self.root {
            return None;
        }

        let mut path = self.root_prefix();
        for (position, segment) in segments.iter().rev().enumerate() {
            if position > 0 {
                path.push('/');
            }
            path.push_str(segment);
        }
        if node.is_dir() && id != self.root {
            path.push('/');
        }
        Some(path)
    }

    /// Locates a node by path, traversing from the root and matching path
    /// segments to node names. A trailing slash is optional.
    pub fn node_index_for_path(&self, path: &str) -> Option<NodeId> {
        let prefix = self.root_prefix();
        let rest = path
            .strip_prefix(prefix.as_str())
            .or_else(|| path.strip_prefix(prefix.trim_end_matches('/')))?;

        let mut current = self.root;
        for segment in rest.split('/').filter(|segment| !segment.is_empty()) {
            current = self
                .children(current)
                .iter()
                .copied()
                .find(|&child| self.slab.get(child).map(TreeNode::name) == Some(segment))?;
        }
        Some(current)
    }

    /// Returns true if a node with this exact path exists.
    pub fn contains_path(&self, path: &str) -> bool {
        self.node_index_for_path(path)
            .and_then(|id| self.node_path(id))
            .is_some_and(|found| found == path)
    }

    /// Visits every node below the root in preorder, children in listing order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.children(self.root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Like [`preorder`](Self::preorder) but also yields each node's path,
    /// built top-down instead of by walking parent chains.
    pub fn preorder_with_paths(&self) -> Vec<(NodeId, String)> {
        let mut order = Vec::with_capacity(self.len());
        let prefix = self.root_prefix();
        let mut stack: Vec<(NodeId, String)> = self
            .children(self.root)
            .iter()
            .rev()
            .map(|&id| (id, prefix.clone()))
            .collect();

        while let Some((id, parent_path)) = stack.pop() {
            let Some(node) = self.slab.get(id) else {
                continue;
            };
            let mut path = parent_path;
            path.push_str(node.name());
            if node.is_dir() {
                path.push('/');
                for &child in node.children.iter().rev() {
                    stack.push((child, path.clone()));
                }
            }
            order.push((id, path));
        }
        order
    }

    /// Directories below the root in preorder.
    pub fn directories_preorder(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.slab.get(id).is_some_and(TreeNode::is_dir))
            .collect()
    }

    /// Files in preorder.
    pub fn files(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| self.slab.get(id).is_some_and(TreeNode::is_file))
            .collect()
    }

    /// Paths of every node below the root, in preorder.
    pub fn paths(&self) -> Vec<String> {
        self.preorder_with_paths()
            .into_iter()
            .map(|(_, path)| path)
            .collect()
    }

    /// Returns all subnodes (children, grandchildren, etc.) of a node.
    pub fn all_subnodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).to_vec();

        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().copied());
        }

        result
    }

    /// Removes a node and all its descendants, returning the removed paths.
    ///
    /// The root cannot be removed; asking for it (or for a dead id) removes
    /// nothing.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<String> {
        if id == self.root || !self.slab.contains(id) {
            return Vec::new();
        }

        let mut removed = Vec::new();
        if let Some(path) = self.node_path(id) {
            removed.push(path);
        }
        for sub in self.all_subnodes(id) {
            if let Some(path) = self.node_path(sub) {
                removed.push(path);
            }
        }

        if let Some(parent) = self.slab.get(id).and_then(TreeNode::parent) {
            if let Some(parent_node) = self.slab.get_mut(parent) {
                parent_node.remove_child(id);
            }
        }
        for sub in self.all_subnodes(id) {
            self.slab.try_remove(sub);
        }
        self.slab.try_remove(id);

        removed
    }
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}
