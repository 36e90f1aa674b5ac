//! Tree node types.

use thin_vec::ThinVec;

use super::index_types::{NodeId, OptionNodeId};

/// Whether a node is a leaf file (with its declared type) or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File {
        /// Declared resource type; `None` when the provider does not know it.
        declared_type: Option<Box<str>>,
    },
    Directory,
}

/// A node in the filtered hierarchy.
#[derive(Debug, Clone)]
pub struct TreeNode {
    name: Box<str>,
    parent: OptionNodeId,
    /// Child node indices (empty for files).
    pub children: ThinVec<NodeId>,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn new(parent: Option<NodeId>, name: impl Into<Box<str>>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            parent: OptionNodeId::from_option(parent),
            children: ThinVec::new(),
            kind,
        }
    }

    pub fn file(
        parent: Option<NodeId>,
        name: impl Into<Box<str>>,
        declared_type: Option<&str>,
    ) -> Self {
        Self::new(
            parent,
            name,
            NodeKind::File {
                declared_type: declared_type.map(Into::into),
            },
        )
    }

    pub fn directory(parent: Option<NodeId>, name: impl Into<Box<str>>) -> Self {
        Self::new(parent, name, NodeKind::Directory)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent.to_option()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory)
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        !self.is_dir()
    }

    /// Returns the declared type of a file, or `None` for directories and
    /// files of unknown type.
    #[inline]
    pub fn declared_type(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { declared_type } => declared_type.as_deref(),
            NodeKind::Directory => None,
        }
    }

    /// Adds a child node index.
    pub fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Removes a child node index, returns true if it was present.
    pub fn remove_child(&mut self, child: NodeId) -> bool {
        if let Some(pos) = self.children.iter().position(|&c| c == child) {
            self.children.remove(pos);
            true
        } else {
            false
        }
    }
}
