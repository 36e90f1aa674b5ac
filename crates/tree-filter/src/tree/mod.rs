//! Owned, arena-backed hierarchy that filter passes prune in place.
//!
//! ## Module Structure
//!
//! - `index_types` - Compact index types (`NodeId`, `OptionNodeId`)
//! - `slab` - Freelist slab addressed by `NodeId`
//! - `node` - `TreeNode` and `NodeKind`
//! - `listing` - Nested provider listing (`Listing`) and the root marker
//! - `file_tree` - `FileTree`: construction, path derivation, subtree removal

mod file_tree;
mod index_types;
mod listing;
mod node;
mod slab;

pub use file_tree::FileTree;
pub use index_types::{NodeId, OptionNodeId};
pub use listing::{Listing, ROOT_MARKER};
pub use node::{NodeKind, TreeNode};
pub use slab::NodeSlab;
