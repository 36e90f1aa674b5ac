//! Filter evaluation and tree pruning.
//!
//! A pass runs in three stages over an owned `FileTree`:
//! 1. `file` - every file is checked against the active file rules
//! 2. `directory` - every surviving directory is checked against the active
//!    directory rules
//! 3. `directory` (empty pass) - optionally, directories left without
//!    children are removed bottom-up
//!
//! Favorites entries are dropped alongside every pruned path.

mod directory;
mod file;
mod pass;

use serde::{Deserialize, Serialize};

use crate::hierarchy::TypeHierarchy;

pub use directory::{
    directory_verdict, filter_directories, remove_empty_directories, DirectoryPassStats,
    DirectoryVerdict,
};
pub use file::{file_verdict, filter_files, is_file_included, FileVerdict};
pub use pass::{run_pass, PassReport};

/// How active directory include rules decide survival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryIncludePolicy {
    /// With any include rule active, every directory is removed whether or
    /// not an include rule matches it.
    #[default]
    Literal,
    /// A directory survives when at least one include rule matches it.
    AnyMatch,
}

/// Options for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassOptions {
    /// Remove directories left without children after pruning.
    pub hide_empty: bool,
    pub directory_include_policy: DirectoryIncludePolicy,
}

/// Everything a pass needs besides the tree and the rules.
#[derive(Clone, Copy)]
pub struct FilterContext<'a> {
    pub types: &'a dyn TypeHierarchy,
    pub options: PassOptions,
}

impl<'a> FilterContext<'a> {
    pub fn new(types: &'a dyn TypeHierarchy, options: PassOptions) -> Self {
        Self { types, options }
    }
}

impl std::fmt::Debug for FilterContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContext")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
