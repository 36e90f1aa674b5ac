//! Filter evaluation and tree pruning for project file browsers.
//!
//! This crate provides:
//! - An owned, arena-backed file tree rooted at `res://`
//! - File and directory filter rules with include/exclude polarity
//! - Toggle-driven rule sets and single-pass pruning with favorites bookkeeping
//! - A disk-walking hierarchy provider and JSON panel configuration

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod hierarchy;
pub mod matcher;
pub mod rule;
pub mod tree;
pub mod types;
pub mod walk;

// Re-export main types
pub use config::PanelConfig;
pub use controller::{
    FilterSetController, FilterToggle, PassObserver, PassOutcome, RevealOutcome, ScanState,
    SharedController,
};
pub use engine::{run_pass, DirectoryIncludePolicy, FilterContext, PassOptions, PassReport};
pub use error::{FilterError, Result};
pub use favorites::{FavoriteEntry, FavoritesIndex};
pub use hierarchy::{
    FlatTypes, HierarchyProvider, NeverScanning, ScanFlag, ScanSignal, StaticHierarchy,
    TypeHierarchy,
};
pub use rule::{
    ActiveRules, DirectoryFilterKind, DirectoryRule, FileFilterKind, FileRule, FilterPhase,
    IncludeType,
};
pub use tree::{FileTree, Listing, NodeId, ROOT_MARKER};
pub use types::TypeRegistry;
pub use walk::DiskHierarchy;
