//! Interfaces to the collaborators a filter pass depends on.
//!
//! The host supplies the file listing, the type hierarchy used by
//! `DerivedType` rules, and a scan signal. In-memory implementations are
//! provided for hosts that already hold their data (and for tests).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::Result;
use crate::tree::Listing;

/// Source of the full, unfiltered hierarchy.
pub trait HierarchyProvider: Send {
    /// Lists the hierarchy from the root, declared types filled in.
    fn list_root(&self) -> Result<Listing>;

    /// Paths of starred items.
    fn favorites(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Resolves the parent of a declared type.
pub trait TypeHierarchy: Send + Sync {
    /// Returns the parent type, or `None` for root or unknown types.
    fn parent_type(&self, type_name: &str) -> Option<String>;
}

/// Reports whether a background rescan of the listing is running.
pub trait ScanSignal: Send {
    fn is_scanning(&self) -> bool;
}

/// A fixed listing held in memory.
#[derive(Debug, Clone)]
pub struct StaticHierarchy {
    root: Listing,
    favorites: Vec<String>,
}

impl StaticHierarchy {
    pub fn new(root: Listing) -> Self {
        Self {
            root,
            favorites: Vec::new(),
        }
    }

    pub fn with_favorites<I, S>(mut self, favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = favorites.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the listing, as a rescan would.
    pub fn set_root(&mut self, root: Listing) {
        self.root = root;
    }
}

impl HierarchyProvider for StaticHierarchy {
    fn list_root(&self) -> Result<Listing> {
        Ok(self.root.clone())
    }

    fn favorites(&self) -> Vec<String> {
        self.favorites.clone()
    }
}

/// A type hierarchy with no parents: `DerivedType` degrades to exact match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTypes;

impl TypeHierarchy for FlatTypes {
    fn parent_type(&self, _type_name: &str) -> Option<String> {
        None
    }
}

/// A scan signal that never reports scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverScanning;

impl ScanSignal for NeverScanning {
    fn is_scanning(&self) -> bool {
        false
    }
}

/// A shareable flag the host flips while its rescan runs.
#[derive(Debug, Clone, Default)]
pub struct ScanFlag(Arc<AtomicBool>);

impl ScanFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, scanning: bool) {
        self.0.store(scanning, Ordering::Relaxed);
    }
}

impl ScanSignal for ScanFlag {
    fn is_scanning(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
