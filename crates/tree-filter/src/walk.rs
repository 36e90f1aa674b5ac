//! Disk-backed hierarchy provider.
//!
//! Walks a project directory into a `Listing`:
//! - subdirectories are walked in parallel with rayon
//! - children are sorted by name so the tree has a stable order
//! - hidden entries (leading `.`) are skipped unless enabled
//! - file declared types come from the `TypeRegistry` extension table

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{FilterError, Result};
use crate::hierarchy::HierarchyProvider;
use crate::tree::{Listing, ROOT_MARKER};
use crate::types::TypeRegistry;

#[derive(Debug, Clone)]
pub struct DiskHierarchy {
    root: PathBuf,
    types: TypeRegistry,
    include_hidden: bool,
    favorites: Vec<String>,
    favorites_file: Option<PathBuf>,
}

impl DiskHierarchy {
    pub fn new(root: impl Into<PathBuf>, types: TypeRegistry) -> Self {
        Self {
            root: root.into(),
            types,
            include_hidden: false,
            favorites: Vec::new(),
            favorites_file: None,
        }
    }

    pub fn include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    pub fn with_favorites<I, S>(mut self, favorites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = favorites.into_iter().map(Into::into).collect();
        self
    }

    /// Reads starred paths, one per line, from `path` on every listing.
    pub fn with_favorites_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.favorites_file = Some(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walk_dir(&self, path: &Path) -> Vec<Listing> {
        let read_dir = match fs::read_dir(path) {
            Ok(iter) => iter,
            Err(err) => {
                log::warn!("cannot read directory {}: {err}", path.display());
                return Vec::new();
            }
        };
        let entries: Vec<_> = read_dir.filter_map(std::result::Result::ok).collect();

        let mut children: Vec<Listing> = entries
            .into_par_iter()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if !self.include_hidden && name.starts_with('.') {
                    return None;
                }
                // Symlinks are not followed.
                let file_type = entry.file_type().ok()?;
                if file_type.is_dir() {
                    Some(Listing::dir(name, self.walk_dir(&entry.path())))
                } else {
                    let declared_type = self.types.declared_type_for_name(&name);
                    Some(Listing::file(name, declared_type))
                }
            })
            .collect();

        children.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        children
    }

    fn read_favorites_file(path: &Path) -> Vec<String> {
        match fs::read_to_string(path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            Err(err) => {
                log::warn!("cannot read favorites from {}: {err}", path.display());
                Vec::new()
            }
        }
    }
}

impl HierarchyProvider for DiskHierarchy {
    fn list_root(&self) -> Result<Listing> {
        let metadata = match fs::metadata(&self.root) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(FilterError::PathNotFound(self.root.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        if !metadata.is_dir() {
            return Err(FilterError::Provider(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let listing = Listing::dir(ROOT_MARKER, self.walk_dir(&self.root));
        log::debug!(
            "listed {} entries under {}",
            listing.entry_count(),
            self.root.display()
        );
        Ok(listing)
    }

    fn favorites(&self) -> Vec<String> {
        let mut favorites = self.favorites.clone();
        if let Some(path) = &self.favorites_file {
            favorites.extend(Self::read_favorites_file(path));
        }
        favorites
    }
}
