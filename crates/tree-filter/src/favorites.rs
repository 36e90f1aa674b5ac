//! Favorites index: starred items mirrored outside the main hierarchy.

use fnv::FnvHashMap;

use crate::tree::FileTree;

/// Lightweight counterpart of a starred item in the favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub path: String,
    /// Display label (the last path segment).
    pub label: String,
}

impl FavoriteEntry {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let label = path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { path, label }
    }

    pub fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }
}

/// Maps item paths to their favorites entries.
///
/// Holds at most one entry per path, and only for paths present in the
/// hierarchy it was built against.
#[derive(Debug, Clone, Default)]
pub struct FavoritesIndex {
    entries: FnvHashMap<String, FavoriteEntry>,
}

impl FavoritesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from starred paths, keeping only those present in
    /// `tree`.
    pub fn from_starred<I, S>(starred: I, tree: &FileTree) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for path in starred {
            let path = path.into();
            if tree.contains_path(&path) {
                index.insert(path);
            } else {
                log::debug!("favorite {path} is not in the hierarchy, skipping");
            }
        }
        index
    }

    /// Inserts an entry; returns false if the path was already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let entry = FavoriteEntry::new(path);
        if self.entries.contains_key(&entry.path) {
            return false;
        }
        self.entries.insert(entry.path.clone(), entry);
        true
    }

    pub fn get(&self, path: &str) -> Option<&FavoriteEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<FavoriteEntry> {
        self.entries.remove(path)
    }

    /// Removes the entries for every given path, returning how many existed.
    pub fn remove_all<'a>(&mut self, paths: impl IntoIterator<Item = &'a String>) -> usize {
        paths
            .into_iter()
            .filter(|path| self.entries.remove(path.as_str()).is_some())
            .count()
    }

    /// Drops entries whose path no longer exists in `tree`.
    pub fn retain_present(&mut self, tree: &FileTree) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| tree.contains_path(path));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths in sorted order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Listing;

    fn tree() -> FileTree {
        FileTree::from_listing(&Listing::root([
            Listing::dir("a", [Listing::file("x.txt", None)]),
            Listing::file("b.txt", None),
        ]))
    }

    #[test]
    fn entry_labels() {
        assert_eq!(FavoriteEntry::new("res://a/x.txt").label, "x.txt");
        let dir = FavoriteEntry::new("res://a/");
        assert_eq!(dir.label, "a");
        assert!(dir.is_dir());
    }

    #[test]
    fn from_starred_skips_absent_and_duplicates() {
        let index = FavoritesIndex::from_starred(
            ["res://a/", "res://a/", "res://missing.txt", "res://b.txt"],
            &tree(),
        );
        assert_eq!(index.paths(), vec!["res://a/", "res://b.txt"]);
    }

    #[test]
    fn remove_all_counts_existing() {
        let mut index = FavoritesIndex::from_starred(["res://a/", "res://a/x.txt"], &tree());
        let removed = vec!["res://a/".to_string(), "res://nope".to_string()];
        assert_eq!(index.remove_all(&removed), 1);
        assert_eq!(index.paths(), vec!["res://a/x.txt"]);
    }

    #[test]
    fn retain_present_drops_pruned_paths() {
        let mut tree = tree();
        let mut index = FavoritesIndex::from_starred(["res://a/x.txt", "res://b.txt"], &tree);
        let a = tree.node_index_for_path("res://a/").unwrap();
        tree.remove_subtree(a);

        assert_eq!(index.retain_present(&tree), 1);
        assert!(index.contains("res://b.txt"));
        assert!(index.get("res://a/x.txt").is_none());
    }
}
