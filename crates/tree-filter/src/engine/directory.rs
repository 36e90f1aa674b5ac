//! Directory inclusion policy and empty-directory pruning.

use crate::favorites::FavoritesIndex;
use crate::matcher::{matches_directory, ItemContext};
use crate::rule::DirectoryRule;
use crate::tree::FileTree;

use super::DirectoryIncludePolicy;

/// Outcome of evaluating the active directory rules against one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryVerdict {
    Keep,
    /// An exclude rule matched.
    Excluded,
    /// Include rules are active and the policy rejected the directory.
    NotIncluded,
}

/// Counts from one directory pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryPassStats {
    pub excluded: usize,
    pub not_included: usize,
    pub favorites_removed: usize,
}

impl DirectoryPassStats {
    pub fn removed(&self) -> usize {
        self.excluded + self.not_included
    }
}

/// Decides one directory. Excluders are checked before includers.
pub fn directory_verdict(
    item: &ItemContext<'_>,
    includers: &[&DirectoryRule],
    excluders: &[&DirectoryRule],
    policy: DirectoryIncludePolicy,
) -> DirectoryVerdict {
    if excluders.iter().any(|rule| matches_directory(item, rule)) {
        return DirectoryVerdict::Excluded;
    }
    if includers.is_empty() {
        return DirectoryVerdict::Keep;
    }
    match policy {
        DirectoryIncludePolicy::Literal => DirectoryVerdict::NotIncluded,
        DirectoryIncludePolicy::AnyMatch => {
            if includers.iter().any(|rule| matches_directory(item, rule)) {
                DirectoryVerdict::Keep
            } else {
                DirectoryVerdict::NotIncluded
            }
        }
    }
}

/// Removes directories rejected by `rules`, their subtrees, and every
/// favorites entry inside them. The root is never considered.
pub fn filter_directories(
    tree: &mut FileTree,
    favorites: &mut FavoritesIndex,
    rules: &[DirectoryRule],
    policy: DirectoryIncludePolicy,
) -> DirectoryPassStats {
    let mut stats = DirectoryPassStats::default();
    if rules.is_empty() {
        return stats;
    }

    let (includers, excluders): (Vec<&DirectoryRule>, Vec<&DirectoryRule>) =
        rules.iter().partition(|rule| rule.is_include());

    let directories: Vec<_> = tree
        .preorder_with_paths()
        .into_iter()
        .filter(|(id, _)| tree.get(*id).is_some_and(|node| node.is_dir()))
        .collect();

    for (id, path) in directories {
        // Already gone with an ancestor.
        let Some(node) = tree.get(id) else {
            continue;
        };
        let item = ItemContext::new(node.name(), &path, None);
        let verdict = directory_verdict(&item, &includers, &excluders, policy);

        match verdict {
            DirectoryVerdict::Keep => continue,
            DirectoryVerdict::Excluded => stats.excluded += 1,
            DirectoryVerdict::NotIncluded => stats.not_included += 1,
        }
        let removed = tree.remove_subtree(id);
        stats.favorites_removed += favorites.remove_all(&removed);
    }

    stats
}

/// Removes every directory without children, deepest first, so parents
/// emptied by the removal of their children go too. Returns the number of
/// directories and favorites entries removed.
pub fn remove_empty_directories(
    tree: &mut FileTree,
    favorites: &mut FavoritesIndex,
) -> (usize, usize) {
    let mut directories = 0;
    let mut favorites_removed = 0;

    for id in tree.directories_preorder().into_iter().rev() {
        let is_empty = tree
            .get(id)
            .is_some_and(|node| node.is_dir() && node.children.is_empty());
        if !is_empty {
            continue;
        }
        let removed = tree.remove_subtree(id);
        favorites_removed += favorites.remove_all(&removed);
        directories += 1;
    }

    (directories, favorites_removed)
}
