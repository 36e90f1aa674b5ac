//! File inclusion policy.

use crate::favorites::FavoritesIndex;
use crate::hierarchy::TypeHierarchy;
use crate::matcher::{matches_file, ItemContext};
use crate::rule::{FileRule, IncludeType};
use crate::tree::FileTree;

/// Outcome of evaluating the active file rules against one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileVerdict {
    /// No include rule is active, or one matched.
    Included,
    /// An exclude rule matched.
    Excluded,
    /// Include rules are active and none matched.
    NotIncluded,
}

impl FileVerdict {
    #[inline]
    pub fn is_included(self) -> bool {
        self == Self::Included
    }
}

/// Evaluates `rules` in order against one file.
///
/// A matching exclude rule ends evaluation immediately. A matching include
/// rule is remembered but later excludes still apply. Every include rule
/// counts towards "include rules are active", matched or not.
pub fn file_verdict(
    item: &ItemContext<'_>,
    rules: &[FileRule],
    types: &dyn TypeHierarchy,
) -> FileVerdict {
    let mut has_includer = false;
    let mut included = false;

    for rule in rules {
        if rule.is_include() {
            has_includer = true;
        }

        if !matches_file(item, rule, types) {
            continue;
        }

        match rule.include_type {
            IncludeType::Include => included = true,
            IncludeType::Exclude => return FileVerdict::Excluded,
        }
    }

    if !has_includer || included {
        FileVerdict::Included
    } else {
        FileVerdict::NotIncluded
    }
}

/// Returns true if the file survives `rules`.
pub fn is_file_included(
    item: &ItemContext<'_>,
    rules: &[FileRule],
    types: &dyn TypeHierarchy,
) -> bool {
    file_verdict(item, rules, types).is_included()
}

/// Removes every file rejected by `rules`, along with its favorites entry.
/// Returns the number of files removed.
pub fn filter_files(
    tree: &mut FileTree,
    favorites: &mut FavoritesIndex,
    rules: &[FileRule],
    types: &dyn TypeHierarchy,
) -> usize {
    if rules.is_empty() {
        return 0;
    }

    let rejected: Vec<_> = tree
        .preorder_with_paths()
        .into_iter()
        .filter(|(id, path)| {
            let Some(node) = tree.get(*id) else {
                return false;
            };
            if node.is_dir() {
                return false;
            }
            let item = ItemContext::new(node.name(), path, node.declared_type());
            !is_file_included(&item, rules, types)
        })
        .map(|(id, _)| id)
        .collect();

    for &id in &rejected {
        let removed = tree.remove_subtree(id);
        favorites.remove_all(&removed);
    }
    rejected.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::FlatTypes;
    use crate::rule::FileFilterKind;
    use crate::tree::Listing;

    fn include(kind: FileFilterKind, pattern: &str) -> FileRule {
        FileRule::new(IncludeType::Include, kind, pattern)
    }

    fn exclude(kind: FileFilterKind, pattern: &str) -> FileRule {
        FileRule::new(IncludeType::Exclude, kind, pattern)
    }

    fn texture() -> ItemContext<'static> {
        ItemContext::new("x.txt", "res://a/x.txt", Some("Texture"))
    }

    #[test]
    fn no_rules_includes_everything() {
        assert_eq!(file_verdict(&texture(), &[], &FlatTypes), FileVerdict::Included);
    }

    #[test]
    fn exclude_wins_over_matching_include() {
        let rules = [
            include(FileFilterKind::MatchType, "Texture"),
            exclude(FileFilterKind::NameContains, "x"),
        ];
        assert_eq!(file_verdict(&texture(), &rules, &FlatTypes), FileVerdict::Excluded);

        let reversed = [rules[1].clone(), rules[0].clone()];
        assert_eq!(file_verdict(&texture(), &reversed, &FlatTypes), FileVerdict::Excluded);
    }

    #[test]
    fn unmatched_include_gates_the_file() {
        let rules = [include(FileFilterKind::MatchType, "Script")];
        assert_eq!(file_verdict(&texture(), &rules, &FlatTypes), FileVerdict::NotIncluded);
    }

    #[test]
    fn only_excludes_keep_unmatched_files() {
        let rules = [exclude(FileFilterKind::NameContains, "y")];
        assert!(is_file_included(&texture(), &rules, &FlatTypes));
    }

    #[test]
    fn any_matching_include_is_enough() {
        let rules = [
            include(FileFilterKind::MatchType, "Script"),
            include(FileFilterKind::PathContains, "/a/"),
        ];
        assert!(is_file_included(&texture(), &rules, &FlatTypes));
    }

    #[test]
    fn filter_files_prunes_tree_and_favorites() {
        let mut tree = FileTree::from_listing(&Listing::root([Listing::dir(
            "a",
            [
                Listing::file("x.txt", Some("Texture")),
                Listing::file("y.txt", Some("Script")),
            ],
        )]));
        let mut favorites = FavoritesIndex::from_starred(["res://a/y.txt", "res://a/"], &tree);

        let removed = filter_files(
            &mut tree,
            &mut favorites,
            &[include(FileFilterKind::MatchType, "Texture")],
            &FlatTypes,
        );

        assert_eq!(removed, 1);
        assert_eq!(tree.paths(), vec!["res://a/", "res://a/x.txt"]);
        assert_eq!(favorites.paths(), vec!["res://a/"]);
    }
}
