//! Rule evaluation against single items.
//!
//! All comparisons are ordinal and case-sensitive.

use crate::hierarchy::TypeHierarchy;
use crate::rule::{DirectoryFilterKind, DirectoryRule, FileFilterKind, FileRule};

/// Upper bound on `DerivedType` parent walks. A resolver that cycles is a
/// collaborator defect; the walk stops here and reports no match.
pub const MAX_TYPE_DEPTH: usize = 64;

/// The data a rule can look at for one item.
#[derive(Debug, Clone, Copy)]
pub struct ItemContext<'a> {
    pub name: &'a str,
    pub path: &'a str,
    /// Declared type; `None` for directories and unknown files.
    pub declared_type: Option<&'a str>,
}

impl<'a> ItemContext<'a> {
    pub fn new(name: &'a str, path: &'a str, declared_type: Option<&'a str>) -> Self {
        Self {
            name,
            path,
            declared_type,
        }
    }

    /// Declared type as the resolver sees it; unknown is the empty string.
    #[inline]
    fn type_name(&self) -> &'a str {
        self.declared_type.unwrap_or("")
    }
}

/// Evaluates a file rule against a file item.
pub fn matches_file(item: &ItemContext<'_>, rule: &FileRule, types: &dyn TypeHierarchy) -> bool {
    let pattern = rule.filter_string.as_str();
    match rule.filter_type {
        FileFilterKind::DerivedType => is_derived_from(item.type_name(), pattern, types),
        FileFilterKind::MatchType => item.type_name() == pattern,
        FileFilterKind::PathContains => item.path.contains(pattern),
        FileFilterKind::PathMatch => item.path == pattern,
        FileFilterKind::NameContains => item.name.contains(pattern),
        FileFilterKind::NameMatch => item.name == pattern,
    }
}

/// Evaluates a directory rule against a directory item.
pub fn matches_directory(item: &ItemContext<'_>, rule: &DirectoryRule) -> bool {
    let pattern = rule.filter_string.as_str();
    match rule.filter_type {
        DirectoryFilterKind::PathMatch => item.path == pattern,
        DirectoryFilterKind::PathContains => item.path.contains(pattern),
        DirectoryFilterKind::NameMatch => item.name == pattern,
        DirectoryFilterKind::NameContains => item.name.contains(pattern),
    }
}

/// Returns true if `type_name` equals `base` or transitively inherits from it.
///
/// An empty type name never matches, and a missing parent ends the walk.
pub fn is_derived_from(type_name: &str, base: &str, types: &dyn TypeHierarchy) -> bool {
    if type_name.is_empty() {
        return false;
    }
    if type_name == base {
        return true;
    }

    let mut current = types.parent_type(type_name);
    for _ in 0..MAX_TYPE_DEPTH {
        let Some(parent) = current.take() else {
            return false;
        };
        if parent.is_empty() {
            return false;
        }
        if parent == base {
            return true;
        }
        current = types.parent_type(&parent);
    }

    log::warn!(
        "type hierarchy for {type_name} exceeded {MAX_TYPE_DEPTH} levels, treating as no match"
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::FlatTypes;
    use crate::rule::IncludeType;
    use crate::types::TypeRegistry;

    struct Cycle;

    impl TypeHierarchy for Cycle {
        fn parent_type(&self, type_name: &str) -> Option<String> {
            Some(if type_name == "A" { "B" } else { "A" }.to_string())
        }
    }

    fn file_rule(kind: FileFilterKind, pattern: &str) -> FileRule {
        FileRule::new(IncludeType::Include, kind, pattern)
    }

    fn dir_rule(kind: DirectoryFilterKind, pattern: &str) -> DirectoryRule {
        DirectoryRule::new(IncludeType::Include, kind, pattern)
    }

    #[test]
    fn file_path_and_name_predicates() {
        let item = ItemContext::new("x.txt", "res://a/x.txt", Some("Texture"));
        let check = |kind: FileFilterKind, pattern: &str| {
            matches_file(&item, &file_rule(kind, pattern), &FlatTypes)
        };

        assert!(check(FileFilterKind::PathMatch, "res://a/x.txt"));
        assert!(!check(FileFilterKind::PathMatch, "res://a/"));
        assert!(check(FileFilterKind::PathContains, "/a/"));
        assert!(check(FileFilterKind::NameMatch, "x.txt"));
        assert!(check(FileFilterKind::NameContains, ".tx"));
        assert!(!check(FileFilterKind::NameContains, "X"));
    }

    #[test]
    fn match_type_is_exact() {
        let texture = ItemContext::new("x.png", "res://x.png", Some("Texture2D"));
        let unknown = ItemContext::new("x.bin", "res://x.bin", None);
        let exact = |pattern: &str| file_rule(FileFilterKind::MatchType, pattern);

        assert!(matches_file(&texture, &exact("Texture2D"), &FlatTypes));
        assert!(!matches_file(&texture, &exact("Texture"), &FlatTypes));
        assert!(!matches_file(&unknown, &exact("Texture"), &FlatTypes));
    }

    #[test]
    fn derived_type_walks_parents() {
        let registry = TypeRegistry::with_defaults();
        let texture = ItemContext::new("x.png", "res://x.png", Some("Texture2D"));

        let derived = |base: &str| file_rule(FileFilterKind::DerivedType, base);

        for base in ["Texture2D", "Texture", "Resource"] {
            assert!(matches_file(&texture, &derived(base), &registry));
        }
        assert!(!matches_file(&texture, &derived("Script"), &registry));
    }

    #[test]
    fn derived_type_empty_never_matches() {
        let registry = TypeRegistry::with_defaults();
        assert!(!is_derived_from("", "", &registry));
        let unknown = ItemContext::new("x.bin", "res://x.bin", None);
        assert!(!matches_file(&unknown, &file_rule(FileFilterKind::DerivedType, ""), &registry));
    }

    #[test]
    fn derived_type_cycle_is_bounded() {
        assert!(!is_derived_from("A", "C", &Cycle));
        assert!(is_derived_from("A", "B", &Cycle));
    }

    #[test]
    fn directory_predicates() {
        let item = ItemContext::new("addons", "res://addons/", None);
        let check = |kind: DirectoryFilterKind, pattern: &str| {
            matches_directory(&item, &dir_rule(kind, pattern))
        };

        assert!(check(DirectoryFilterKind::PathMatch, "res://addons/"));
        assert!(!check(DirectoryFilterKind::PathMatch, "res://addons"));
        assert!(check(DirectoryFilterKind::PathContains, "addons/"));
        assert!(check(DirectoryFilterKind::NameMatch, "addons"));
        assert!(check(DirectoryFilterKind::NameContains, "dd"));
    }
}
