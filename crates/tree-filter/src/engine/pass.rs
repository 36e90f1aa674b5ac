//! One full evaluation pass over a tree.

use crate::favorites::FavoritesIndex;
use crate::rule::{DirectoryRule, FileRule};
use crate::tree::FileTree;

use super::directory::{filter_directories, remove_empty_directories};
use super::file::filter_files;
use super::FilterContext;

/// Counts from a completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub files_removed: usize,
    pub directories_excluded: usize,
    pub directories_not_included: usize,
    pub empty_directories_removed: usize,
    pub favorites_removed: usize,
    pub files_remaining: usize,
    pub directories_remaining: usize,
}

impl PassReport {
    /// Directories removed for any reason.
    pub fn directories_removed(&self) -> usize {
        self.directories_excluded + self.directories_not_included + self.empty_directories_removed
    }
}

/// Prunes `tree` and `favorites` in place: files first, then directories,
/// then (when enabled) directories left empty.
pub fn run_pass(
    tree: &mut FileTree,
    favorites: &mut FavoritesIndex,
    file_rules: &[FileRule],
    directory_rules: &[DirectoryRule],
    ctx: &FilterContext<'_>,
) -> PassReport {
    let favorites_before = favorites.len();

    let files_removed = filter_files(tree, favorites, file_rules, ctx.types);
    let directories = filter_directories(
        tree,
        favorites,
        directory_rules,
        ctx.options.directory_include_policy,
    );
    let empty_directories_removed = if ctx.options.hide_empty {
        remove_empty_directories(tree, favorites).0
    } else {
        0
    };

    let report = PassReport {
        files_removed,
        directories_excluded: directories.excluded,
        directories_not_included: directories.not_included,
        empty_directories_removed,
        favorites_removed: favorites_before - favorites.len(),
        files_remaining: tree.file_count(),
        directories_remaining: tree.directory_count(),
    };

    log::debug!(
        "filter pass: {} file rules, {} directory rules, removed {} files and {} directories, \
         {} files and {} directories remain",
        file_rules.len(),
        directory_rules.len(),
        report.files_removed,
        report.directories_removed(),
        report.files_remaining,
        report.directories_remaining,
    );

    report
}
