//! Filter set controller.
//!
//! Owns the toggles, the active rule sets and the collaborators, and turns
//! every user-visible state change into exactly one evaluation pass over a
//! freshly listed hierarchy.

mod scan;
mod shared;
mod toggle;

pub use scan::{ScanState, ScanTracker};
pub use shared::SharedController;
pub use toggle::{validate_toggles, FilterToggle};

use crate::config::PanelConfig;
use crate::engine::{run_pass, FilterContext, PassOptions, PassReport};
use crate::error::{FilterError, Result};
use crate::favorites::FavoritesIndex;
use crate::hierarchy::{HierarchyProvider, ScanSignal, TypeHierarchy};
use crate::rule::{ActiveRules, FileFilterKind, FileRule, IncludeType};
use crate::tree::FileTree;

/// Receives the pruned hierarchy after every completed pass.
pub trait PassObserver: Send {
    fn on_pass(&mut self, tree: &FileTree, favorites: &FavoritesIndex, report: &PassReport);
}

impl<F> PassObserver for F
where
    F: FnMut(&FileTree, &FavoritesIndex, &PassReport) + Send,
{
    fn on_pass(&mut self, tree: &FileTree, favorites: &FavoritesIndex, report: &PassReport) {
        self(tree, favorites, report)
    }
}

/// Result of a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    Completed(PassReport),
    /// A scan is running; the pass will run from `poll` once it finishes.
    Deferred,
    /// The requested state was already current; no pass ran.
    Unchanged,
}

impl PassOutcome {
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}

/// Result of revealing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The path already survives the active filters.
    Visible,
    /// The path became visible after resetting every toggle to its default.
    RevealedAfterReset,
    /// The path became visible after switching every toggle off.
    RevealedAfterClear,
    /// The path is not in the hierarchy, or stays filtered regardless.
    NotFound,
    /// A scan is running; toggles were left untouched.
    Deferred,
}

pub struct FilterSetController {
    provider: Box<dyn HierarchyProvider>,
    types: Box<dyn TypeHierarchy>,
    scan: Box<dyn ScanSignal>,
    toggles: Vec<FilterToggle>,
    active: ActiveRules,
    search_text: String,
    options: PassOptions,
    tracker: ScanTracker,
    tree: FileTree,
    favorites: FavoritesIndex,
    last_report: Option<PassReport>,
    observers: Vec<Box<dyn PassObserver>>,
}

impl FilterSetController {
    /// Creates a controller, puts every toggle in its default state and runs
    /// the initial pass (deferred if a scan is running).
    pub fn new(
        provider: Box<dyn HierarchyProvider>,
        types: Box<dyn TypeHierarchy>,
        scan: Box<dyn ScanSignal>,
        toggles: Vec<FilterToggle>,
        options: PassOptions,
    ) -> Result<Self> {
        validate_toggles(&toggles)?;

        let mut controller = Self {
            provider,
            types,
            scan,
            toggles,
            active: ActiveRules::new(),
            search_text: String::new(),
            options,
            tracker: ScanTracker::new(),
            tree: FileTree::new(),
            favorites: FavoritesIndex::new(),
            last_report: None,
            observers: Vec::new(),
        };
        for (index, toggle) in controller.toggles.iter_mut().enumerate() {
            toggle.reset(index, &mut controller.active);
        }
        controller.refresh()?;
        Ok(controller)
    }

    /// Creates a controller from a panel configuration. The type hierarchy
    /// comes from the configuration's type tables.
    pub fn from_config(
        config: &PanelConfig,
        provider: Box<dyn HierarchyProvider>,
        scan: Box<dyn ScanSignal>,
    ) -> Result<Self> {
        Self::new(
            provider,
            Box::new(config.type_registry()),
            scan,
            config.toggles.clone(),
            config.pass_options(),
        )
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The pruned hierarchy from the last completed pass.
    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    /// Favorites consistent with `tree()`.
    pub fn favorites(&self) -> &FavoritesIndex {
        &self.favorites
    }

    pub fn last_report(&self) -> Option<&PassReport> {
        self.last_report.as_ref()
    }

    pub fn toggles(&self) -> &[FilterToggle] {
        &self.toggles
    }

    pub fn active_rules(&self) -> &ActiveRules {
        &self.active
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn options(&self) -> PassOptions {
        self.options
    }

    pub fn scan_state(&self) -> ScanState {
        self.tracker.state()
    }

    pub fn is_pressed(&self, id: &str) -> Result<bool> {
        let index = self.toggle_index(id)?;
        Ok(self.toggles[index].is_pressed())
    }

    fn toggle_index(&self, id: &str) -> Result<usize> {
        self.toggles
            .iter()
            .position(|toggle| toggle.id == id)
            .ok_or_else(|| FilterError::UnknownToggle(id.to_string()))
    }

    // -----------------------------------------------------------------------
    // User actions
    // -----------------------------------------------------------------------

    /// Presses or releases a toggle.
    ///
    /// Pressing an auto-disable toggle first resets every other auto-disable
    /// toggle to its default state and clears the search text.
    pub fn set_toggle(&mut self, id: &str, pressed: bool) -> Result<PassOutcome> {
        let index = self.toggle_index(id)?;
        if self.toggles[index].is_pressed() == pressed {
            return Ok(PassOutcome::Unchanged);
        }

        if pressed && self.toggles[index].auto_disable {
            for (other, toggle) in self.toggles.iter_mut().enumerate() {
                if other != index && toggle.auto_disable {
                    toggle.reset(other, &mut self.active);
                }
            }
            self.search_text.clear();
        }

        let toggle = &mut self.toggles[index];
        toggle.apply(index, pressed, &mut self.active);
        if pressed && !toggle.search_filter.is_empty() {
            self.search_text = toggle.search_filter.clone();
        }
        log::debug!("toggle {id} set to {pressed}");

        self.refresh()
    }

    /// Sets the search text. Non-empty text keeps only files whose name
    /// contains it.
    pub fn set_search_text(&mut self, text: &str) -> Result<PassOutcome> {
        if self.search_text == text {
            return Ok(PassOutcome::Unchanged);
        }
        self.search_text = text.to_string();
        self.refresh()
    }

    pub fn set_hide_empty(&mut self, hide_empty: bool) -> Result<PassOutcome> {
        if self.options.hide_empty == hide_empty {
            return Ok(PassOutcome::Unchanged);
        }
        self.options.hide_empty = hide_empty;
        self.refresh()
    }

    /// Resets every auto-disable toggle to its default state and clears the
    /// search text.
    pub fn clear_filters(&mut self) -> Result<PassOutcome> {
        for (index, toggle) in self.toggles.iter_mut().enumerate() {
            if toggle.auto_disable {
                toggle.reset(index, &mut self.active);
            }
        }
        self.search_text.clear();
        self.refresh()
    }

    /// Makes `path` visible, relaxing the filters as far as needed.
    pub fn reveal(&mut self, path: &str) -> Result<RevealOutcome> {
        if self.tree.node_index_for_path(path).is_some() {
            return Ok(RevealOutcome::Visible);
        }
        if self.scan.is_scanning() {
            log::info!("scan in progress, not revealing {path}");
            return Ok(RevealOutcome::Deferred);
        }

        for (index, toggle) in self.toggles.iter_mut().enumerate() {
            toggle.reset(index, &mut self.active);
        }
        self.search_text.clear();
        if self.refresh()? == PassOutcome::Deferred {
            return Ok(RevealOutcome::Deferred);
        }
        if self.tree.node_index_for_path(path).is_some() {
            return Ok(RevealOutcome::RevealedAfterReset);
        }

        for (index, toggle) in self.toggles.iter_mut().enumerate() {
            toggle.apply(index, false, &mut self.active);
        }
        if self.refresh()? == PassOutcome::Deferred {
            return Ok(RevealOutcome::Deferred);
        }
        if self.tree.node_index_for_path(path).is_some() {
            return Ok(RevealOutcome::RevealedAfterClear);
        }

        log::debug!("cannot reveal {path}");
        Ok(RevealOutcome::NotFound)
    }

    /// Registers an observer for completed passes.
    pub fn subscribe(&mut self, observer: Box<dyn PassObserver>) {
        self.observers.push(observer);
    }

    // -----------------------------------------------------------------------
    // Passes and rescans
    // -----------------------------------------------------------------------

    /// Records that the host started a rescan. One pass runs from `poll`
    /// once the scan signal reports it finished.
    pub fn request_rescan(&mut self) {
        log::info!("rescan requested");
        self.tracker.request_rescan();
    }

    /// Runs a pass now, or defers it while a scan is running.
    pub fn refresh(&mut self) -> Result<PassOutcome> {
        if self.scan.is_scanning() {
            log::info!("scan in progress, deferring filter pass");
            self.tracker.defer();
            return Ok(PassOutcome::Deferred);
        }
        self.run().map(PassOutcome::Completed)
    }

    /// Runs the owed pass, if any, once scanning has stopped. Call
    /// periodically from the host loop.
    pub fn poll(&mut self) -> Result<Option<PassReport>> {
        if self.scan.is_scanning() {
            self.tracker.observe_scanning();
            return Ok(None);
        }
        if !self.tracker.take_pending() {
            return Ok(None);
        }
        log::info!("scan finished, running filter pass");
        self.run().map(Some)
    }

    fn run(&mut self) -> Result<PassReport> {
        let listing = self.provider.list_root()?;
        let mut tree = FileTree::from_listing(&listing);
        let mut favorites = FavoritesIndex::from_starred(self.provider.favorites(), &tree);

        let mut file_rules = self.active.file_rules().to_vec();
        if !self.search_text.is_empty() {
            file_rules.push(FileRule::new(
                IncludeType::Include,
                FileFilterKind::NameContains,
                self.search_text.as_str(),
            ));
        }

        let ctx = FilterContext::new(&*self.types, self.options);
        let report = run_pass(
            &mut tree,
            &mut favorites,
            &file_rules,
            self.active.directory_rules(),
            &ctx,
        );

        self.tree = tree;
        self.favorites = favorites;
        self.last_report = Some(report);
        self.tracker.settle();
        for observer in &mut self.observers {
            observer.on_pass(&self.tree, &self.favorites, &report);
        }
        Ok(report)
    }
}

impl std::fmt::Debug for FilterSetController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterSetController")
            .field("toggles", &self.toggles)
            .field("active", &self.active)
            .field("search_text", &self.search_text)
            .field("options", &self.options)
            .field("scan_state", &self.tracker.state())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::hierarchy::{NeverScanning, ScanFlag, StaticHierarchy};
    use crate::rule::{DirectoryFilterKind, DirectoryRule, FilterPhase};
    use crate::tree::Listing;
    use crate::types::TypeRegistry;

    fn listing() -> Listing {
        Listing::root([
            Listing::dir(
                "a",
                [
                    Listing::file("x.txt", Some("Texture")),
                    Listing::file("y.txt", Some("Script")),
                ],
            ),
            Listing::dir("addons", [Listing::file("plugin.gd", Some("Script"))]),
            Listing::dir("empty", []),
        ])
    }

    fn textures() -> FilterToggle {
        FilterToggle::new("textures", "Textures")
            .file_rule(FileRule::new(IncludeType::Include, FileFilterKind::MatchType, "Texture"))
    }

    fn scripts() -> FilterToggle {
        FilterToggle::new("scripts", "Scripts")
            .file_rule(FileRule::new(IncludeType::Include, FileFilterKind::MatchType, "Script"))
    }

    fn hide_addons() -> FilterToggle {
        FilterToggle::new("hide_addons", "Hide addons")
            .auto_disable(false)
            .pressed_by_default(true)
            .directory_rule(DirectoryRule::new(
                IncludeType::Exclude,
                DirectoryFilterKind::NameMatch,
                "addons",
            ))
    }

    fn controller(toggles: Vec<FilterToggle>) -> FilterSetController {
        FilterSetController::new(
            Box::new(StaticHierarchy::new(listing()).with_favorites(["res://a/y.txt"])),
            Box::new(TypeRegistry::with_defaults()),
            Box::new(NeverScanning),
            toggles,
            PassOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn initial_pass_applies_defaults() {
        let controller = controller(vec![textures(), hide_addons()]);
        assert!(!controller.is_pressed("textures").unwrap());
        assert!(controller.is_pressed("hide_addons").unwrap());
        assert!(!controller.tree().contains_path("res://addons/"));
        assert!(controller.tree().contains_path("res://a/y.txt"));
        assert!(controller.last_report().is_some());
    }

    #[test]
    fn unknown_toggle_is_an_error() {
        let mut controller = controller(vec![textures()]);
        assert!(matches!(
            controller.set_toggle("nope", true),
            Err(FilterError::UnknownToggle(id)) if id == "nope"
        ));
    }

    #[test]
    fn setting_current_state_runs_no_pass() {
        let mut controller = controller(vec![textures()]);
        assert_eq!(controller.set_toggle("textures", false).unwrap(), PassOutcome::Unchanged);
        assert_eq!(controller.set_hide_empty(false).unwrap(), PassOutcome::Unchanged);
        assert_eq!(controller.set_search_text("").unwrap(), PassOutcome::Unchanged);
    }

    #[test]
    fn auto_disable_resets_siblings_and_search() {
        let mut controller = controller(vec![textures(), scripts(), hide_addons()]);
        controller.set_toggle("scripts", true).unwrap();
        controller.set_search_text("y").unwrap();
        assert!(controller.tree().contains_path("res://a/y.txt"));

        controller.set_toggle("textures", true).unwrap();

        assert!(!controller.is_pressed("scripts").unwrap());
        assert!(controller.is_pressed("hide_addons").unwrap());
        assert_eq!(controller.search_text(), "");
        assert_eq!(controller.active_rules().file_rules().len(), 1);
        assert!(controller.tree().contains_path("res://a/x.txt"));
        assert!(!controller.tree().contains_path("res://a/y.txt"));
        assert!(controller.favorites().is_empty());
    }

    #[test]
    fn on_disabled_rules_follow_release() {
        let show_all = FilterToggle::new("show_all", "Show all")
            .auto_disable(false)
            .file_rule(
                FileRule::new(IncludeType::Exclude, FileFilterKind::NameMatch, "plugin.gd")
                    .when(FilterPhase::OnDisabled),
            );
        let mut controller = controller(vec![show_all]);
        assert!(!controller.tree().contains_path("res://addons/plugin.gd"));

        controller.set_toggle("show_all", true).unwrap();
        assert!(controller.tree().contains_path("res://addons/plugin.gd"));
    }

    #[test]
    fn search_filter_toggle_sets_search_text() {
        let search = FilterToggle::new("only_x", "x").search_filter("x");
        let mut controller = controller(vec![search]);
        controller.set_toggle("only_x", true).unwrap();
        assert_eq!(controller.search_text(), "x");
        assert_eq!(controller.tree().files().len(), 1);
    }

    #[test]
    fn clear_filters_keeps_manual_toggles() {
        let mut controller = controller(vec![textures(), hide_addons()]);
        controller.set_toggle("textures", true).unwrap();
        controller.set_toggle("hide_addons", false).unwrap();
        controller.set_search_text("x").unwrap();

        controller.clear_filters().unwrap();

        assert!(!controller.is_pressed("textures").unwrap());
        assert!(!controller.is_pressed("hide_addons").unwrap());
        assert_eq!(controller.search_text(), "");
        assert!(controller.tree().contains_path("res://addons/plugin.gd"));
    }

    #[test]
    fn reveal_relaxes_filters_step_by_step() {
        let mut controller = controller(vec![textures(), hide_addons()]);
        assert_eq!(controller.reveal("res://a/x.txt").unwrap(), RevealOutcome::Visible);

        controller.set_toggle("textures", true).unwrap();
        assert_eq!(
            controller.reveal("res://a/y.txt").unwrap(),
            RevealOutcome::RevealedAfterReset
        );
        assert!(!controller.is_pressed("textures").unwrap());

        assert_eq!(
            controller.reveal("res://addons/plugin.gd").unwrap(),
            RevealOutcome::RevealedAfterClear
        );
        assert!(!controller.is_pressed("hide_addons").unwrap());

        assert_eq!(controller.reveal("res://missing.txt").unwrap(), RevealOutcome::NotFound);
    }

    #[test]
    fn passes_are_deferred_while_scanning() {
        let flag = ScanFlag::new();
        let mut controller = FilterSetController::new(
            Box::new(StaticHierarchy::new(listing())),
            Box::new(TypeRegistry::with_defaults()),
            Box::new(flag.clone()),
            vec![textures()],
            PassOptions::default(),
        )
        .unwrap();

        flag.set(true);
        assert_eq!(controller.set_toggle("textures", true).unwrap(), PassOutcome::Deferred);
        assert_eq!(controller.scan_state(), ScanState::Deferred);
        assert!(controller.poll().unwrap().is_none());
        assert!(controller.tree().contains_path("res://a/y.txt"));

        flag.set(false);
        assert!(controller.poll().unwrap().is_some());
        assert!(!controller.tree().contains_path("res://a/y.txt"));
        assert!(controller.poll().unwrap().is_none());
    }

    #[test]
    fn reveal_while_scanning_leaves_toggles_alone() {
        let flag = ScanFlag::new();
        let mut controller = FilterSetController::new(
            Box::new(StaticHierarchy::new(listing())),
            Box::new(TypeRegistry::with_defaults()),
            Box::new(flag.clone()),
            vec![textures()],
            PassOptions::default(),
        )
        .unwrap();
        controller.set_toggle("textures", true).unwrap();

        flag.set(true);
        assert_eq!(controller.reveal("res://a/y.txt").unwrap(), RevealOutcome::Deferred);
        assert!(controller.is_pressed("textures").unwrap());
        assert_eq!(controller.active_rules().file_rules().len(), 1);
        assert_eq!(controller.scan_state(), ScanState::Idle);

        flag.set(false);
        assert_eq!(
            controller.reveal("res://a/y.txt").unwrap(),
            RevealOutcome::RevealedAfterReset
        );
    }

    #[test]
    fn pass_after_scan_settles_deferred_work() {
        let flag = ScanFlag::new();
        let mut controller = FilterSetController::new(
            Box::new(StaticHierarchy::new(listing())),
            Box::new(TypeRegistry::with_defaults()),
            Box::new(flag.clone()),
            vec![textures(), hide_addons()],
            PassOptions::default(),
        )
        .unwrap();
        let passes = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&passes);
        controller.subscribe(Box::new(
            move |_: &FileTree, _: &FavoritesIndex, _: &PassReport| {
                *counter.lock().unwrap() += 1;
            },
        ));

        flag.set(true);
        assert_eq!(controller.set_toggle("textures", true).unwrap(), PassOutcome::Deferred);
        flag.set(false);
        assert!(controller.set_toggle("hide_addons", false).unwrap().report().is_some());

        assert!(controller.poll().unwrap().is_none());
        assert_eq!(*passes.lock().unwrap(), 1);
        assert_eq!(controller.scan_state(), ScanState::Idle);
    }

    #[test]
    fn requested_rescan_survives_pass_before_scan_starts() {
        let flag = ScanFlag::new();
        let mut controller = FilterSetController::new(
            Box::new(StaticHierarchy::new(listing())),
            Box::new(TypeRegistry::with_defaults()),
            Box::new(flag.clone()),
            vec![textures()],
            PassOptions::default(),
        )
        .unwrap();

        controller.request_rescan();
        controller.set_toggle("textures", true).unwrap();
        assert_eq!(controller.scan_state(), ScanState::Requested);

        flag.set(true);
        assert!(controller.poll().unwrap().is_none());
        flag.set(false);
        assert!(controller.poll().unwrap().is_some());
        assert!(controller.poll().unwrap().is_none());
    }

    #[test]
    fn observers_see_every_completed_pass() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut controller = controller(vec![textures()]);
        controller.subscribe(Box::new(
            move |tree: &FileTree, _: &FavoritesIndex, report: &PassReport| {
                sink.lock().unwrap().push((tree.file_count(), report.files_removed));
            },
        ));

        controller.set_toggle("textures", true).unwrap();
        controller.set_toggle("textures", false).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![(1, 2), (3, 0)]);
    }
}
