//! Filter toggles and the rules they own.

use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::rule::{ActiveRules, DirectoryRule, FileRule, FilterPhase, RuleKey};

/// A two-state button owning a set of file and directory rules.
///
/// Each rule is tagged with the phase that activates it, so a toggle can
/// contribute rules while pressed, while released, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggle {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub default_pressed: bool,
    /// Pressing this toggle resets the other auto-disable toggles.
    #[serde(default = "default_auto_disable")]
    pub auto_disable: bool,
    /// Search text applied when the toggle is pressed.
    #[serde(default)]
    pub search_filter: String,
    #[serde(default)]
    pub file_rules: Vec<FileRule>,
    #[serde(default)]
    pub directory_rules: Vec<DirectoryRule>,
    #[serde(skip)]
    pressed: bool,
}

fn default_auto_disable() -> bool {
    true
}

impl FilterToggle {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default_pressed: false,
            auto_disable: true,
            search_filter: String::new(),
            file_rules: Vec::new(),
            directory_rules: Vec::new(),
            pressed: false,
        }
    }

    pub fn pressed_by_default(mut self, pressed: bool) -> Self {
        self.default_pressed = pressed;
        self
    }

    pub fn auto_disable(mut self, auto_disable: bool) -> Self {
        self.auto_disable = auto_disable;
        self
    }

    pub fn search_filter(mut self, text: impl Into<String>) -> Self {
        self.search_filter = text.into();
        self
    }

    pub fn file_rule(mut self, rule: FileRule) -> Self {
        self.file_rules.push(rule);
        self
    }

    pub fn directory_rule(mut self, rule: DirectoryRule) -> Self {
        self.directory_rules.push(rule);
        self
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns true if the toggle owns no rules and no search text.
    pub fn is_inert(&self) -> bool {
        self.file_rules.is_empty()
            && self.directory_rules.is_empty()
            && self.search_filter.is_empty()
    }

    /// Sets the pressed state and swaps this toggle's rules in `active`:
    /// every rule it owns is removed, then the rules for the new phase are
    /// added. `index` is the toggle's position in its controller.
    pub(crate) fn apply(&mut self, index: usize, pressed: bool, active: &mut ActiveRules) {
        self.pressed = pressed;
        active.remove_toggle(index);

        let phase = FilterPhase::for_pressed(pressed);
        for (slot, rule) in self.file_rules.iter().enumerate() {
            if rule.when_to_filter == phase {
                active.add_file_rule(RuleKey { toggle: index, slot }, rule.clone());
            }
        }
        for (slot, rule) in self.directory_rules.iter().enumerate() {
            if rule.when_to_filter == phase {
                active.add_directory_rule(RuleKey { toggle: index, slot }, rule.clone());
            }
        }
    }

    /// Returns the toggle to its default state.
    pub(crate) fn reset(&mut self, index: usize, active: &mut ActiveRules) {
        self.apply(index, self.default_pressed, active);
    }
}

/// Rejects empty and duplicate toggle ids.
pub fn validate_toggles(toggles: &[FilterToggle]) -> Result<()> {
    let mut seen = FnvHashSet::default();
    for toggle in toggles {
        if toggle.id.is_empty() {
            return Err(FilterError::InvalidConfig("toggle id must not be empty".into()));
        }
        if !seen.insert(toggle.id.as_str()) {
            return Err(FilterError::InvalidConfig(format!(
                "duplicate toggle id: {}",
                toggle.id
            )));
        }
        if toggle.is_inert() {
            log::warn!("toggle {} has no rules and no search filter", toggle.id);
        }
    }
    Ok(())
}
