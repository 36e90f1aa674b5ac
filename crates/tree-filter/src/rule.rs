//! Filter rule descriptors.
//!
//! Rules are plain data: a polarity, a predicate kind, a pattern operand and
//! the toggle phase that activates them. Evaluation lives in `matcher`.

use serde::{Deserialize, Serialize};

/// Rule polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeType {
    Include,
    Exclude,
}

/// Toggle phase that activates a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPhase {
    /// Active while the owning toggle is pressed.
    OnEnabled,
    /// Active while the owning toggle is released.
    OnDisabled,
}

impl FilterPhase {
    /// Returns the phase a toggle enters when set to `pressed`.
    #[inline]
    pub fn for_pressed(pressed: bool) -> Self {
        if pressed {
            Self::OnEnabled
        } else {
            Self::OnDisabled
        }
    }
}

/// Predicate kinds for file rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFilterKind {
    /// Declared type equals the operand or inherits from it.
    DerivedType,
    /// Declared type equals the operand.
    MatchType,
    PathContains,
    PathMatch,
    NameContains,
    NameMatch,
}

/// Predicate kinds for directory rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryFilterKind {
    PathMatch,
    PathContains,
    NameMatch,
    NameContains,
}

/// A rule evaluated against file items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRule {
    pub include_type: IncludeType,
    pub filter_type: FileFilterKind,
    #[serde(default)]
    pub filter_string: String,
    #[serde(default = "default_phase")]
    pub when_to_filter: FilterPhase,
}

impl FileRule {
    /// Creates a rule active while its toggle is pressed.
    pub fn new(
        include_type: IncludeType,
        filter_type: FileFilterKind,
        filter_string: impl Into<String>,
    ) -> Self {
        Self {
            include_type,
            filter_type,
            filter_string: filter_string.into(),
            when_to_filter: FilterPhase::OnEnabled,
        }
    }

    /// Sets the activation phase.
    pub fn when(mut self, phase: FilterPhase) -> Self {
        self.when_to_filter = phase;
        self
    }

    #[inline]
    pub fn is_include(&self) -> bool {
        self.include_type == IncludeType::Include
    }
}

/// A rule evaluated against directory items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryRule {
    pub include_type: IncludeType,
    pub filter_type: DirectoryFilterKind,
    #[serde(default)]
    pub filter_string: String,
    #[serde(default = "default_phase")]
    pub when_to_filter: FilterPhase,
}

impl DirectoryRule {
    /// Creates a rule active while its toggle is pressed.
    pub fn new(
        include_type: IncludeType,
        filter_type: DirectoryFilterKind,
        filter_string: impl Into<String>,
    ) -> Self {
        Self {
            include_type,
            filter_type,
            filter_string: filter_string.into(),
            when_to_filter: FilterPhase::OnEnabled,
        }
    }

    /// Sets the activation phase.
    pub fn when(mut self, phase: FilterPhase) -> Self {
        self.when_to_filter = phase;
        self
    }

    #[inline]
    pub fn is_include(&self) -> bool {
        self.include_type == IncludeType::Include
    }
}

fn default_phase() -> FilterPhase {
    FilterPhase::OnEnabled
}

// ---------------------------------------------------------------------------
// Active rule sets
// ---------------------------------------------------------------------------

/// Identifies a rule by its owning toggle and position among that toggle's rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub toggle: usize,
    pub slot: usize,
}

/// The currently active file and directory rules, in insertion order.
///
/// Keys and rules are stored side by side so the engines can borrow the rules
/// as plain slices.
#[derive(Debug, Clone, Default)]
pub struct ActiveRules {
    file_keys: Vec<RuleKey>,
    file_rules: Vec<FileRule>,
    directory_keys: Vec<RuleKey>,
    directory_rules: Vec<DirectoryRule>,
}

impl ActiveRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_rules(&self) -> &[FileRule] {
        &self.file_rules
    }

    pub fn directory_rules(&self) -> &[DirectoryRule] {
        &self.directory_rules
    }

    pub fn is_empty(&self) -> bool {
        self.file_rules.is_empty() && self.directory_rules.is_empty()
    }

    /// Adds a file rule unless the key is already active.
    pub fn add_file_rule(&mut self, key: RuleKey, rule: FileRule) {
        if !self.file_keys.contains(&key) {
            self.file_keys.push(key);
            self.file_rules.push(rule);
        }
    }

    /// Adds a directory rule unless the key is already active.
    pub fn add_directory_rule(&mut self, key: RuleKey, rule: DirectoryRule) {
        if !self.directory_keys.contains(&key) {
            self.directory_keys.push(key);
            self.directory_rules.push(rule);
        }
    }

    /// Removes every rule owned by `toggle`. Returns the number removed.
    pub fn remove_toggle(&mut self, toggle: usize) -> usize {
        let before = self.file_keys.len() + self.directory_keys.len();
        retain_paired(&mut self.file_keys, &mut self.file_rules, |key| {
            key.toggle != toggle
        });
        retain_paired(&mut self.directory_keys, &mut self.directory_rules, |key| {
            key.toggle != toggle
        });
        before - (self.file_keys.len() + self.directory_keys.len())
    }

    /// Returns true if any rule owned by `toggle` is active.
    pub fn has_toggle(&self, toggle: usize) -> bool {
        self.file_keys
            .iter()
            .chain(self.directory_keys.iter())
            .any(|key| key.toggle == toggle)
    }

    pub fn clear(&mut self) {
        self.file_keys.clear();
        self.file_rules.clear();
        self.directory_keys.clear();
        self.directory_rules.clear();
    }
}

fn retain_paired<T>(keys: &mut Vec<RuleKey>, rules: &mut Vec<T>, keep: impl Fn(&RuleKey) -> bool) {
    let mut index = 0;
    while index < keys.len() {
        if keep(&keys[index]) {
            index += 1;
        } else {
            keys.remove(index);
            rules.remove(index);
        }
    }
}
