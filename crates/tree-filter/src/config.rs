//! Panel configuration loaded from JSON.
//!
//! ```json
//! {
//!   "hide_empty": true,
//!   "directory_include_policy": "any_match",
//!   "types": { "extensions": { "tres": "Resource" }, "parents": {} },
//!   "toggles": [
//!     {
//!       "id": "scripts",
//!       "label": "Scripts",
//!       "file_rules": [
//!         { "include_type": "include", "filter_type": "derived_type", "filter_string": "Script" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::Path;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use crate::controller::{validate_toggles, FilterToggle};
use crate::engine::{DirectoryIncludePolicy, PassOptions};
use crate::error::{FilterError, Result};
use crate::types::TypeRegistry;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub hide_empty: bool,
    pub directory_include_policy: DirectoryIncludePolicy,
    pub types: TypeTables,
    pub toggles: Vec<FilterToggle>,
}

/// Extra type tables layered over the built-in registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeTables {
    /// Start from the built-in resource types.
    pub builtin: bool,
    /// Extension (without the dot) to declared type.
    pub extensions: FnvHashMap<String, String>,
    /// Declared type to parent type.
    pub parents: FnvHashMap<String, String>,
}

impl Default for TypeTables {
    fn default() -> Self {
        Self {
            builtin: true,
            extensions: FnvHashMap::default(),
            parents: FnvHashMap::default(),
        }
    }
}

impl PanelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FilterError::PathNotFound(path.to_path_buf()),
            _ => FilterError::Io(err),
        })?;
        log::debug!("loading panel config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        validate_toggles(&self.toggles)?;
        for (child, parent) in &self.types.parents {
            if child == parent {
                return Err(FilterError::InvalidConfig(format!(
                    "type {child} cannot be its own parent"
                )));
            }
        }
        Ok(())
    }

    pub fn type_registry(&self) -> TypeRegistry {
        let mut registry = if self.types.builtin {
            TypeRegistry::with_defaults()
        } else {
            TypeRegistry::new()
        };
        for (extension, declared_type) in &self.types.extensions {
            registry.register_extension(extension, declared_type);
        }
        for (child, parent) in &self.types.parents {
            registry.register_parent(child, parent);
        }
        registry
    }

    pub fn pass_options(&self) -> PassOptions {
        PassOptions {
            hide_empty: self.hide_empty,
            directory_include_policy: self.directory_include_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TypeHierarchy;
    use crate::rule::{FileFilterKind, FilterPhase, IncludeType};

    const SAMPLE: &str = r#"{
        "hide_empty": true,
        "directory_include_policy": "any_match",
        "types": {
            "extensions": { ".tres": "Theme" },
            "parents": { "Theme": "Resource" }
        },
        "toggles": [
            {
                "id": "scripts",
                "label": "Scripts",
                "default_pressed": true,
                "file_rules": [
                    {
                        "include_type": "include",
                        "filter_type": "derived_type",
                        "filter_string": "Script"
                    },
                    {
                        "include_type": "exclude",
                        "filter_type": "path_contains",
                        "filter_string": "addons",
                        "when_to_filter": "on_disabled"
                    }
                ]
            },
            { "id": "search", "auto_disable": false, "search_filter": "player" }
        ]
    }"#;

    #[test]
    fn parses_sample() {
        let config = PanelConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(
            config.pass_options(),
            PassOptions {
                hide_empty: true,
                directory_include_policy: DirectoryIncludePolicy::AnyMatch,
            }
        );

        let scripts = &config.toggles[0];
        assert!(scripts.default_pressed);
        assert!(scripts.auto_disable);
        assert_eq!(scripts.file_rules[0].filter_type, FileFilterKind::DerivedType);
        assert_eq!(scripts.file_rules[1].include_type, IncludeType::Exclude);
        assert_eq!(scripts.file_rules[1].when_to_filter, FilterPhase::OnDisabled);

        let search = &config.toggles[1];
        assert!(!search.auto_disable);
        assert_eq!(search.search_filter, "player");
    }

    #[test]
    fn type_tables_extend_builtins() {
        let registry = PanelConfig::from_json_str(SAMPLE).unwrap().type_registry();
        assert_eq!(registry.declared_type_for_name("ui.tres"), Some("Theme"));
        assert_eq!(registry.parent_type("Theme").as_deref(), Some("Resource"));
        assert_eq!(registry.declared_type_for_name("a.gd"), Some("Script"));
    }

    #[test]
    fn builtin_types_can_be_disabled() {
        let config = PanelConfig::from_json_str(r#"{"types": {"builtin": false}}"#).unwrap();
        assert_eq!(config.type_registry().declared_type_for_name("a.gd"), None);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = PanelConfig::from_json_str("{}").unwrap();
        assert!(!config.hide_empty);
        assert_eq!(config.directory_include_policy, DirectoryIncludePolicy::Literal);
        assert!(config.toggles.is_empty());
    }

    #[test]
    fn rejects_invalid_documents() {
        assert!(matches!(
            PanelConfig::from_json_str(r#"{"toggles": [{"id": "a"}, {"id": "a"}]}"#),
            Err(FilterError::InvalidConfig(_))
        ));
        assert!(matches!(
            PanelConfig::from_json_str(r#"{"types": {"parents": {"A": "A"}}}"#),
            Err(FilterError::InvalidConfig(_))
        ));
        assert!(matches!(
            PanelConfig::from_json_str(r#"{"hide_empty": "yes"}"#),
            Err(FilterError::Json(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.json");
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(PanelConfig::from_path(&path).unwrap().toggles.len(), 2);

        assert!(matches!(
            PanelConfig::from_path(dir.path().join("missing.json")),
            Err(FilterError::PathNotFound(_))
        ));
    }
}
