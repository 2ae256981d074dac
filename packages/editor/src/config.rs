use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "mindmap.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo/redo behavior
    #[serde(default)]
    pub history: HistoryConfig,

    /// Verify tree invariants after every dispatch
    #[serde(default = "default_check_invariants")]
    pub check_invariants: bool,
}

fn default_check_invariants() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Oldest undo entries are dropped beyond this depth (unbounded if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    #[serde(default)]
    pub redo_policy: RedoPolicy,
}

/// What a new undoable operation does to the redo stack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RedoPolicy {
    /// Keep redo entries; they stay available after new edits
    #[default]
    Retain,
    /// Drop redo entries as soon as a new undoable operation lands
    ClearOnEdit,
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            // Return default config if none exists
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            check_invariants: default_check_invariants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "history": {
                "maxDepth": 50,
                "redoPolicy": "clearOnEdit"
            },
            "checkInvariants": false
        }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.history.max_depth, Some(50));
        assert_eq!(config.history.redo_policy, RedoPolicy::ClearOnEdit);
        assert!(!config.check_invariants);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history.max_depth, None);
        assert_eq!(config.history.redo_policy, RedoPolicy::Retain);
        assert!(config.check_invariants);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "history": { "maxDepth": 3 } }"#,
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.history.max_depth, Some(3));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        assert!(matches!(
            EditorConfig::from_json(r#"{ "history": { "redoPolicy": "sometimes" } }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
