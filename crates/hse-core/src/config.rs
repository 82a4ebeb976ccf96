use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::HseError;

/// Settings shared by everyone working from one snapshot directory,
/// read from `<root>/.hse/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HseConfig {
    #[serde(default)]
    pub priority: PriorityConfig,
    #[serde(default)]
    pub checklist: ChecklistConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

/// Day windows used to derive a priority for items without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    #[serde(default = "default_high_within_days")]
    pub high_within_days: i64,
    #[serde(default = "default_medium_within_days")]
    pub medium_within_days: i64,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            high_within_days: default_high_within_days(),
            medium_within_days: default_medium_within_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistConfig {
    /// Preferred language for template titles and item text.
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Default number of entries shown by `hse feed`.
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            limit: default_feed_limit(),
        }
    }
}

/// Per-user preferences from `<config_dir>/hse/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

/// Load `<root>/.hse/config.toml`; a missing file yields defaults.
///
/// # Errors
///
/// Returns [`HseError::ConfigRead`] or [`HseError::ConfigParse`] when the file
/// exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<HseConfig, HseError> {
    load_toml(&project_root.join(".hse/config.toml"))
}

/// Load the user config; a missing config directory or file yields defaults.
///
/// # Errors
///
/// Returns [`HseError::ConfigRead`] or [`HseError::ConfigParse`] when the file
/// exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig, HseError> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };
    load_toml(&config_dir.join("hse/config.toml"))
}

fn load_toml<T>(path: &Path) -> Result<T, HseError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| HseError::ConfigRead {
        path: PathBuf::from(path),
        source,
    })?;

    toml::from_str::<T>(&content).map_err(|source| HseError::ConfigParse {
        path: PathBuf::from(path),
        source,
    })
}

const fn default_high_within_days() -> i64 {
    3
}

const fn default_medium_within_days() -> i64 {
    7
}

fn default_language() -> String {
    "en".to_string()
}

const fn default_feed_limit() -> usize {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) {
        let hse_dir = dir.join(".hse");
        std::fs::create_dir_all(&hse_dir).expect("config dir must be created");
        std::fs::write(hse_dir.join("config.toml"), body).expect("config must be written");
    }

    #[test]
    fn missing_project_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_project_config(dir.path()).unwrap();
        assert_eq!(cfg, HseConfig::default());
        assert_eq!(cfg.priority.high_within_days, 3);
        assert_eq!(cfg.priority.medium_within_days, 7);
        assert_eq!(cfg.checklist.language, "en");
        assert_eq!(cfg.feed.limit, 20);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "[priority]\nhigh_within_days = 5\n\n[checklist]\nlanguage = \"ar\"\n",
        );

        let cfg = load_project_config(dir.path()).unwrap();
        assert_eq!(cfg.priority.high_within_days, 5);
        assert_eq!(cfg.priority.medium_within_days, 7);
        assert_eq!(cfg.checklist.language, "ar");
        assert_eq!(cfg.feed.limit, 20);
    }

    #[test]
    fn malformed_project_config_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[priority\nhigh_within_days = ");

        let err = load_project_config(dir.path()).unwrap_err();
        assert!(matches!(err, HseError::ConfigParse { .. }));
        assert_eq!(err.code(), crate::ErrorCode::ConfigParseError);
    }

    #[test]
    fn user_config_parses_output() {
        let cfg: UserConfig = toml::from_str("output = \"json\"").unwrap();
        assert_eq!(cfg.output.as_deref(), Some("json"));
    }
}
