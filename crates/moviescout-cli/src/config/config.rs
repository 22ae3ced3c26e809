//! `AppConfig` struct and TOML read/write.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Browser behavior.
    #[serde(default)]
    pub browse: BrowseConfig,
    /// Query cache policy.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Toast notifications.
    #[serde(default)]
    pub notifications: NotificationsConfig,
    /// Translation overrides: language tag -> key name -> string.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, BTreeMap<String, String>>,
}

/// Browser behavior configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowseConfig {
    /// Initial language.
    pub language: Language,
    /// Whether adult titles are included in results.
    pub include_adult: bool,
    /// Start on the trending feed (otherwise start idle until a search).
    pub start_with_trending: bool,
    /// Scroll position (lines) above which the scroll-to-top badge shows.
    pub scroll_threshold: u16,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            language: Language::EnUs,
            include_adult: true,
            start_with_trending: true,
            scroll_threshold: 12,
        }
    }
}

/// Query cache configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds a cached response counts as fresh.
    pub stale_secs: u64,
    /// Maximum cached responses per query.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_secs: 300,
            capacity: 64,
        }
    }
}

impl CacheConfig {
    /// Freshness window as a `Duration`.
    #[must_use]
    pub const fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_secs)
    }
}

/// Toast notification configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationsConfig {
    /// Seconds a toast stays on screen.
    pub toast_secs: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { toast_secs: 4 }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.browse.language, Language::EnUs);
        assert!(config.browse.include_adult);
        assert!(config.browse.start_with_trending);
        assert_eq!(config.cache.stale_after(), Duration::from_secs(300));
        assert!(config.translations.is_empty());
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.browse.language = Language::UkUa;
        config.browse.scroll_threshold = 20;
        config.translations.insert(
            String::from("uk-UA"),
            BTreeMap::from([(String::from("loader_text"), String::from("Чекайте"))]),
        );

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\nlanguage = \"uk-UA\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.browse.language, Language::UkUa);
        assert_eq!(config.browse.scroll_threshold, 12);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_load_rejects_unknown_language() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\nlanguage = \"fr-FR\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }
}
