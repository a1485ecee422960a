//! Settings model and persistence.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cusana_core::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::style::widgets::palette::ThemeMode;

/// Application settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Current theme mode.
    pub theme_mode: ThemeMode,
    /// Whether the sidebar is collapsed to icons.
    pub sidebar_collapsed: bool,
    /// Mail store connection and UI pacing.
    pub client: ClientConfig,
}

impl AppSettings {
    /// Default location: `<config dir>/cusana/settings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cusana")
            .join("settings.json")
    }

    /// Reads settings from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Writes settings to `path`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        tracing::info!("Settings saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cusana-settings-{}-{name}", std::process::id()))
            .join("settings.json")
    }

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let settings = AppSettings::load(&scratch_path("missing")).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.client.api_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
            sidebar_collapsed: true,
            client: ClientConfig {
                api_url: "http://mail.internal:9000".into(),
                ..ClientConfig::default()
            },
        };

        settings.save(&path).await.unwrap();
        let loaded = AppSettings::load(&path).await.unwrap();
        assert_eq!(loaded, settings);

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{"theme_mode": "dark"}"#).unwrap();
        assert_eq!(settings.theme_mode, ThemeMode::Dark);
        assert!(!settings.sidebar_collapsed);
        assert_eq!(settings.client.search_debounce_ms, 180);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let path = scratch_path("corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = AppSettings::load(&path).await.unwrap_err();
        assert!(err.to_string().starts_with("parsing "));

        tokio::fs::remove_dir_all(path.parent().unwrap()).await.unwrap();
    }
}
