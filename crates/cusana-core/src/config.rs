//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::Contact;

/// Environment variable that overrides [`ClientConfig::api_url`].
pub const API_URL_ENV: &str = "CUSANA_API_URL";

/// Settings for talking to the mail store and pacing the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the mail-storage API.
    pub api_url: String,
    /// Quiet period before a search is committed, in milliseconds.
    pub search_debounce_ms: u64,
    /// How long a status banner stays visible, in milliseconds.
    pub banner_ttl_ms: u64,
    /// Lower-case subject fragment preferred when nothing else is selected.
    pub default_subject_hint: String,
    /// Sender identity used by the in-memory store.
    pub current_user: Contact,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            search_debounce_ms: 180,
            banner_ttl_ms: 2600,
            default_subject_hint: "proposal for partnership".to_string(),
            current_user: Contact {
                name: "Richard Brown".to_string(),
                email: "richard@example.com".to_string(),
                avatar: Some("/avatars/richard.jpg".to_string()),
            },
        }
    }
}

impl ClientConfig {
    /// Applies overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    /// Replaces the API URL when `url` is present and non-blank.
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("API URL overridden to {}", url.trim());
            self.api_url = url.trim().to_string();
        }
        self
    }

    /// Search debounce window.
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Banner lifetime.
    #[must_use]
    pub const fn banner_ttl(&self) -> Duration {
        Duration::from_millis(self.banner_ttl_ms)
    }

    /// Absolute URL for a store-relative link such as an attachment.
    ///
    /// Links that are already absolute, or that cannot be joined to the API
    /// URL, are returned unchanged.
    #[must_use]
    pub fn resolve_link(&self, link: &str) -> String {
        Url::parse(&self.api_url)
            .and_then(|base| base.join(link))
            .map_or_else(|_| link.to_string(), String::from)
    }
}
