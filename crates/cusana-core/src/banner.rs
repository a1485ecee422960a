//! Single-slot transient status banner.
//!
//! A newer banner always replaces the current one. Each banner stays
//! visible for a fixed time-to-live unless replaced or dismissed first.

use std::time::Duration;

use tokio::time::Instant;

/// Default banner lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_millis(2600);

/// Visual tone of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Confirmation of a completed action.
    Success,
    /// A failed action.
    Error,
}

/// A posted banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Identifier, unique per post.
    pub id: u64,
    /// Tone.
    pub tone: Tone,
    /// Text shown to the user.
    pub text: String,
    posted_at: Instant,
    ttl: Duration,
}

impl Banner {
    /// Whether the banner's lifetime has elapsed at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.posted_at) >= self.ttl
    }

    /// Whether this is an error banner.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.tone, Tone::Error)
    }
}

/// Holds at most one banner.
#[derive(Debug, Clone)]
pub struct BannerSlot {
    current: Option<Banner>,
    ttl: Duration,
    next_id: u64,
}

impl Default for BannerSlot {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl BannerSlot {
    /// Creates an empty slot whose banners live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            ttl,
            next_id: 1,
        }
    }

    /// Posts a banner, replacing any current one. Returns its id.
    pub fn post(&mut self, tone: Tone, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Banner {
            id,
            tone,
            text: text.into(),
            posted_at: Instant::now(),
            ttl: self.ttl,
        });
        id
    }

    /// Posts a success banner.
    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.post(Tone::Success, text)
    }

    /// Posts an error banner.
    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.post(Tone::Error, text)
    }

    /// The current banner, expired or not.
    #[must_use]
    pub const fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// Drops the current banner if it has expired. Returns whether it did.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|b| b.is_expired_at(now)) {
            self.current = None;
            return true;
        }
        false
    }

    /// Clears the banner if it is still the one identified by `id`.
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|b| b.id == id) {
            self.current = None;
            return true;
        }
        false
    }

    /// Clears an error banner, leaving a success banner in place.
    pub fn clear_error(&mut self) {
        if self.current.as_ref().is_some_and(Banner::is_error) {
            self.current = None;
        }
    }
}
