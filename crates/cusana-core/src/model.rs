//! Domain models matching the mail-storage REST API.
//!
//! Field names follow the JSON wire format so the types can be
//! (de)serialized directly.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    /// Creates an identifier from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmailId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EmailId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A sender or recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar image reference, if the store has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Contact {
    /// Creates a contact without an avatar.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }
}

/// A downloadable attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name.
    pub filename: String,
    /// Human-readable size (e.g. `"1.2 MB"`).
    pub size: String,
    /// Download URL.
    pub url: String,
}

/// A single mail item as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    /// Unique, stable identifier.
    pub id: EmailId,
    /// Who sent it.
    pub sender: Contact,
    /// Who it was sent to.
    pub recipient: Contact,
    /// Subject line.
    pub subject: String,
    /// Short excerpt derived from the body.
    pub preview: String,
    /// Full body; paragraphs are separated by a blank line.
    pub body: String,
    /// ISO-8601 timestamp.
    pub date: String,
    /// Read flag.
    pub is_read: bool,
    /// Archived flag.
    pub is_archived: bool,
    /// Attachments in display order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Email {
    /// Iterates over the non-empty body paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.body
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// The three fixed views over the message set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Inbox: everything that is not archived.
    #[default]
    All,
    /// Unread and not archived.
    Unread,
    /// Archived only.
    Archived,
}

impl Filter {
    /// All filters in tab order.
    pub const ALL: [Self; 3] = [Self::All, Self::Unread, Self::Archived];

    /// Value used in the `filter` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Archived => "archived",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Mails",
            Self::Unread => "Unread",
            Self::Archived => "Archive",
        }
    }

    /// Whether the store includes `email` in this view.
    ///
    /// The controller never filters locally; this is the store-side rule.
    #[must_use]
    pub const fn matches(self, email: &Email) -> bool {
        match self {
            Self::All => !email.is_archived,
            Self::Unread => !email.is_read && !email.is_archived,
            Self::Archived => email.is_archived,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmail {
    /// Recipient.
    pub recipient: Contact,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Attachments (always empty from the compose form).
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailPatch {
    /// New read flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    /// New archived flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
    /// New subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Contact>,
    /// Replacement attachment list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl EmailPatch {
    /// Patch that only sets the read flag.
    #[must_use]
    pub fn read(value: bool) -> Self {
        Self {
            is_read: Some(value),
            ..Self::default()
        }
    }

    /// Patch that only sets the archived flag.
    #[must_use]
    pub fn archived(value: bool) -> Self {
        Self {
            is_archived: Some(value),
            ..Self::default()
        }
    }
}

/// Subject for a reply: `Re: ` is added unless already present.
#[must_use]
pub fn reply_subject(subject: &str) -> String {
    if subject
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("re:"))
    {
        subject.to_string()
    } else {
        format!("Re: {subject}")
    }
}

/// Whitespace-normalized excerpt of `text`, at most `limit` characters.
#[must_use]
pub fn build_preview(text: &str, limit: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.chars().count() <= limit {
        return normalized;
    }
    let head: String = normalized.chars().take(limit.saturating_sub(3)).collect();
    format!("{}...", head.trim_end())
}
