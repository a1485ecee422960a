//! Access to the remote mail store.
//!
//! [`MailStore`] is the seam between the controller and the mail-storage
//! service. [`HttpMailStore`] talks to the REST API; [`MemoryStore`]
//! keeps messages in process with the same observable behaviour.

mod http;
mod memory;

pub use http::HttpMailStore;
pub use memory::{MemoryStore, RecordedRequest, RequestKind};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{Email, EmailId, EmailPatch, Filter, NewEmail};

/// Parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Which view to list.
    pub filter: Filter,
    /// Committed search text; empty means no search.
    pub search: String,
}

impl ListQuery {
    /// Creates a query.
    #[must_use]
    pub fn new(filter: Filter, search: impl Into<String>) -> Self {
        Self {
            filter,
            search: search.into(),
        }
    }

    /// Search text, or `None` when blank.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        let search = self.search.trim();
        (!search.is_empty()).then_some(search)
    }
}

/// Operations offered by the mail-storage service.
#[async_trait]
pub trait MailStore: Send + Sync {
    /// Lists messages for a filter and optional search, in display order.
    async fn list(&self, query: &ListQuery) -> Result<Vec<Email>, ApiError>;

    /// Fetches a single message.
    async fn get(&self, id: &EmailId) -> Result<Email, ApiError>;

    /// Creates a message; the store fills in id, sender, date and flags.
    async fn create(&self, email: &NewEmail) -> Result<Email, ApiError>;

    /// Applies a partial update and returns the full updated message.
    async fn update(&self, id: &EmailId, patch: &EmailPatch) -> Result<Email, ApiError>;

    /// Deletes a message.
    async fn delete(&self, id: &EmailId) -> Result<(), ApiError>;
}
