//! In-process mail store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use super::{ListQuery, MailStore};
use crate::error::ApiError;
use crate::model::{Contact, Email, EmailId, EmailPatch, NewEmail, build_preview};

const PREVIEW_LIMIT: usize = 64;
const NOT_FOUND: &str = "Email not found";

/// Kind of request received by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `list`
    List,
    /// `get`
    Get,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

/// A request as received by [`MemoryStore`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    /// List with its query.
    List(ListQuery),
    /// Fetch of one message.
    Get(EmailId),
    /// Creation with its payload.
    Create(NewEmail),
    /// Partial update.
    Update(EmailId, EmailPatch),
    /// Deletion.
    Delete(EmailId),
}

impl RecordedRequest {
    /// Kind of this request.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::List(_) => RequestKind::List,
            Self::Get(_) => RequestKind::Get,
            Self::Create(_) => RequestKind::Create,
            Self::Update(..) => RequestKind::Update,
            Self::Delete(_) => RequestKind::Delete,
        }
    }
}

#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    message: String,
}

#[derive(Debug, Default)]
struct Inner {
    emails: Vec<Email>,
    next_id: u64,
    requests: Vec<RecordedRequest>,
    failures: HashMap<RequestKind, Failure>,
    get_latency: HashMap<EmailId, Duration>,
}

impl Inner {
    fn record(&mut self, request: RecordedRequest) -> Result<(), ApiError> {
        let kind = request.kind();
        self.requests.push(request);
        match self.failures.remove(&kind) {
            Some(Failure { status, message }) => Err(ApiError::Status { status, message }),
            None => Ok(()),
        }
    }

    fn find_mut(&mut self, id: &EmailId) -> Result<&mut Email, ApiError> {
        self.emails
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(not_found)
    }
}

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        message: NOT_FOUND.to_string(),
    }
}

fn invalid(message: &str) -> ApiError {
    ApiError::Status {
        status: 422,
        message: message.to_string(),
    }
}

/// Mail store kept in memory.
///
/// Follows the remote service's rules for filtering, search, ordering and
/// defaults on create. Every request is recorded, failures can be injected
/// for the next request of a kind, and `get` can be slowed down per id.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
    current_user: Contact,
}

impl MemoryStore {
    /// Creates an empty store whose new messages are sent by `current_user`.
    #[must_use]
    pub fn new(current_user: Contact) -> Self {
        Self::with_emails(current_user, Vec::new())
    }

    /// Creates a store holding `emails`.
    #[must_use]
    pub fn with_emails(current_user: Contact, emails: Vec<Email>) -> Self {
        let next_id = emails
            .iter()
            .filter_map(|e| e.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            inner: Mutex::new(Inner {
                emails,
                next_id,
                ..Inner::default()
            }),
            current_user,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a message directly, without recording a request.
    pub fn insert(&self, email: Email) {
        let mut inner = self.lock();
        if let Ok(n) = email.id.as_str().parse::<u64>() {
            inner.next_id = inner.next_id.max(n + 1);
        }
        if let Some(existing) = inner.emails.iter_mut().find(|e| e.id == email.id) {
            *existing = email;
        } else {
            inner.emails.push(email);
        }
    }

    /// Current content of a message, bypassing the request log.
    #[must_use]
    pub fn email(&self, id: &EmailId) -> Option<Email> {
        self.lock().emails.iter().find(|e| &e.id == id).cloned()
    }

    /// Number of stored messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().emails.len()
    }

    /// Whether the store holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().emails.is_empty()
    }

    /// All requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests of one kind received so far.
    #[must_use]
    pub fn requests_of(&self, kind: RequestKind) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect()
    }

    /// Forgets the recorded requests.
    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Makes the next request of `kind` fail with `status` and `message`.
    pub fn fail_next(&self, kind: RequestKind, status: u16, message: impl Into<String>) {
        self.lock().failures.insert(
            kind,
            Failure {
                status,
                message: message.into(),
            },
        );
    }

    /// Delays every `get` of `id` by `latency`.
    pub fn set_get_latency(&self, id: &EmailId, latency: Duration) {
        self.lock().get_latency.insert(id.clone(), latency);
    }

    fn matches_search(email: &Email, needle: &str) -> bool {
        [
            &email.sender.name,
            &email.sender.email,
            &email.recipient.name,
            &email.recipient.email,
            &email.subject,
            &email.preview,
            &email.body,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Unread first, then newest first, then ascending id.
fn display_order(a: &Email, b: &Email) -> Ordering {
    a.is_read
        .cmp(&b.is_read)
        .then_with(|| b.date.cmp(&a.date))
        .then_with(|| {
            match (a.id.as_str().parse::<u64>(), b.id.as_str().parse::<u64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => a.id.cmp(&b.id),
            }
        })
}

#[async_trait]
impl MailStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Email>, ApiError> {
        let mut inner = self.lock();
        inner.record(RecordedRequest::List(query.clone()))?;

        let needle = query.search_text().map(str::to_lowercase);
        let mut emails: Vec<Email> = inner
            .emails
            .iter()
            .filter(|e| query.filter.matches(e))
            .filter(|e| needle.as_deref().is_none_or(|n| Self::matches_search(e, n)))
            .cloned()
            .collect();
        emails.sort_by(display_order);
        debug!("Listed {} emails for {}", emails.len(), query.filter);
        Ok(emails)
    }

    async fn get(&self, id: &EmailId) -> Result<Email, ApiError> {
        let latency = {
            let mut inner = self.lock();
            inner.record(RecordedRequest::Get(id.clone()))?;
            inner.get_latency.get(id).copied()
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        self.email(id).ok_or_else(not_found)
    }

    async fn create(&self, email: &NewEmail) -> Result<Email, ApiError> {
        let mut inner = self.lock();
        inner.record(RecordedRequest::Create(email.clone()))?;

        let subject = email.subject.trim();
        let body = email.body.trim();
        if subject.is_empty() || body.is_empty() {
            return Err(invalid("Subject and body must not be empty"));
        }
        if email.recipient.name.trim().is_empty() || email.recipient.email.trim().len() < 3 {
            return Err(invalid("Recipient name and email are required"));
        }

        let id = EmailId::new(inner.next_id.to_string());
        inner.next_id += 1;
        let created = Email {
            id,
            sender: self.current_user.clone(),
            recipient: Contact::new(email.recipient.name.clone(), email.recipient.email.clone()),
            subject: subject.to_string(),
            preview: build_preview(&email.body, PREVIEW_LIMIT),
            body: body.to_string(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            is_read: true,
            is_archived: false,
            attachments: email.attachments.clone(),
        };
        inner.emails.push(created.clone());
        debug!("Created email {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &EmailId, patch: &EmailPatch) -> Result<Email, ApiError> {
        let mut inner = self.lock();
        inner.record(RecordedRequest::Update(id.clone(), patch.clone()))?;

        let email = inner.find_mut(id)?;
        if let Some(is_read) = patch.is_read {
            email.is_read = is_read;
        }
        if let Some(is_archived) = patch.is_archived {
            email.is_archived = is_archived;
        }
        if let Some(subject) = &patch.subject {
            email.subject = subject.trim().to_string();
        }
        if let Some(body) = &patch.body {
            email.body = body.trim().to_string();
            email.preview = build_preview(&email.body, PREVIEW_LIMIT);
        }
        if let Some(recipient) = &patch.recipient {
            email.recipient = Contact::new(recipient.name.trim(), recipient.email.trim());
        }
        if let Some(attachments) = &patch.attachments {
            email.attachments.clone_from(attachments);
        }
        Ok(email.clone())
    }

    async fn delete(&self, id: &EmailId) -> Result<(), ApiError> {
        let mut inner = self.lock();
        inner.record(RecordedRequest::Delete(id.clone()))?;

        let before = inner.emails.len();
        inner.emails.retain(|e| &e.id != id);
        if inner.emails.len() == before {
            return Err(not_found());
        }
        debug!("Deleted email {}", id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::model::Filter;

    fn email(id: &str, subject: &str, date: &str, is_read: bool, is_archived: bool) -> Email {
        Email {
            id: EmailId::new(id),
            sender: Contact::new("Jane Doe", "jane@example.com"),
            recipient: Contact::new("Richard Brown", "richard@example.com"),
            subject: subject.into(),
            preview: subject.into(),
            body: format!("Body of {subject}"),
            date: date.into(),
            is_read,
            is_archived,
            attachments: Vec::new(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::with_emails(
            ClientConfig::default().current_user,
            vec![
                email("1", "Proposal for Partnership", "2024-12-10T09:00:00", false, false),
                email("2", "Contract Renewal Due", "2024-12-11T08:20:00", true, false),
                email("3", "Invoice", "2024-12-12T10:00:00", true, true),
                email("4", "Team Offsite", "2024-12-12T11:00:00", false, false),
            ],
        )
    }

    fn ids(emails: &[Email]) -> Vec<&str> {
        emails.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_orders_unread_then_newest() {
        let store = store();
        let all = store.list(&ListQuery::new(Filter::All, "")).await.unwrap();
        assert_eq!(ids(&all), vec!["4", "1", "2"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_across_fields() {
        let store = store();
        let found = store
            .list(&ListQuery::new(Filter::All, "  CONTRACT "))
            .await
            .unwrap();
        assert_eq!(ids(&found), vec!["2"]);

        let by_sender = store
            .list(&ListQuery::new(Filter::Archived, "jane@"))
            .await
            .unwrap();
        assert_eq!(ids(&by_sender), vec!["3"]);
    }

    #[tokio::test]
    async fn test_create_applies_server_defaults() {
        let store = store();
        let created = store
            .create(&NewEmail {
                recipient: Contact::new("Ann", "ann@example.com"),
                subject: "  Lunch  ".into(),
                body: " See you\n at noon ".into(),
                attachments: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(created.id.as_str(), "5");
        assert_eq!(created.sender.email, "richard@example.com");
        assert_eq!(created.subject, "Lunch");
        assert_eq!(created.body, "See you\n at noon");
        assert_eq!(created.preview, "See you at noon");
        assert!(created.is_read);
        assert!(!created.is_archived);
        assert!(chrono::DateTime::parse_from_rfc3339(&created.date).is_ok());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let store = store();
        let err = store
            .create(&NewEmail {
                recipient: Contact::new("Ann", "ann@example.com"),
                subject: "   ".into(),
                body: "Hi".into(),
                attachments: Vec::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 422, .. }));
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let store = store();
        let missing = EmailId::new("99");
        let err = store
            .update(&missing, &EmailPatch::read(true))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        let err = store.delete(&missing).await.unwrap_err();
        assert_eq!(err.to_string(), "Email not found");
        let err = store.get(&missing).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_update_body_refreshes_preview() {
        let store = store();
        let patch = EmailPatch {
            body: Some("  New\n\nbody ".into()),
            ..EmailPatch::default()
        };
        let updated = store.update(&EmailId::new("1"), &patch).await.unwrap();
        assert_eq!(updated.body, "New\n\nbody");
        assert_eq!(updated.preview, "New body");
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let store = store();
        store.fail_next(RequestKind::Delete, 500, "boom");

        let err = store.delete(&EmailId::new("1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(store.len(), 4);

        store.delete(&EmailId::new("1")).await.unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.requests_of(RequestKind::Delete).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_latency_is_per_id() {
        let store = store();
        store.set_get_latency(&EmailId::new("1"), Duration::from_secs(5));

        let start = tokio::time::Instant::now();
        store.get(&EmailId::new("2")).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);

        store.get(&EmailId::new("1")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert_eq!(
            store.requests(),
            vec![
                RecordedRequest::Get(EmailId::new("2")),
                RecordedRequest::Get(EmailId::new("1")),
            ]
        );
    }
}
