//! Integration tests for the mail controller.
//!
//! The controller is driven against an in-memory store seeded with a small
//! inbox, and assertions are made on view-state snapshots and on the
//! requests the store received.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;

use cusana_core::{
    ApiError, ClientConfig, ComposeField, Contact, Email, EmailId, EmailPatch, Error, Filter,
    ListQuery, MailController, MailStore, MemoryStore, NewEmail, RecordedRequest, RequestKind,
    SelectionHint, Tone, ValidationError,
};

fn email(id: &str, subject: &str, date: &str, is_read: bool, is_archived: bool) -> Email {
    Email {
        id: EmailId::new(id),
        sender: Contact::new("Jane Doe", "jane@example.com"),
        recipient: Contact::new("Richard Brown", "richard@example.com"),
        subject: subject.into(),
        preview: format!("About {subject}"),
        body: format!("Hi Richard,\n\nAbout {subject}.\n\nBest,\nJane"),
        date: date.into(),
        is_read,
        is_archived,
        attachments: Vec::new(),
    }
}

/// Message 1 unread, message 2 read, message 3 read and archived.
fn seeded() -> Vec<Email> {
    vec![
        email("1", "Proposal for Partnership", "2024-12-10T09:00:00", false, false),
        email("2", "Contract Renewal Due", "2024-12-11T08:20:00", true, false),
        email("3", "Invoice December", "2024-12-12T10:00:00", true, true),
    ]
}

fn setup() -> (Arc<MemoryStore>, MailController) {
    let config = ClientConfig::default();
    let store = Arc::new(MemoryStore::with_emails(
        config.current_user.clone(),
        seeded(),
    ));
    let controller = MailController::new(store.clone(), config);
    (store, controller)
}

async fn mounted() -> (Arc<MemoryStore>, MailController) {
    let (store, controller) = setup();
    controller.mount().await.unwrap();
    store.clear_requests();
    (store, controller)
}

fn listed(controller: &MailController) -> Vec<String> {
    controller
        .snapshot()
        .emails
        .iter()
        .map(|e| e.id.to_string())
        .collect()
}

fn banner(controller: &MailController) -> Option<(Tone, String)> {
    controller.snapshot().banner.map(|b| (b.tone, b.text))
}

#[tokio::test]
async fn test_filters_show_store_results() {
    let (_store, controller) = setup();
    controller.mount().await.unwrap();
    assert_eq!(listed(&controller), vec!["1", "2"]);

    controller.set_filter(Filter::Unread).await.unwrap();
    assert_eq!(listed(&controller), vec!["1"]);

    controller.set_filter(Filter::Archived).await.unwrap();
    assert_eq!(listed(&controller), vec!["3"]);
}

#[tokio::test]
async fn test_mount_selects_default_subject_and_loads_detail() {
    let (store, controller) = setup();
    controller.mount().await.unwrap();

    let view = controller.snapshot();
    assert_eq!(view.selected_id, Some(EmailId::new("1")));
    assert_eq!(view.detail.unwrap().subject, "Proposal for Partnership");
    assert!(!view.loading.any());
    assert_eq!(
        store.requests(),
        vec![
            RecordedRequest::List(ListQuery::new(Filter::All, "")),
            RecordedRequest::Get(EmailId::new("1")),
        ]
    );
}

#[tokio::test]
async fn test_same_filter_does_not_refetch() {
    let (store, controller) = mounted().await;
    controller.set_filter(Filter::All).await.unwrap();
    assert!(store.requests().is_empty());
}

#[tokio::test]
async fn test_marking_read_under_unread_filter_drops_message() {
    let (store, controller) = mounted().await;
    controller.set_filter(Filter::Unread).await.unwrap();
    assert_eq!(listed(&controller), vec!["1"]);

    controller.select(&EmailId::new("1")).await.unwrap();

    let view = controller.snapshot();
    assert!(view.emails.is_empty());
    assert_eq!(view.selected_id, None);
    assert_eq!(view.detail, None);
    assert!(store.email(&EmailId::new("1")).unwrap().is_read);
}

#[tokio::test]
async fn test_selecting_unread_marks_read_without_refresh_in_inbox() {
    let (store, controller) = mounted().await;
    controller.select(&EmailId::new("2")).await.unwrap();
    controller.select(&EmailId::new("1")).await.unwrap();

    let view = controller.snapshot();
    assert!(view.email(&EmailId::new("1")).unwrap().is_read);
    assert!(view.detail.unwrap().is_read);
    assert!(store.requests_of(RequestKind::List).is_empty());
}

#[tokio::test]
async fn test_reselecting_displayed_message_skips_detail_fetch() {
    let (store, controller) = mounted().await;
    controller.select(&EmailId::new("1")).await.unwrap();
    controller.select(&EmailId::new("1")).await.unwrap();
    assert!(store.requests_of(RequestKind::Get).is_empty());
}

#[tokio::test]
async fn test_archiving_moves_message_between_views() {
    let (_store, controller) = mounted().await;

    let updated = controller.toggle_archived(&EmailId::new("1")).await.unwrap();
    assert!(updated.is_archived);
    assert_eq!(listed(&controller), vec!["2"]);
    assert_eq!(controller.snapshot().selected_id, Some(EmailId::new("2")));

    controller.set_filter(Filter::Unread).await.unwrap();
    assert!(listed(&controller).is_empty());

    controller.set_filter(Filter::Archived).await.unwrap();
    assert_eq!(listed(&controller), vec!["1", "3"]);
}

#[tokio::test]
async fn test_toggle_read_flips_current_value() {
    let (_store, controller) = mounted().await;
    let updated = controller.toggle_read(&EmailId::new("2")).await.unwrap();
    assert!(!updated.is_read);
    assert_eq!(controller.snapshot().unread_count(), 2);
}

#[tokio::test]
async fn test_toggle_unknown_email_is_reported() {
    let (store, controller) = mounted().await;
    let err = controller.toggle_read(&EmailId::new("42")).await.unwrap_err();
    assert!(matches!(err, Error::UnknownEmail(_)));
    assert_eq!(
        banner(&controller),
        Some((Tone::Error, "Could not update read state.".to_string()))
    );
    assert!(store.requests().is_empty());
}

#[tokio::test]
async fn test_compose_with_blank_field_issues_no_request() {
    let (store, controller) = mounted().await;
    controller.open_compose();
    controller.edit_compose(ComposeField::ToName, "Ann Lee");
    controller.edit_compose(ComposeField::ToEmail, "ann@example.com");
    controller.edit_compose(ComposeField::Subject, "   ");
    controller.edit_compose(ComposeField::Body, "Lunch on Friday?");

    let err = controller.send_compose().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingComposeFields)
    ));
    assert!(store.requests().is_empty());
    assert_eq!(
        banner(&controller),
        Some((
            Tone::Error,
            "Recipient, subject, and body are required.".to_string()
        ))
    );
    assert!(controller.snapshot().compose.open);
}

#[tokio::test]
async fn test_compose_success_resets_view_and_selects_created() {
    let (store, controller) = mounted().await;
    controller.set_filter(Filter::Archived).await.unwrap();
    controller.commit_search("invoice").await.unwrap();

    controller.open_compose();
    controller.edit_compose(ComposeField::ToName, " Ann Lee ");
    controller.edit_compose(ComposeField::ToEmail, "ann@example.com");
    controller.edit_compose(ComposeField::Subject, "Lunch");
    controller.edit_compose(ComposeField::Body, " Friday at noon? ");
    let created = controller.send_compose().await.unwrap();

    assert_eq!(created.id, EmailId::new("4"));
    assert_eq!(created.recipient.name, "Ann Lee");
    assert_eq!(created.body, "Friday at noon?");

    let view = controller.snapshot();
    assert!(!view.compose.open);
    assert!(view.compose.subject.is_empty());
    assert_eq!(view.filter, Filter::All);
    assert!(view.search_input.is_empty());
    assert!(view.search_query.is_empty());
    assert_eq!(view.selected_id, Some(created.id.clone()));
    assert_eq!(view.detail, Some(created.clone()));
    assert!(view.email(&created.id).is_some());
    assert!(!view.loading.sending_new());
    assert_eq!(
        view.banner.map(|b| (b.tone, b.text)),
        Some((Tone::Success, "Message sent.".to_string()))
    );

    let lists = store.requests_of(RequestKind::List);
    assert_eq!(
        lists.last(),
        Some(&RecordedRequest::List(ListQuery::new(Filter::All, "")))
    );
}

#[tokio::test]
async fn test_compose_failure_keeps_draft() {
    let (store, controller) = mounted().await;
    store.fail_next(RequestKind::Create, 503, "Mail store unavailable");

    controller.open_compose();
    controller.edit_compose(ComposeField::ToName, "Ann Lee");
    controller.edit_compose(ComposeField::ToEmail, "ann@example.com");
    controller.edit_compose(ComposeField::Subject, "Lunch");
    controller.edit_compose(ComposeField::Body, "Friday?");
    controller.send_compose().await.unwrap_err();

    let view = controller.snapshot();
    assert!(view.compose.open);
    assert_eq!(view.compose.subject, "Lunch");
    assert!(!view.loading.sending_new());
    assert_eq!(
        view.banner.map(|b| b.text),
        Some("Mail store unavailable".to_string())
    );
}

#[tokio::test]
async fn test_reply_prefixes_subject_once() {
    let (store, controller) = mounted().await;
    controller.select(&EmailId::new("2")).await.unwrap();
    controller.edit_reply("  Signed copy attached.  ");
    let reply = controller.send_reply().await.unwrap();

    assert_eq!(reply.subject, "Re: Contract Renewal Due");
    assert_eq!(reply.recipient, Contact::new("Jane Doe", "jane@example.com"));
    assert_eq!(reply.body, "Signed copy attached.");

    let view = controller.snapshot();
    assert!(view.reply_draft.is_empty());
    assert_eq!(view.selected_id, Some(reply.id.clone()));
    assert_eq!(
        view.banner.map(|b| b.text),
        Some("Reply sent.".to_string())
    );

    // The reply is now displayed; answering it keeps a single prefix.
    controller.edit_reply("Thanks!");
    let second = controller.send_reply().await.unwrap();
    assert_eq!(second.subject, "Re: Contract Renewal Due");
    assert_eq!(store.requests_of(RequestKind::Create).len(), 2);
}

#[tokio::test]
async fn test_blank_reply_issues_no_request() {
    let (store, controller) = mounted().await;
    controller.edit_reply(" \n ");
    let err = controller.send_reply().await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmptyReply)));
    assert!(store.requests().is_empty());
    assert_eq!(
        banner(&controller),
        Some((Tone::Error, "Write a reply before sending.".to_string()))
    );
}

#[tokio::test]
async fn test_forward_seeds_empty_draft() {
    let (_store, controller) = mounted().await;
    controller.start_forward(&EmailId::new("2")).await.unwrap();

    let view = controller.snapshot();
    assert_eq!(view.selected_id, Some(EmailId::new("2")));
    assert_eq!(view.reply_draft, "Forwarding Contract Renewal Due\n\n");

    // An existing draft is left alone.
    controller.edit_reply("Keep this");
    controller.start_forward(&EmailId::new("2")).await.unwrap();
    assert_eq!(controller.snapshot().reply_draft, "Keep this");
}

#[tokio::test]
async fn test_delete_refreshes_with_default_selection() {
    let (store, controller) = mounted().await;
    controller.select(&EmailId::new("2")).await.unwrap();
    controller.delete(&EmailId::new("1")).await.unwrap();

    assert_eq!(listed(&controller), vec!["2"]);
    assert_eq!(
        banner(&controller),
        Some((Tone::Success, "Email deleted.".to_string()))
    );
    assert!(store.email(&EmailId::new("1")).is_none());
    assert_eq!(
        store.requests_of(RequestKind::List).last(),
        Some(&RecordedRequest::List(ListQuery::new(Filter::All, "")))
    );
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_list() {
    let (store, controller) = mounted().await;
    store.fail_next(RequestKind::List, 500, "");

    let err = controller.set_filter(Filter::Unread).await.unwrap_err();
    assert!(matches!(err, Error::Api(_)));

    let view = controller.snapshot();
    assert_eq!(view.filter, Filter::Unread);
    assert_eq!(listed(&controller), vec!["1", "2"]);
    assert_eq!(view.selected_id, Some(EmailId::new("1")));
    assert!(!view.loading.list());
    assert_eq!(
        view.banner.map(|b| (b.tone, b.text)),
        Some((Tone::Error, "Failed to load emails.".to_string()))
    );

    // The next successful refresh clears the error.
    controller.refresh_list(SelectionHint::Retain).await.unwrap();
    assert_eq!(listed(&controller), vec!["1"]);
    assert!(controller.snapshot().banner.is_none());
}

#[tokio::test]
async fn test_store_message_is_shown_on_update_failure() {
    let (store, controller) = mounted().await;
    store.fail_next(RequestKind::Update, 404, "Email not found");

    controller
        .set_archived(&EmailId::new("2"), true)
        .await
        .unwrap_err();
    assert_eq!(
        banner(&controller),
        Some((Tone::Error, "Email not found".to_string()))
    );
    assert!(!controller.snapshot().email(&EmailId::new("2")).unwrap().is_archived);
    assert!(store.requests_of(RequestKind::List).is_empty());
}

#[tokio::test]
async fn test_failed_detail_keeps_previous_detail() {
    let (store, controller) = mounted().await;
    store.fail_next(RequestKind::Get, 500, "");

    controller.select(&EmailId::new("2")).await.unwrap_err();
    let view = controller.snapshot();
    assert_eq!(view.selected_id, Some(EmailId::new("2")));
    assert_eq!(view.detail.unwrap().id, EmailId::new("1"));
    assert_eq!(
        view.banner.map(|b| b.text),
        Some("Failed to load email.".to_string())
    );
}

/// A slower, older detail request never replaces a newer one's result.
/// Its response still refreshes the listed copy of its own message.
#[tokio::test(start_paused = true)]
async fn test_overlapping_detail_fetches_keep_latest_request() {
    let (store, controller) = mounted().await;
    store.set_get_latency(&EmailId::new("2"), Duration::from_millis(500));
    store.insert(email(
        "2",
        "Contract Renewal Due (updated)",
        "2024-12-11T08:20:00",
        true,
        false,
    ));

    let (older, newer) = (EmailId::new("2"), EmailId::new("1"));
    let slow = controller.select(&older);
    let fast = controller.select(&newer);
    let (slow, fast) = tokio::join!(slow, fast);
    slow.unwrap();
    fast.unwrap();

    let view = controller.snapshot();
    assert_eq!(view.selected_id, Some(EmailId::new("1")));
    assert_eq!(view.detail.as_ref().unwrap().id, EmailId::new("1"));
    assert_eq!(
        view.email(&EmailId::new("2")).unwrap().subject,
        "Contract Renewal Due (updated)"
    );
    assert!(!view.loading.detail());
}

/// Answers `get` with the row as it was when the request arrived.
struct LaggingReads {
    inner: Arc<MemoryStore>,
    lag: Duration,
}

#[async_trait]
impl MailStore for LaggingReads {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Email>, ApiError> {
        self.inner.list(query).await
    }

    async fn get(&self, id: &EmailId) -> Result<Email, ApiError> {
        let row = self.inner.get(id).await;
        tokio::time::sleep(self.lag).await;
        row
    }

    async fn create(&self, email: &NewEmail) -> Result<Email, ApiError> {
        self.inner.create(email).await
    }

    async fn update(&self, id: &EmailId, patch: &EmailPatch) -> Result<Email, ApiError> {
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: &EmailId) -> Result<(), ApiError> {
        self.inner.delete(id).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_selecting_unread_detail_reflects_confirmed_read() {
    let config = ClientConfig::default();
    let memory = Arc::new(MemoryStore::with_emails(
        config.current_user.clone(),
        seeded(),
    ));
    memory.insert(email("4", "Quarterly Report", "2024-12-13T07:30:00", false, false));
    let store = Arc::new(LaggingReads {
        inner: memory.clone(),
        lag: Duration::from_millis(50),
    });
    let controller = MailController::new(store, config);
    controller.mount().await.unwrap();
    memory.clear_requests();

    let id = EmailId::new("4");
    controller.select(&id).await.unwrap();

    let view = controller.snapshot();
    assert!(memory.email(&id).unwrap().is_read);
    assert!(view.email(&id).unwrap().is_read);
    assert!(view.detail.as_ref().unwrap().is_read);
    assert_eq!(
        memory.requests(),
        vec![
            RecordedRequest::Update(id.clone(), EmailPatch::read(true)),
            RecordedRequest::Get(id.clone()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_search_commits_after_typing_pauses() {
    let (store, controller) = mounted().await;

    let typing = controller.clone();
    let first = tokio::spawn(async move { typing.search("Con").await });
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(controller.snapshot().search_input, "Con");
    assert!(store.requests().is_empty());

    let typing = controller.clone();
    let second = tokio::spawn(async move { typing.search(" Contract ").await });
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    assert_eq!(
        store.requests_of(RequestKind::List),
        vec![RecordedRequest::List(ListQuery::new(Filter::All, "Contract"))]
    );
    let view = controller.snapshot();
    assert_eq!(view.search_input, " Contract ");
    assert_eq!(view.search_query, "Contract");
    assert_eq!(listed(&controller), vec!["2"]);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_cancels_pending_search() {
    let (store, controller) = mounted().await;

    let typing = controller.clone();
    let pending = tokio::spawn(async move { typing.search("invoice").await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    controller.unmount();

    pending.await.unwrap().unwrap();
    assert!(store.requests().is_empty());
    assert!(controller.snapshot().search_query.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_banner_auto_dismisses() {
    let (_store, controller) = mounted().await;
    controller.delete(&EmailId::new("2")).await.unwrap();
    assert!(controller.snapshot().banner.is_some());

    tokio::time::advance(Duration::from_millis(2599)).await;
    assert!(controller.snapshot().banner.is_some());
    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(controller.snapshot().banner.is_none());
}

#[tokio::test]
async fn test_dismiss_banner_by_id() {
    let (_store, controller) = mounted().await;
    controller.delete(&EmailId::new("2")).await.unwrap();
    let id = controller.snapshot().banner.unwrap().id;

    controller.dismiss_banner(id + 1);
    assert!(controller.snapshot().banner.is_some());
    controller.dismiss_banner(id);
    assert!(controller.snapshot().banner.is_none());
}

proptest! {
    #[test]
    fn prop_filters_partition_the_store(flags in prop::collection::vec(any::<(bool, bool)>(), 0..12)) {
        let emails: Vec<Email> = flags
            .iter()
            .enumerate()
            .map(|(i, (is_read, is_archived))| {
                email(&(i + 1).to_string(), "Subject", "2024-12-10T09:00:00", *is_read, *is_archived)
            })
            .collect();
        let store = MemoryStore::with_emails(ClientConfig::default().current_user, emails);

        let (all, unread, archived) = tokio_test::block_on(async {
            (
                store.list(&ListQuery::new(Filter::All, "")).await.unwrap(),
                store.list(&ListQuery::new(Filter::Unread, "")).await.unwrap(),
                store.list(&ListQuery::new(Filter::Archived, "")).await.unwrap(),
            )
        });

        prop_assert_eq!(all.len() + archived.len(), flags.len());
        prop_assert!(all.iter().all(|e| !e.is_archived));
        prop_assert!(archived.iter().all(|e| e.is_archived));
        prop_assert!(unread.iter().all(|e| !e.is_read && !e.is_archived));
        prop_assert!(unread.iter().all(|u| all.iter().any(|a| a.id == u.id)));
        prop_assert_eq!(unread.len(), all.iter().filter(|e| !e.is_read).count());
    }
}
