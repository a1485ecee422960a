//! Client state controller.
//!
//! [`MailController`] owns the single [`ViewState`] and is the only way to
//! change it. Each user intent is an async method that talks to the
//! [`MailStore`], reconciles the response into the view state and posts a
//! status banner. The presentation layer renders [`MailController::snapshot`].
//!
//! The controller is a cheap handle: clones share the same state, so
//! intents can run as independent tasks and overlap freely. The state lock
//! is never held across an `.await`.

mod state;

pub use state::{
    ComposeField, ComposeState, LoadingState, SelectionHint, ViewState, resolve_selection,
};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;
use tracing::{debug, info, warn};

use self::state::Activity;
use crate::banner::BannerSlot;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::error::{Error, Operation, Result, ValidationError};
use crate::model::{Contact, Email, EmailId, EmailPatch, Filter, NewEmail, reply_subject};
use crate::store::{ListQuery, MailStore};

#[derive(Debug, Default)]
struct Shared {
    view: ViewState,
    banner: BannerSlot,
}

struct Inner {
    store: Arc<dyn MailStore>,
    config: ClientConfig,
    state: Mutex<Shared>,
    /// Sequence number of the latest detail request.
    detail_seq: AtomicU64,
    search: Debouncer,
}

/// Handle to the client state.
#[derive(Clone)]
pub struct MailController {
    inner: Arc<Inner>,
}

impl fmt::Debug for MailController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailController")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Keeps a loading counter raised until dropped.
struct Loading<'a> {
    controller: &'a MailController,
    activity: Activity,
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        let activity = self.activity;
        self.controller
            .with_state(|s| s.view.loading.leave(activity));
    }
}

impl MailController {
    /// Creates a controller over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn MailStore>, config: ClientConfig) -> Self {
        let shared = Shared {
            view: ViewState::default(),
            banner: BannerSlot::new(config.banner_ttl()),
        };
        Self {
            inner: Arc::new(Inner {
                store,
                search: Debouncer::new(config.search_debounce()),
                config,
                state: Mutex::new(shared),
                detail_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Copy of the current view state, with the banner if still visible.
    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        self.with_state(|s| {
            s.banner.expire(Instant::now());
            let mut view = s.view.clone();
            view.banner = s.banner.current().cloned();
            view
        })
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        f(&mut self.lock())
    }

    fn begin(&self, activity: Activity) -> Loading<'_> {
        self.with_state(|s| s.view.loading.enter(activity));
        Loading {
            controller: self,
            activity,
        }
    }

    /// Posts the error banner for a failed intent and hands the error back.
    fn fail(&self, err: impl Into<Error>, operation: Operation) -> Error {
        let err = err.into();
        let text = err.banner_text(operation);
        warn!("{:?} failed: {}", operation, err);
        self.with_state(|s| s.banner.error(text));
        err
    }

    fn succeed(&self, text: &str) {
        info!("{}", text);
        self.with_state(|s| s.banner.success(text));
    }

    // ----- lifecycle -----

    /// Initial load.
    ///
    /// # Errors
    ///
    /// Returns the error of the first list or detail request that failed.
    pub async fn mount(&self) -> Result<()> {
        debug!("Mounting mail view");
        self.refresh_list(SelectionHint::Retain).await
    }

    /// Drops any pending search commit.
    pub fn unmount(&self) {
        debug!("Unmounting mail view");
        self.inner.search.cancel();
    }

    // ----- list and detail -----

    /// Lists messages for the current filter and committed search.
    ///
    /// On success the list is replaced, the selection is resolved from
    /// `hint`, and the detail is loaded when the selection changed. On
    /// failure the previous list is kept.
    ///
    /// # Errors
    ///
    /// Returns the list error, or the detail error that followed.
    pub async fn refresh_list(&self, hint: SelectionHint) -> Result<()> {
        let query = self.with_state(|s| {
            s.banner.clear_error();
            ListQuery::new(s.view.filter, s.view.search_query.clone())
        });

        let loading = self.begin(Activity::List);
        let emails = match self.inner.store.list(&query).await {
            Ok(emails) => emails,
            Err(err) => return Err(self.fail(err, Operation::LoadList)),
        };

        let default_subject = &self.inner.config.default_subject_hint;
        let to_load = self.with_state(|s| {
            let view = &mut s.view;
            let previous = view.selected_id.take();
            let next = resolve_selection(&emails, &hint, previous.as_ref(), default_subject);
            debug!(
                "Listed {} emails ({}), selection {:?} -> {:?}",
                emails.len(),
                query.filter,
                previous,
                next
            );
            view.emails = emails;
            view.selected_id.clone_from(&next);
            if next.is_none() {
                view.detail = None;
            }
            next.filter(|id| previous.as_ref() != Some(id))
        });
        drop(loading);

        if let Some(id) = to_load {
            self.load_detail(&id).await?;
        }
        Ok(())
    }

    /// Fetches one message for the detail pane.
    ///
    /// The response always patches the listed copy. It replaces the detail
    /// only if no newer detail request was issued meanwhile; failures of
    /// superseded requests are logged without a banner.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub async fn load_detail(&self, id: &EmailId) -> Result<()> {
        let seq = self.inner.detail_seq.fetch_add(1, Ordering::AcqRel) + 1;
        let _loading = self.begin(Activity::Detail);

        let result = self.inner.store.get(id).await;
        let latest = self.inner.detail_seq.load(Ordering::Acquire) == seq;

        match result {
            Ok(email) => {
                self.with_state(|s| {
                    if let Some(entry) = s.view.emails.iter_mut().find(|e| e.id == email.id) {
                        entry.clone_from(&email);
                    }
                    if latest {
                        s.view.detail = Some(email);
                    } else {
                        debug!("Discarding stale detail for {}", id);
                    }
                });
                Ok(())
            }
            Err(err) if latest => Err(self.fail(err, Operation::LoadDetail)),
            Err(err) => {
                warn!("Stale detail request for {} failed: {}", id, err);
                Err(err.into())
            }
        }
    }

    /// Selects a message, marks it read and loads its detail.
    ///
    /// The read update lands before the detail is fetched, so the detail
    /// reflects the confirmed flag. The detail is not refetched when `id` is
    /// already displayed, or when a refresh under the unread filter moved the
    /// selection elsewhere.
    ///
    /// # Errors
    ///
    /// Returns the detail error, or otherwise the read-update error.
    pub async fn select(&self, id: &EmailId) -> Result<()> {
        let (reload, unread) = self.with_state(|s| {
            let view = &mut s.view;
            let reload = view.detail.as_ref().is_none_or(|d| &d.id != id)
                || view.selected_id.as_ref() != Some(id);
            if view.selected_id.as_ref() != Some(id) {
                view.reply_draft.clear();
            }
            view.selected_id = Some(id.clone());
            let unread = view.email(id).is_some_and(|e| !e.is_read);
            (reload, unread)
        });
        debug!("Selected {}", id);

        let mark_read = if unread {
            self.set_read(id, true).await.map(drop)
        } else {
            Ok(())
        };

        let still_selected = self.with_state(|s| s.view.selected_id.as_ref() == Some(id));
        let detail = if reload && still_selected {
            self.load_detail(id).await
        } else {
            Ok(())
        };
        detail.and(mark_read)
    }

    // ----- flags -----

    /// Sets the read flag.
    ///
    /// With the unread filter active the list is refreshed afterwards,
    /// keeping `id` selected if it is still listed.
    ///
    /// # Errors
    ///
    /// Returns the update error, or the refresh error that followed.
    pub async fn set_read(&self, id: &EmailId, value: bool) -> Result<Email> {
        let updated = self
            .update(id, EmailPatch::read(value))
            .await
            .map_err(|err| self.fail(err, Operation::UpdateRead))?;

        if self.with_state(|s| s.view.filter == Filter::Unread) {
            self.refresh_list(SelectionHint::Prefer(id.clone())).await?;
        }
        Ok(updated)
    }

    /// Sets the archived flag and refreshes the list.
    ///
    /// # Errors
    ///
    /// Returns the update error, or the refresh error that followed.
    pub async fn set_archived(&self, id: &EmailId, value: bool) -> Result<Email> {
        let updated = self
            .update(id, EmailPatch::archived(value))
            .await
            .map_err(|err| self.fail(err, Operation::UpdateArchive))?;

        self.refresh_list(SelectionHint::Prefer(id.clone())).await?;
        Ok(updated)
    }

    /// Flips the read flag of a loaded message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEmail`] if `id` is neither listed nor
    /// displayed, or any error from [`Self::set_read`].
    pub async fn toggle_read(&self, id: &EmailId) -> Result<Email> {
        let Some((is_read, _)) = self.with_state(|s| s.view.flags(id)) else {
            return Err(self.fail(Error::UnknownEmail(id.to_string()), Operation::UpdateRead));
        };
        self.set_read(id, !is_read).await
    }

    /// Flips the archived flag of a loaded message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEmail`] if `id` is neither listed nor
    /// displayed, or any error from [`Self::set_archived`].
    pub async fn toggle_archived(&self, id: &EmailId) -> Result<Email> {
        let Some((_, is_archived)) = self.with_state(|s| s.view.flags(id)) else {
            return Err(self.fail(
                Error::UnknownEmail(id.to_string()),
                Operation::UpdateArchive,
            ));
        };
        self.set_archived(id, !is_archived).await
    }

    async fn update(&self, id: &EmailId, patch: EmailPatch) -> Result<Email> {
        let updated = self.inner.store.update(id, &patch).await?;
        self.with_state(|s| s.view.merge(&updated));
        debug!("Updated {}: {:?}", id, patch);
        Ok(updated)
    }

    // ----- filter and search -----

    /// Switches the active filter, refreshing only on change.
    ///
    /// # Errors
    ///
    /// Returns the refresh error.
    pub async fn set_filter(&self, filter: Filter) -> Result<()> {
        let changed = self.with_state(|s| {
            let changed = s.view.filter != filter;
            s.view.filter = filter;
            changed
        });
        if !changed {
            return Ok(());
        }
        debug!("Filter changed to {}", filter);
        self.refresh_list(SelectionHint::Retain).await
    }

    /// Records raw search input and commits it once typing pauses.
    ///
    /// Resolves immediately (without a request) when a newer keystroke
    /// supersedes this one.
    ///
    /// # Errors
    ///
    /// Returns the refresh error of the commit.
    pub async fn search(&self, raw: impl Into<String>) -> Result<()> {
        let raw = raw.into();
        self.with_state(|s| s.view.search_input.clone_from(&raw));

        let pending = self.inner.search.schedule(raw);
        match pending.await {
            Some(raw) => self.commit_search(raw.trim()).await,
            None => Ok(()),
        }
    }

    /// Commits search text, refreshing only when it changed.
    ///
    /// # Errors
    ///
    /// Returns the refresh error.
    pub async fn commit_search(&self, text: &str) -> Result<()> {
        let text = text.trim();
        let changed = self.with_state(|s| {
            let changed = s.view.search_query != text;
            s.view.search_query = text.to_string();
            changed
        });
        if !changed {
            return Ok(());
        }
        debug!("Search committed: {:?}", text);
        self.refresh_list(SelectionHint::Retain).await
    }

    // ----- compose -----

    /// Opens the compose modal with empty fields.
    pub fn open_compose(&self) {
        self.with_state(|s| {
            s.view.compose.clear_fields();
            s.view.compose.open = true;
        });
    }

    /// Closes the compose modal, keeping the draft.
    pub fn close_compose(&self) {
        self.with_state(|s| s.view.compose.open = false);
    }

    /// Updates a compose field.
    pub fn edit_compose(&self, field: ComposeField, value: impl Into<String>) {
        let value = value.into();
        self.with_state(|s| s.view.compose.set(field, value));
    }

    /// Sends the compose form as a new message.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingComposeFields`] without issuing a
    /// request if a field is blank, or the store error.
    pub async fn send_compose(&self) -> Result<Email> {
        let new_email = self
            .with_state(|s| s.view.compose.to_new_email())
            .map_err(|err| self.fail(err, Operation::Send))?;

        let _sending = self.begin(Activity::SendingNew);
        let created = self
            .inner
            .store
            .create(&new_email)
            .await
            .map_err(|err| self.fail(err, Operation::Send))?;

        self.with_state(|s| {
            s.view.compose = ComposeState::default();
        });
        self.show_created(&created, "Message sent.");

        self.refresh_list(SelectionHint::Prefer(created.id.clone()))
            .await?;
        Ok(created)
    }

    // ----- reply -----

    /// Updates the reply draft.
    pub fn edit_reply(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_state(|s| s.view.reply_draft = text);
    }

    /// Clears the reply draft.
    pub fn clear_reply(&self) {
        self.with_state(|s| s.view.reply_draft.clear());
    }

    /// Selects a message and seeds an empty reply draft for forwarding.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::select`].
    pub async fn start_forward(&self, id: &EmailId) -> Result<()> {
        let subject = self.with_state(|s| {
            s.view
                .email(id)
                .or_else(|| s.view.detail.as_ref().filter(|d| &d.id == id))
                .map(|e| e.subject.clone())
        });
        let result = self.select(id).await;

        if let Some(subject) = subject {
            self.with_state(|s| {
                if s.view.reply_draft.trim().is_empty() {
                    s.view.reply_draft = format!("Forwarding {subject}\n\n");
                }
            });
        }
        result
    }

    /// Sends the reply draft to the sender of the displayed message.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyReply`] without issuing a request if
    /// no message is displayed or the draft is blank, or the store error.
    pub async fn send_reply(&self) -> Result<Email> {
        let reply = self
            .with_state(|s| {
                let body = s.view.reply_draft.trim();
                match &s.view.detail {
                    Some(original) if !body.is_empty() => Ok(NewEmail {
                        recipient: Contact::new(
                            original.sender.name.clone(),
                            original.sender.email.clone(),
                        ),
                        subject: reply_subject(&original.subject),
                        body: body.to_string(),
                        attachments: Vec::new(),
                    }),
                    _ => Err(ValidationError::EmptyReply),
                }
            })
            .map_err(|err| self.fail(err, Operation::Reply))?;

        let _sending = self.begin(Activity::SendingReply);
        let created = self
            .inner
            .store
            .create(&reply)
            .await
            .map_err(|err| self.fail(err, Operation::Reply))?;

        self.with_state(|s| s.view.reply_draft.clear());
        self.show_created(&created, "Reply sent.");

        self.refresh_list(SelectionHint::Prefer(created.id.clone()))
            .await?;
        Ok(created)
    }

    /// Resets filter and search and shows a freshly created message.
    fn show_created(&self, created: &Email, banner: &str) {
        self.inner.search.cancel();
        self.with_state(|s| {
            let view = &mut s.view;
            view.filter = Filter::All;
            view.search_input.clear();
            view.search_query.clear();
            view.detail = Some(created.clone());
            view.selected_id = Some(created.id.clone());
        });
        // Detail requests still in flight must not replace the created message.
        self.inner.detail_seq.fetch_add(1, Ordering::AcqRel);
        self.succeed(banner);
    }

    // ----- delete and banner -----

    /// Deletes a message and refreshes with the default selection.
    ///
    /// # Errors
    ///
    /// Returns the delete error, or the refresh error that followed.
    pub async fn delete(&self, id: &EmailId) -> Result<()> {
        self.inner
            .store
            .delete(id)
            .await
            .map_err(|err| self.fail(err, Operation::Delete))?;

        self.succeed("Email deleted.");
        self.refresh_list(SelectionHint::Default).await
    }

    /// Clears the banner if it is still the one with `id`.
    pub fn dismiss_banner(&self, id: u64) {
        self.with_state(|s| s.banner.dismiss(id));
    }
}
