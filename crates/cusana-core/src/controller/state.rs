//! View state owned by the controller.

use crate::banner::Banner;
use crate::error::ValidationError;
use crate::model::{Contact, Email, EmailId, Filter, NewEmail};

/// A field of the compose form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    /// Recipient display name.
    ToName,
    /// Recipient address.
    ToEmail,
    /// Subject line.
    Subject,
    /// Message body.
    Body,
}

/// Compose modal: visibility plus the raw field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    /// Whether the modal is shown.
    pub open: bool,
    /// Recipient display name.
    pub to_name: String,
    /// Recipient address.
    pub to_email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl ComposeState {
    /// Current value of `field`.
    #[must_use]
    pub fn get(&self, field: ComposeField) -> &str {
        match field {
            ComposeField::ToName => &self.to_name,
            ComposeField::ToEmail => &self.to_email,
            ComposeField::Subject => &self.subject,
            ComposeField::Body => &self.body,
        }
    }

    pub(crate) fn set(&mut self, field: ComposeField, value: String) {
        let slot = match field {
            ComposeField::ToName => &mut self.to_name,
            ComposeField::ToEmail => &mut self.to_email,
            ComposeField::Subject => &mut self.subject,
            ComposeField::Body => &mut self.body,
        };
        *slot = value;
    }

    pub(crate) fn clear_fields(&mut self) {
        *self = Self {
            open: self.open,
            ..Self::default()
        };
    }

    /// Builds the create payload from trimmed fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingComposeFields`] if any field is blank.
    pub fn to_new_email(&self) -> Result<NewEmail, ValidationError> {
        let to_name = self.to_name.trim();
        let to_email = self.to_email.trim();
        let subject = self.subject.trim();
        let body = self.body.trim();
        if [to_name, to_email, subject, body].iter().any(|v| v.is_empty()) {
            return Err(ValidationError::MissingComposeFields);
        }
        Ok(NewEmail {
            recipient: Contact::new(to_name, to_email),
            subject: subject.to_string(),
            body: body.to_string(),
            attachments: Vec::new(),
        })
    }
}

/// Outstanding request counts per activity.
///
/// Counters rather than flags so that overlapping requests of the same kind
/// keep the indicator up until the last one finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    list: u32,
    detail: u32,
    sending_new: u32,
    sending_reply: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Activity {
    List,
    Detail,
    SendingNew,
    SendingReply,
}

impl LoadingState {
    /// A list request is in flight.
    #[must_use]
    pub const fn list(&self) -> bool {
        self.list > 0
    }

    /// A detail request is in flight.
    #[must_use]
    pub const fn detail(&self) -> bool {
        self.detail > 0
    }

    /// A compose message is being sent.
    #[must_use]
    pub const fn sending_new(&self) -> bool {
        self.sending_new > 0
    }

    /// A reply is being sent.
    #[must_use]
    pub const fn sending_reply(&self) -> bool {
        self.sending_reply > 0
    }

    /// Anything at all is in flight.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.list() || self.detail() || self.sending_new() || self.sending_reply()
    }

    const fn counter(&mut self, activity: Activity) -> &mut u32 {
        match activity {
            Activity::List => &mut self.list,
            Activity::Detail => &mut self.detail,
            Activity::SendingNew => &mut self.sending_new,
            Activity::SendingReply => &mut self.sending_reply,
        }
    }

    pub(crate) const fn enter(&mut self, activity: Activity) {
        let counter = self.counter(activity);
        *counter = counter.saturating_add(1);
    }

    pub(crate) const fn leave(&mut self, activity: Activity) {
        let counter = self.counter(activity);
        *counter = counter.saturating_sub(1);
    }
}

/// Which message a list refresh should try to keep selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionHint {
    /// Keep the current selection if it is still listed.
    #[default]
    Retain,
    /// Select this message if it is listed.
    Prefer(EmailId),
    /// Ignore the current selection and use the default rule.
    Default,
}

/// Picks the selection after a list refresh.
///
/// The hinted candidate wins if it is in `emails`; otherwise the first
/// message whose lower-cased subject contains `default_subject`, otherwise
/// the first message, otherwise nothing.
#[must_use]
pub fn resolve_selection(
    emails: &[Email],
    hint: &SelectionHint,
    previous: Option<&EmailId>,
    default_subject: &str,
) -> Option<EmailId> {
    let candidate = match hint {
        SelectionHint::Retain => previous,
        SelectionHint::Prefer(id) => Some(id),
        SelectionHint::Default => None,
    };

    if let Some(id) = candidate.filter(|id| emails.iter().any(|e| &e.id == *id)) {
        return Some(id.clone());
    }

    let needle = default_subject.to_lowercase();
    emails
        .iter()
        .find(|e| !needle.is_empty() && e.subject.to_lowercase().contains(&needle))
        .or_else(|| emails.first())
        .map(|e| e.id.clone())
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Result of the last successful list request, in store order.
    pub emails: Vec<Email>,
    /// Selected message; always one of `emails` after a refresh.
    pub selected_id: Option<EmailId>,
    /// Message shown in the detail pane.
    pub detail: Option<Email>,
    /// Active filter.
    pub filter: Filter,
    /// Raw search box content.
    pub search_input: String,
    /// Debounced, trimmed search sent with list requests.
    pub search_query: String,
    /// Compose modal.
    pub compose: ComposeState,
    /// Reply draft under the detail pane.
    pub reply_draft: String,
    /// Requests in flight.
    pub loading: LoadingState,
    /// Visible status banner. Only set on snapshots.
    pub banner: Option<Banner>,
}

impl ViewState {
    /// The listed message with `id`.
    #[must_use]
    pub fn email(&self, id: &EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| &e.id == id)
    }

    /// Unread messages in the current list.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.emails.iter().filter(|e| !e.is_read).count()
    }

    /// Archived messages in the current list.
    #[must_use]
    pub fn archived_count(&self) -> usize {
        self.emails.iter().filter(|e| e.is_archived).count()
    }

    /// Replaces the listed and displayed copies of `email` with it.
    pub(crate) fn merge(&mut self, email: &Email) {
        if let Some(entry) = self.emails.iter_mut().find(|e| e.id == email.id) {
            entry.clone_from(email);
        }
        if let Some(detail) = self.detail.as_mut().filter(|d| d.id == email.id) {
            detail.clone_from(email);
        }
    }

    /// Current value of a flag, preferring the listed copy.
    pub(crate) fn flags(&self, id: &EmailId) -> Option<(bool, bool)> {
        self.email(id)
            .or_else(|| self.detail.as_ref().filter(|d| &d.id == id))
            .map(|e| (e.is_read, e.is_archived))
    }
}
