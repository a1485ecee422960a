//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use cusana_core::{ComposeField, EmailId, Filter};

use crate::model::AppSettings;

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Startup and settings
    /// Settings loaded from disk.
    SettingsLoaded(Result<AppSettings, String>),
    /// Settings written to disk.
    SettingsSaved(Result<(), String>),
    /// Switch between light and dark mode.
    ToggleTheme,
    /// Collapse or expand the sidebar.
    ToggleSidebar,

    // List
    /// Switch the active filter.
    SelectFilter(Filter),
    /// Search box content changed.
    SearchChanged(String),
    /// Reload the list for the current filter and search.
    Refresh,
    /// Open a message in the detail pane.
    SelectEmail(EmailId),

    // Message actions
    /// Flip the read flag.
    ToggleRead(EmailId),
    /// Flip the archived flag.
    ToggleArchived(EmailId),
    /// Open a message with a forwarding draft.
    Forward(EmailId),
    /// Delete a message.
    DeleteEmail(EmailId),
    /// Open an attachment link in the system handler.
    OpenAttachment(String),

    // Compose
    /// Open the compose modal.
    OpenCompose,
    /// Close the compose modal, keeping the draft.
    CloseCompose,
    /// A compose field changed.
    ComposeEdited(ComposeField, String),
    /// Send the compose form.
    SendCompose,

    // Reply
    /// Reply draft changed.
    ReplyEdited(String),
    /// Clear the reply draft.
    ClearReply,
    /// Send the reply draft.
    SendReply,

    // Banner
    /// Dismiss the banner with this id.
    DismissBanner(u64),

    // Sync
    /// A controller intent finished.
    Synced(Result<(), String>),
    /// Periodic refresh while requests are in flight or a banner is shown.
    Tick,

    // Keyboard
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
    /// Keyboard event with no binding.
    Ignored,
}

/// Keyboard actions that can be triggered by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Compose new message (Ctrl+N).
    ComposeNew,
    /// Focus the search box (Ctrl+K).
    FocusSearch,
    /// Close the compose modal (Escape).
    Cancel,
    /// Delete the selected message (Delete).
    Delete,
    /// Reload the list (F5).
    Refresh,
    /// Toggle sidebar (Ctrl+B).
    ToggleSidebar,
}
