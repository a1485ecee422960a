//! Error types for the core library.

use thiserror::Error;

/// Errors returned by a mail store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store answered with a non-success status.
    ///
    /// `message` is the text the store sent back, or a generic
    /// `Request failed (<status>)` when the body was empty.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message reported by the store.
        message: String,
    },

    /// Request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base URL could not be parsed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API requests: {0}")]
    InvalidBaseUrl(String),

    /// A payload was expected but the store returned none.
    #[error("Unexpected empty response")]
    EmptyResponse,
}

/// Client-side validation failures; no request is issued when these occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A compose field was blank after trimming.
    #[error("Recipient, subject, and body are required.")]
    MissingComposeFields,

    /// The reply body was blank, or there is no open message to reply to.
    #[error("Write a reply before sending.")]
    EmptyReply,
}

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The mail store rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced message is not part of the current view.
    #[error("Email not loaded: {0}")]
    UnknownEmail(String),
}

impl Error {
    /// Text shown to the user for a failure of `operation`.
    ///
    /// Store-provided messages win; transport-level failures fall back to the
    /// fixed text for the operation.
    #[must_use]
    pub fn banner_text(&self, operation: Operation) -> String {
        match self {
            Self::Api(ApiError::Status { message, .. }) if !message.trim().is_empty() => {
                message.clone()
            }
            Self::Validation(err) => err.to_string(),
            _ => operation.fallback_message().to_string(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// User intents that can fail and surface a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing messages for the current filter and search.
    LoadList,
    /// Fetching a single message for the detail pane.
    LoadDetail,
    /// Changing the read flag.
    UpdateRead,
    /// Changing the archived flag.
    UpdateArchive,
    /// Deleting a message.
    Delete,
    /// Sending a new message from the compose modal.
    Send,
    /// Sending a reply from the detail pane.
    Reply,
}

impl Operation {
    /// Fixed banner text used when the store gave no message.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::LoadList => "Failed to load emails.",
            Self::LoadDetail => "Failed to load email.",
            Self::UpdateRead => "Could not update read state.",
            Self::UpdateArchive => "Could not update archive state.",
            Self::Delete => "Could not delete email.",
            Self::Send => "Could not send message.",
            Self::Reply => "Could not send reply.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_wins() {
        let err = Error::Api(ApiError::Status {
            status: 404,
            message: "Email not found".to_string(),
        });
        assert_eq!(err.banner_text(Operation::LoadDetail), "Email not found");
    }

    #[test]
    fn test_blank_status_message_falls_back() {
        let err = Error::Api(ApiError::Status {
            status: 500,
            message: "  ".to_string(),
        });
        assert_eq!(
            err.banner_text(Operation::Delete),
            "Could not delete email."
        );
    }

    #[test]
    fn test_non_status_errors_use_fallback() {
        let err = Error::Api(ApiError::EmptyResponse);
        assert_eq!(err.banner_text(Operation::Send), "Could not send message.");
        assert_eq!(
            Error::UnknownEmail("9".into()).banner_text(Operation::UpdateArchive),
            "Could not update archive state."
        );
    }

    #[test]
    fn test_validation_text_is_banner_text() {
        let err = Error::from(ValidationError::MissingComposeFields);
        assert_eq!(
            err.banner_text(Operation::Send),
            "Recipient, subject, and body are required."
        );
        let err = Error::from(ValidationError::EmptyReply);
        assert_eq!(err.banner_text(Operation::Reply), "Write a reply before sending.");
    }
}
