//! # cusana-core
//!
//! Core logic for the Cusana email client.
//!
//! This crate provides:
//! - Domain models matching the mail-storage REST API
//! - A [`MailStore`] abstraction with an HTTP client and an in-memory store
//! - The [`MailController`], which keeps the client view state consistent
//!   with the remote store
//! - Search debouncing and the transient status banner
//! - Client configuration and display formatting helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod banner;
pub mod config;
pub mod controller;
pub mod debounce;
mod error;
pub mod format;
pub mod model;
pub mod store;

pub use banner::{Banner, BannerSlot, Tone};
pub use config::{API_URL_ENV, ClientConfig};
pub use controller::{
    ComposeField, ComposeState, LoadingState, MailController, SelectionHint, ViewState,
    resolve_selection,
};
pub use debounce::Debouncer;
pub use error::{ApiError, Error, Operation, Result, ValidationError};
pub use model::{
    Attachment, Contact, Email, EmailId, EmailPatch, Filter, NewEmail, build_preview,
    reply_subject,
};
pub use store::{HttpMailStore, ListQuery, MailStore, MemoryStore, RecordedRequest, RequestKind};
