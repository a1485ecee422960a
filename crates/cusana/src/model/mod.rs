//! Data models owned by the desktop shell.

mod settings;

pub use settings::AppSettings;
