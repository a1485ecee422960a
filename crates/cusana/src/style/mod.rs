//! Styling and theming for the application.

pub mod widgets;
