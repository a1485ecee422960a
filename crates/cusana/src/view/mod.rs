//! View components for the application.

mod banner;
mod compose;
mod header;
mod message_list;
mod message_view;
mod sidebar;

pub use banner::view_banner;
pub use compose::view_compose_modal;
pub use header::{SEARCH_INPUT, view_header};
pub use message_list::view_message_list;
pub use message_view::view_message_view;
pub use sidebar::view_sidebar;
