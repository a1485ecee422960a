//! Widget styles with shadows and rounded corners.

#![allow(clippy::needless_update)] // Explicit struct updates for clarity

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use containers::{
    attachment_style, avatar_style, backdrop_style, card_style, count_badge_style,
    error_banner_style, header_style, message_content_style, message_list_style,
    message_row_border_style, modal_style, sidebar_style, success_banner_style, unread_dot_style,
};

pub use buttons::{
    banner_button_style, danger_button_style, ghost_button_style, message_button_selected_style,
    message_button_style, nav_button_selected_style, nav_button_style, primary_button_style,
    secondary_button_style, tab_button_selected_style, tab_button_style,
};

pub use inputs::{input_style, scrollable_style, search_input_style};
