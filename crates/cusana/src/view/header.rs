//! Header bar: search box, compose and theme switch.

use iced::widget::{Space, button, container, row, text, text_input};
use iced::{Element, Length};

use crate::message::Message;
use crate::style::widgets::palette::ThemeMode;
use crate::style::widgets::{
    header_style, palette, primary_button_style, search_input_style, secondary_button_style,
};

/// Widget id of the search box.
pub const SEARCH_INPUT: &str = "search-email";

/// Renders the header bar.
pub fn view_header(search_input: &str, theme_mode: ThemeMode) -> Element<'static, Message> {
    let search = text_input("Search Email", search_input)
        .id(SEARCH_INPUT)
        .width(Length::Fixed(360.0))
        .padding([10, 16])
        .size(14)
        .style(search_input_style)
        .on_input(Message::SearchChanged);

    let theme_icon = match theme_mode {
        ThemeMode::Light => "\u{263E}", // moon
        ThemeMode::Dark => "\u{2600}",  // sun
    };
    let theme_btn = button(text(theme_icon).size(16).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    }))
    .padding([8, 12])
    .style(secondary_button_style)
    .on_press(Message::ToggleTheme);

    let compose_btn = button(
        text("New Message").size(14).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..Default::default()
        }),
    )
    .padding([10, 18])
    .style(primary_button_style)
    .on_press(Message::OpenCompose);

    container(
        row![
            search,
            Space::new().width(Length::Fill),
            theme_btn,
            compose_btn
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center),
    )
    .width(Length::Fill)
    .padding([12, 20])
    .style(header_style)
    .into()
}
