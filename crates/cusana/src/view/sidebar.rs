//! Sidebar view component: brand and filter navigation.

use cusana_core::{Filter, ViewState};
use iced::widget::{Column, Space, button, column, container, row, text};
use iced::{Element, Length};

use crate::message::Message;
use crate::style::widgets::{
    count_badge_style, ghost_button_style, nav_button_selected_style, nav_button_style, palette,
    sidebar_style,
};

const EXPANDED_WIDTH: f32 = 220.0;
const COLLAPSED_WIDTH: f32 = 64.0;

/// Renders the sidebar with the filter entries and their counts.
///
/// Counts are taken from the currently loaded list.
pub fn view_sidebar(state: &ViewState, collapsed: bool) -> Element<'static, Message> {
    let brand = text(if collapsed { "C" } else { "Cusana" })
        .size(22)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.primary),
            }
        });

    let collapse_btn = button(text(if collapsed { "\u{00BB}" } else { "\u{00AB}" }).size(16))
        .padding([4, 8])
        .style(ghost_button_style)
        .on_press(Message::ToggleSidebar);

    let top: Element<'static, Message> = if collapsed {
        column![brand, collapse_btn]
            .spacing(8)
            .align_x(iced::Alignment::Center)
            .into()
    } else {
        row![brand, Space::new().width(Length::Fill), collapse_btn]
            .align_y(iced::Alignment::Center)
            .into()
    };

    let counts = [
        state.emails.len(),
        state.unread_count(),
        state.archived_count(),
    ];
    let entries: Vec<Element<'static, Message>> = Filter::ALL
        .into_iter()
        .zip(counts)
        .map(|(filter, count)| view_filter_entry(filter, count, state.filter == filter, collapsed))
        .collect();

    let content = column![
        container(top).padding([20, 16]),
        Column::with_children(entries).spacing(4).padding([0, 10]),
    ];

    container(content)
        .width(Length::Fixed(if collapsed {
            COLLAPSED_WIDTH
        } else {
            EXPANDED_WIDTH
        }))
        .height(Length::Fill)
        .style(sidebar_style)
        .into()
}

const fn filter_icon(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "\u{1F4E5}",      // inbox tray
        Filter::Unread => "\u{2709}",    // envelope
        Filter::Archived => "\u{1F5C3}", // card file box
    }
}

fn view_filter_entry(
    filter: Filter,
    count: usize,
    is_selected: bool,
    collapsed: bool,
) -> Element<'static, Message> {
    let icon = text(filter_icon(filter)).size(16);

    let content: Element<'static, Message> = if collapsed {
        container(icon).center_x(Length::Fill).into()
    } else {
        let label = text(filter.label())
            .size(14)
            .font(iced::Font {
                weight: if is_selected {
                    iced::font::Weight::Semibold
                } else {
                    iced::font::Weight::Normal
                },
                ..Default::default()
            });

        let badge = container(text(count.to_string()).size(11))
            .padding([2, 8])
            .style(count_badge_style);

        row![icon, label, Space::new().width(Length::Fill), badge]
            .spacing(10)
            .align_y(iced::Alignment::Center)
            .into()
    };

    button(content)
        .width(Length::Fill)
        .padding([10, 12])
        .style(if is_selected {
            nav_button_selected_style
        } else {
            nav_button_style
        })
        .on_press(Message::SelectFilter(filter))
        .into()
}
