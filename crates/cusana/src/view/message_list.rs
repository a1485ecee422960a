//! Message list view: filter tabs and one row per message.

use cusana_core::format::{initials, list_date, truncate};
use cusana_core::{Email, EmailId, Filter, ViewState};
use iced::widget::{Column, Space, button, column, container, row, scrollable, text};
use iced::{Element, Length};

use crate::message::Message;
use crate::style::widgets::{
    avatar_style, danger_button_style, ghost_button_style, message_button_selected_style,
    message_button_style, message_list_style, message_row_border_style, palette,
    scrollable_style, tab_button_selected_style, tab_button_style, unread_dot_style,
};

const LIST_WIDTH: f32 = 400.0;

/// Renders the message list panel.
pub fn view_message_list(state: &ViewState) -> Element<'static, Message> {
    let tabs = row(Filter::ALL.into_iter().map(|filter| {
        let is_selected = state.filter == filter;
        button(text(filter.label()).size(13))
            .padding([6, 14])
            .style(if is_selected {
                tab_button_selected_style
            } else {
                tab_button_style
            })
            .on_press(Message::SelectFilter(filter))
            .into()
    }))
    .spacing(6);

    let header = container(tabs).padding([14, 16]).width(Length::Fill);

    let body: Element<'static, Message> = if state.emails.is_empty() {
        let note = if state.loading.list() {
            "Loading emails..."
        } else {
            "No emails found."
        };
        container(text(note).size(14).style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_secondary),
            }
        }))
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    } else {
        let rows: Vec<Element<'static, Message>> = state
            .emails
            .iter()
            .map(|email| view_message_row(email, state.selected_id.as_ref()))
            .collect();
        scrollable(Column::with_children(rows))
            .height(Length::Fill)
            .style(scrollable_style)
            .into()
    };

    container(column![header, body])
        .width(Length::Fixed(LIST_WIDTH))
        .height(Length::Fill)
        .style(message_list_style)
        .into()
}

/// Renders a single message row with its quick actions.
fn view_message_row(email: &Email, selected: Option<&EmailId>) -> Element<'static, Message> {
    let is_selected = selected == Some(&email.id);
    let weight = if email.is_read {
        iced::font::Weight::Normal
    } else {
        iced::font::Weight::Semibold
    };

    let sender = text(email.sender.name.clone())
        .size(14)
        .font(iced::Font {
            weight,
            ..Default::default()
        })
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_strong),
            }
        });

    let date = text(list_date(email)).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_muted),
        }
    });

    let mut top = row![sender, Space::new().width(Length::Fill)]
        .spacing(6)
        .align_y(iced::Alignment::Center);
    if !email.is_read {
        top = top.push(container(Space::new()).width(8).height(8).style(unread_dot_style));
    }
    top = top.push(date);

    let subject = text(truncate(&email.subject, 48))
        .size(13)
        .font(iced::Font {
            weight,
            ..Default::default()
        })
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_primary),
            }
        });

    let preview = text(email.preview.clone()).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    });

    let main = row![
        view_avatar(&email.sender.name, 36.0),
        column![top, subject, preview].spacing(3).width(Length::Fill),
    ]
    .spacing(12)
    .align_y(iced::Alignment::Start);

    let open = button(main)
        .width(Length::Fill)
        .padding([12, 16])
        .style(if is_selected {
            message_button_selected_style
        } else {
            message_button_style
        })
        .on_press(Message::SelectEmail(email.id.clone()));

    let actions = column![
        quick_action(
            if email.is_archived { "\u{21A9}" } else { "\u{1F5C3}" },
            Message::ToggleArchived(email.id.clone()),
            false,
        ),
        quick_action(
            if email.is_read { "\u{2709}" } else { "\u{2713}" },
            Message::ToggleRead(email.id.clone()),
            false,
        ),
        quick_action("\u{1F5D1}", Message::DeleteEmail(email.id.clone()), true),
    ]
    .spacing(2)
    .padding([8, 6]);

    container(row![open, actions].align_y(iced::Alignment::Center))
        .style(message_row_border_style)
        .into()
}

fn quick_action(icon: &'static str, on_press: Message, destructive: bool) -> Element<'static, Message> {
    button(text(icon).size(12))
        .padding([3, 6])
        .style(if destructive {
            danger_button_style
        } else {
            ghost_button_style
        })
        .on_press(on_press)
        .into()
}

/// Colored circle with the sender's initials.
pub(super) fn view_avatar(name: &str, size: f32) -> Element<'static, Message> {
    let color = palette::current().avatar(name);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let text_size = (size * 0.36) as u32;

    container(
        text(initials(name)).size(text_size).font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        }),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .align_x(iced::alignment::Horizontal::Center)
    .align_y(iced::alignment::Vertical::Center)
    .style(avatar_style(color))
    .into()
}
