//! Detail pane: the open message, its attachments and the reply box.

use cusana_core::format::detail_date;
use cusana_core::{Attachment, Email, ViewState};
use iced::widget::{Column, Row, Space, button, column, container, row, scrollable, text, text_input};
use iced::{Element, Length};

use super::message_list::view_avatar;
use crate::message::Message;
use crate::style::widgets::{
    attachment_style, card_style, danger_button_style, ghost_button_style, input_style,
    message_content_style, palette, primary_button_style, scrollable_style,
    secondary_button_style,
};

/// Renders the detail pane.
pub fn view_message_view(state: &ViewState) -> Element<'static, Message> {
    let Some(email) = state.detail.as_ref() else {
        let note = if state.loading.detail() {
            "Loading email..."
        } else {
            "Select an email to view details."
        };
        return container(text(note).size(15).style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_secondary),
            }
        }))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(message_content_style)
        .into();
    };

    let mut message = column![view_toolbar(email), view_header(email), view_body(email)]
        .spacing(20)
        .padding(24);
    if !email.attachments.is_empty() {
        message = message.push(view_attachments(&email.attachments));
    }

    let content = column![
        container(message).width(Length::Fill).style(card_style),
        view_reply(&state.reply_draft, state.loading.sending_reply()),
    ]
    .spacing(16)
    .padding(20);

    container(
        scrollable(content)
            .height(Length::Fill)
            .style(scrollable_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(message_content_style)
    .into()
}

fn toolbar_button(label: &'static str, on_press: Message) -> Element<'static, Message> {
    button(text(label).size(13))
        .padding([6, 12])
        .style(ghost_button_style)
        .on_press(on_press)
        .into()
}

/// Renders the message actions.
fn view_toolbar(email: &Email) -> Element<'static, Message> {
    let id = &email.id;

    let read = toolbar_button(
        if email.is_read {
            "Mark as unread"
        } else {
            "Mark as read"
        },
        Message::ToggleRead(id.clone()),
    );
    let archive = toolbar_button(
        if email.is_archived {
            "Move to inbox"
        } else {
            "Archive"
        },
        Message::ToggleArchived(id.clone()),
    );
    let forward = toolbar_button("Forward", Message::Forward(id.clone()));
    let delete = button(text("Delete").size(13))
        .padding([6, 12])
        .style(danger_button_style)
        .on_press(Message::DeleteEmail(id.clone()));

    row![read, archive, forward, Space::new().width(Length::Fill), delete]
        .spacing(6)
        .align_y(iced::Alignment::Center)
        .into()
}

/// Renders subject, sender, recipient and date.
fn view_header(email: &Email) -> Element<'static, Message> {
    let subject = text(email.subject.clone())
        .size(22)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_strong),
            }
        });

    let sender = row![
        text(email.sender.name.clone()).size(14).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..Default::default()
        }),
        text(format!("<{}>", email.sender.email))
            .size(13)
            .style(|_theme| {
                let p = palette::current();
                text::Style {
                    color: Some(p.text_secondary),
                }
            }),
    ]
    .spacing(6)
    .align_y(iced::Alignment::Center);

    let recipient = text(format!("to {}", email.recipient.name))
        .size(12)
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_muted),
            }
        });

    let date = text(detail_date(&email.date)).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_muted),
        }
    });

    column![
        subject,
        row![
            view_avatar(&email.sender.name, 40.0),
            column![sender, recipient].spacing(2),
            Space::new().width(Length::Fill),
            date,
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(16)
    .into()
}

/// Renders the body, one text block per paragraph.
fn view_body(email: &Email) -> Element<'static, Message> {
    let paragraphs: Vec<Element<'static, Message>> = email
        .paragraphs()
        .map(|paragraph| {
            text(paragraph.to_string())
                .size(14)
                .line_height(1.6)
                .style(|_theme| {
                    let p = palette::current();
                    text::Style {
                        color: Some(p.text_primary),
                    }
                })
                .into()
        })
        .collect();

    Column::with_children(paragraphs).spacing(12).into()
}

/// Renders attachment tiles with a download action.
fn view_attachments(attachments: &[Attachment]) -> Element<'static, Message> {
    let tiles: Vec<Element<'static, Message>> = attachments
        .iter()
        .map(|attachment| {
            let name = text(attachment.filename.clone()).size(13).font(iced::Font {
                weight: iced::font::Weight::Medium,
                ..Default::default()
            });
            let size = text(attachment.size.clone()).size(11).style(|_theme| {
                let p = palette::current();
                text::Style {
                    color: Some(p.text_muted),
                }
            });
            let download = button(text("Download").size(12))
                .padding([4, 10])
                .style(secondary_button_style)
                .on_press(Message::OpenAttachment(attachment.url.clone()));

            container(
                row![column![name, size].spacing(2), download]
                    .spacing(16)
                    .align_y(iced::Alignment::Center),
            )
            .padding([10, 14])
            .style(attachment_style)
            .into()
        })
        .collect();

    Row::with_children(tiles).spacing(10).wrap().into()
}

/// Renders the reply box under the message.
fn view_reply(draft: &str, sending: bool) -> Element<'static, Message> {
    let mut input = text_input("Write your reply", draft)
        .padding([12, 14])
        .size(14)
        .style(input_style);
    if !sending {
        input = input
            .on_input(Message::ReplyEdited)
            .on_submit(Message::SendReply);
    }

    let clear = button(text("Clear").size(13))
        .padding([8, 14])
        .style(ghost_button_style)
        .on_press_maybe((!sending).then_some(Message::ClearReply));

    let send = button(
        text(if sending { "Sending" } else { "Send Now" })
            .size(13)
            .font(iced::Font {
                weight: iced::font::Weight::Semibold,
                ..Default::default()
            }),
    )
    .padding([8, 18])
    .style(primary_button_style)
    .on_press_maybe((!sending).then_some(Message::SendReply));

    container(
        column![
            input,
            row![Space::new().width(Length::Fill), clear, send]
                .spacing(8)
                .align_y(iced::Alignment::Center),
        ]
        .spacing(12)
        .padding(16),
    )
    .width(Length::Fill)
    .style(card_style)
    .into()
}
