//! Compose modal layered over the main layout.

use cusana_core::{ComposeField, ComposeState};
use iced::widget::{Space, button, center, column, container, mouse_area, opaque, row, stack, text, text_input};
use iced::{Element, Length};

use crate::message::Message;
use crate::style::widgets::{
    backdrop_style, ghost_button_style, input_style, modal_style, palette, primary_button_style,
    secondary_button_style,
};

/// Places the compose dialog over `base`; clicking the backdrop closes it.
pub fn view_compose_modal(
    base: Element<'static, Message>,
    compose: &ComposeState,
    sending: bool,
) -> Element<'static, Message> {
    let dialog = container(view_compose_form(compose, sending))
        .width(Length::Fixed(520.0))
        .padding(24)
        .style(modal_style);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(backdrop_style))
                .on_press(Message::CloseCompose)
        )
    ]
    .into()
}

fn field(
    label: &'static str,
    placeholder: &'static str,
    compose: &ComposeState,
    which: ComposeField,
    sending: bool,
) -> Element<'static, Message> {
    let label = text(label).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    });

    let mut input = text_input(placeholder, compose.get(which))
        .padding([10, 12])
        .size(14)
        .style(input_style);
    if !sending {
        input = input.on_input(move |value| Message::ComposeEdited(which, value));
    }

    column![label, input].spacing(6).into()
}

fn view_compose_form(compose: &ComposeState, sending: bool) -> Element<'static, Message> {
    let title = text("New Message")
        .size(18)
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

    let close = button(text("\u{2715}").size(14))
        .padding([4, 8])
        .style(ghost_button_style)
        .on_press(Message::CloseCompose);

    let recipient = row![
        field("Recipient Name", "Jane Doe", compose, ComposeField::ToName, sending),
        field(
            "Recipient Email",
            "jane.doe@business.com",
            compose,
            ComposeField::ToEmail,
            sending
        ),
    ]
    .spacing(12);

    let cancel = button(text("Cancel").size(13))
        .padding([8, 16])
        .style(secondary_button_style)
        .on_press(Message::CloseCompose);

    let send = button(
        text(if sending { "Sending" } else { "Send Message" })
            .size(13)
            .font(iced::Font {
                weight: iced::font::Weight::Semibold,
                ..Default::default()
            }),
    )
    .padding([8, 18])
    .style(primary_button_style)
    .on_press_maybe((!sending).then_some(Message::SendCompose));

    column![
        row![title, Space::new().width(Length::Fill), close].align_y(iced::Alignment::Center),
        recipient,
        field(
            "Subject",
            "Proposal Follow-up",
            compose,
            ComposeField::Subject,
            sending
        ),
        field(
            "Message",
            "Write your message",
            compose,
            ComposeField::Body,
            sending
        ),
        row![Space::new().width(Length::Fill), cancel, send].spacing(8),
    ]
    .spacing(16)
    .into()
}
