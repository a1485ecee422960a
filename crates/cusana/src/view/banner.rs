//! Transient status banner in the top-right corner.

use cusana_core::{Banner, Tone};
use iced::widget::{button, container, stack, text};
use iced::{Element, Length};

use crate::message::Message;
use crate::style::widgets::{banner_button_style, error_banner_style, success_banner_style};

/// Places `banner` over `base`; clicking it dismisses it.
pub fn view_banner(
    base: Element<'static, Message>,
    banner: &Banner,
) -> Element<'static, Message> {
    let style = match banner.tone {
        Tone::Success => success_banner_style,
        Tone::Error => error_banner_style,
    };

    let badge = button(
        container(text(banner.text.clone()).size(13))
            .padding([10, 16])
            .max_width(360.0)
            .style(style),
    )
    .padding(0)
    .style(banner_button_style)
    .on_press(Message::DismissBanner(banner.id));

    let overlay = container(badge)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding([72, 24]);

    stack![base, overlay].into()
}
