//! Container style functions with theme support.

use iced::widget::container;
use iced::{Background, Border, Color};

use super::palette;
use super::shadows;
use super::shadows::radius;

/// Top bar with the search box.
pub fn header_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Left navigation column.
pub fn sidebar_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.sidebar)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Message list panel.
pub fn message_list_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Detail pane.
pub fn message_content_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface_sunken)),
        ..Default::default()
    }
}

/// Card holding the open message or the reply box.
pub fn card_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::LARGE.into(),
        },
        shadow: shadows::subtle(),
        ..Default::default()
    }
}

/// Attachment tile.
pub fn attachment_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface_sunken)),
        border: Border {
            color: p.border_medium,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        ..Default::default()
    }
}

/// Message row divider.
pub fn message_row_border_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::NONE.into(),
        },
        ..Default::default()
    }
}

/// Dimmed layer behind the compose modal.
pub fn backdrop_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::current().backdrop)),
        ..Default::default()
    }
}

/// Compose modal dialog.
pub fn modal_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        border: Border {
            color: p.border_subtle,
            width: 1.0,
            radius: radius::XLARGE.into(),
        },
        shadow: shadows::large(),
        ..Default::default()
    }
}

/// Circular avatar filled with `color`.
pub fn avatar_style(color: Color) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme: &iced::Theme| container::Style {
        background: Some(Background::Color(color)),
        text_color: Some(palette::current().avatar_text),
        border: Border {
            radius: radius::PILL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Small unread marker.
pub fn unread_dot_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::current().unread)),
        border: Border {
            radius: radius::PILL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Count badge next to a sidebar entry.
pub fn count_badge_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.surface)),
        text_color: Some(p.text_secondary),
        border: Border {
            color: p.border_medium,
            width: 1.0,
            radius: radius::PILL.into(),
        },
        ..Default::default()
    }
}

/// Success banner.
pub fn success_banner_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.success_background)),
        text_color: Some(p.success_text),
        border: Border {
            color: p.success_border,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::medium(),
        ..Default::default()
    }
}

/// Error banner.
pub fn error_banner_style(_theme: &iced::Theme) -> container::Style {
    let p = palette::current();

    container::Style {
        background: Some(Background::Color(p.error_background)),
        text_color: Some(p.error_text),
        border: Border {
            color: p.error_border,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::medium(),
        ..Default::default()
    }
}
