//! Color palette with light and dark theme support.
//!
//! Warm neutral surfaces with an orange brand accent.

use iced::Color;
use serde::{Deserialize, Serialize};

/// Application theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Number of avatar background colors.
pub const AVATAR_COLORS: usize = 6;

/// Complete color palette for the application.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    // Brand
    pub primary: Color,
    pub primary_light: Color,
    pub primary_dark: Color,

    // Surfaces
    pub surface: Color,
    pub surface_sunken: Color,
    pub sidebar: Color,

    // Text
    pub text_primary: Color,
    pub text_strong: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    // States
    pub selected: Color,
    pub hover: Color,
    pub unread: Color,
    pub accent_red: Color,

    // Borders
    pub border_subtle: Color,
    pub border_medium: Color,

    // Banners
    pub success_background: Color,
    pub success_border: Color,
    pub success_text: Color,
    pub error_background: Color,
    pub error_border: Color,
    pub error_text: Color,

    // Shadows and overlays
    pub shadow: Color,
    pub shadow_medium: Color,
    pub backdrop: Color,

    /// Avatar backgrounds, picked by a stable hash of the sender name.
    pub avatars: [Color; AVATAR_COLORS],
    pub avatar_text: Color,
}

impl Palette {
    /// Creates the light theme palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb8(0xf9, 0x73, 0x16),
            primary_light: Color::from_rgb8(0xfd, 0xba, 0x74),
            primary_dark: Color::from_rgb8(0xea, 0x58, 0x0c),

            surface: Color::WHITE,
            surface_sunken: Color::from_rgb8(0xfb, 0xfb, 0xfb),
            sidebar: Color::from_rgb8(0xf4, 0xf5, 0xf7),

            text_primary: Color::from_rgb8(0x1f, 0x29, 0x37),
            text_strong: Color::from_rgb8(0x11, 0x18, 0x27),
            text_secondary: Color::from_rgb8(0x6b, 0x72, 0x80),
            text_muted: Color::from_rgb8(0x9c, 0xa3, 0xaf),
            text_on_primary: Color::WHITE,

            selected: Color::from_rgb8(0xff, 0xf7, 0xed),
            hover: Color::from_rgb8(0xf9, 0xfa, 0xfb),
            unread: Color::from_rgb8(0xf9, 0x73, 0x16),
            accent_red: Color::from_rgb8(0xdc, 0x26, 0x26),

            border_subtle: Color::from_rgb8(0xe6, 0xe7, 0xea),
            border_medium: Color::from_rgb8(0xe5, 0xe7, 0xeb),

            success_background: Color::from_rgb8(0xf0, 0xfd, 0xf4),
            success_border: Color::from_rgb8(0xbb, 0xf7, 0xd0),
            success_text: Color::from_rgb8(0x16, 0x65, 0x34),
            error_background: Color::from_rgb8(0xfe, 0xf2, 0xf2),
            error_border: Color::from_rgb8(0xfe, 0xca, 0xca),
            error_text: Color::from_rgb8(0x99, 0x1b, 0x1b),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.12),
            backdrop: Color::from_rgba(0.07, 0.09, 0.15, 0.45),

            avatars: [
                Color::from_rgb8(0xfe, 0xe2, 0xe2),
                Color::from_rgb8(0xfe, 0xf3, 0xc7),
                Color::from_rgb8(0xdc, 0xfc, 0xe7),
                Color::from_rgb8(0xdb, 0xea, 0xfe),
                Color::from_rgb8(0xed, 0xe9, 0xfe),
                Color::from_rgb8(0xff, 0xe4, 0xe6),
            ],
            avatar_text: Color::from_rgb8(0x1f, 0x29, 0x37),
        }
    }

    /// Creates the dark theme palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb8(0xfb, 0x92, 0x3c),
            primary_light: Color::from_rgb8(0xfd, 0xba, 0x74),
            primary_dark: Color::from_rgb8(0xea, 0x58, 0x0c),

            surface: Color::from_rgb8(0x1c, 0x1d, 0x21),
            surface_sunken: Color::from_rgb8(0x17, 0x18, 0x1b),
            sidebar: Color::from_rgb8(0x14, 0x15, 0x18),

            text_primary: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            text_strong: Color::from_rgb8(0xf9, 0xfa, 0xfb),
            text_secondary: Color::from_rgb8(0xa1, 0xa7, 0xb3),
            text_muted: Color::from_rgb8(0x6b, 0x72, 0x80),
            text_on_primary: Color::from_rgb8(0x11, 0x12, 0x15),

            selected: Color::from_rgb8(0x2a, 0x21, 0x19),
            hover: Color::from_rgb8(0x23, 0x24, 0x29),
            unread: Color::from_rgb8(0xfb, 0x92, 0x3c),
            accent_red: Color::from_rgb8(0xf8, 0x71, 0x71),

            border_subtle: Color::from_rgb8(0x2b, 0x2d, 0x33),
            border_medium: Color::from_rgb8(0x37, 0x3a, 0x41),

            success_background: Color::from_rgb8(0x05, 0x2e, 0x16),
            success_border: Color::from_rgb8(0x16, 0x65, 0x34),
            success_text: Color::from_rgb8(0xbb, 0xf7, 0xd0),
            error_background: Color::from_rgb8(0x45, 0x0a, 0x0a),
            error_border: Color::from_rgb8(0x99, 0x1b, 0x1b),
            error_text: Color::from_rgb8(0xfe, 0xca, 0xca),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            shadow_medium: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
            backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.6),

            avatars: [
                Color::from_rgb8(0x7f, 0x1d, 0x1d),
                Color::from_rgb8(0x78, 0x35, 0x0f),
                Color::from_rgb8(0x14, 0x53, 0x2d),
                Color::from_rgb8(0x1e, 0x3a, 0x8a),
                Color::from_rgb8(0x4c, 0x1d, 0x95),
                Color::from_rgb8(0x88, 0x13, 0x37),
            ],
            avatar_text: Color::from_rgb8(0xf9, 0xfa, 0xfb),
        }
    }

    /// Gets the palette for a given theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Avatar background for a sender name.
    #[must_use]
    pub fn avatar(&self, name: &str) -> Color {
        self.avatars[cusana_core::format::avatar_slot(name, AVATAR_COLORS)]
    }
}

/// Current active palette - defaults to light mode.
pub static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::light()));

/// Sets the current global palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Gets a copy of the current palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}
