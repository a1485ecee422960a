//! Shadow presets and rounded corner radii.

use iced::{Color, Shadow, Vector};

use super::palette;

/// Rounded corner radii.
pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SMALL: f32 = 6.0;
    pub const MEDIUM: f32 = 10.0;
    pub const LARGE: f32 = 14.0;
    pub const XLARGE: f32 = 18.0;
    pub const PILL: f32 = 9999.0;
}

pub fn none() -> Shadow {
    Shadow::default()
}

pub fn subtle() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 1.0),
        blur_radius: 3.0,
    }
}

pub fn medium() -> Shadow {
    Shadow {
        color: palette::current().shadow_medium,
        offset: Vector::new(0.0, 4.0),
        blur_radius: 12.0,
    }
}

/// Modal and banner elevation.
pub fn large() -> Shadow {
    Shadow {
        color: palette::current().shadow_medium,
        offset: Vector::new(0.0, 12.0),
        blur_radius: 32.0,
    }
}

/// Colored halo under the primary button.
pub const fn glow(color: Color) -> Shadow {
    Shadow {
        color: Color::from_rgba(color.r, color.g, color.b, 0.25),
        offset: Vector::new(0.0, 2.0),
        blur_radius: 10.0,
    }
}
