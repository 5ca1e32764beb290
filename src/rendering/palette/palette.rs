//! Centralized colors for balls, slots and bouncers.
//! Single source of truth for every visual path.

use bevy::prelude::*;

use crate::core::components::{BallColor, Polarity};

/// Ball palette, indexed by `BallColor::index()`. Update here only.
pub const BALL_COLORS: [Color; 7] = [
    Color::srgb(0.92, 0.20, 0.22), // red
    Color::srgb(0.18, 0.45, 0.95), // blue
    Color::srgb(0.20, 0.80, 0.35), // green
    Color::srgb(0.20, 0.85, 0.90), // cyan
    Color::srgb(0.62, 0.35, 0.92), // purple
    Color::srgb(0.98, 0.85, 0.20), // yellow
    Color::srgb(0.62, 0.62, 0.66), // grey
];

pub const BOUNCER_COLOR: Color = Color::srgb(0.85, 0.55, 0.95);

#[inline]
pub fn ball_color(c: BallColor) -> Color {
    BALL_COLORS[c.index()]
}

/// (base, glow) colors for a slot.
pub fn slot_colors(polarity: Polarity) -> (Color, Color) {
    match polarity {
        Polarity::Good => (Color::srgb(0.15, 0.75, 0.30), Color::srgba(0.35, 1.0, 0.45, 0.35)),
        Polarity::Bad => (Color::srgb(0.80, 0.15, 0.15), Color::srgba(1.0, 0.30, 0.25, 0.35)),
    }
}
