//! Palette and text styles for the CV template.

use crate::render::metrics::Face;

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// An RGB color with components in 0.0–1.0, as PDF content streams expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

// Palette (hex values from the visual template).
pub const DARK: Rgb = Rgb { r: 0.102, g: 0.137, b: 0.196 }; // #1A2332
pub const ACCENT: Rgb = Rgb { r: 0.145, g: 0.388, b: 0.922 }; // #2563EB
pub const LIGHT: Rgb = Rgb { r: 0.945, g: 0.961, b: 0.976 }; // #F1F5F9
pub const MID: Rgb = Rgb { r: 0.392, g: 0.455, b: 0.545 }; // #64748B
pub const RULE: Rgb = Rgb { r: 0.796, g: 0.835, b: 0.882 }; // #CBD5E1

// ────────────────────────────────────────────────────────────────────────────
// Text styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Paragraph-level styling. All lengths in points.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub face: Face,
    pub size: f32,
    pub leading: f32,
    pub color: Rgb,
    pub align: Align,
    pub left_indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl TextStyle {
    pub fn new(face: Face, size: f32, leading: f32, color: Rgb) -> TextStyle {
        TextStyle {
            face,
            size,
            leading,
            color,
            align: Align::Left,
            left_indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
        }
    }
}

/// The template's named styles, one constructor per visual role.
pub mod styles {
    use super::*;

    pub fn name() -> TextStyle {
        TextStyle {
            align: Align::Center,
            ..TextStyle::new(Face::Bold, 22.0, 26.0, DARK)
        }
    }

    pub fn role() -> TextStyle {
        TextStyle {
            align: Align::Center,
            space_after: 2.0,
            ..TextStyle::new(Face::Regular, 10.0, 14.0, ACCENT)
        }
    }

    pub fn contact() -> TextStyle {
        TextStyle {
            align: Align::Center,
            ..TextStyle::new(Face::Regular, 8.5, 14.0, MID)
        }
    }

    pub fn section() -> TextStyle {
        TextStyle {
            space_before: 8.0,
            space_after: 2.0,
            ..TextStyle::new(Face::Bold, 9.0, 12.0, ACCENT)
        }
    }

    pub fn company() -> TextStyle {
        TextStyle::new(Face::Bold, 9.5, 13.0, DARK)
    }

    pub fn date() -> TextStyle {
        TextStyle {
            align: Align::Right,
            ..TextStyle::new(Face::Oblique, 8.5, 12.0, MID)
        }
    }

    pub fn bullet() -> TextStyle {
        TextStyle {
            left_indent: 10.0,
            space_after: 1.5,
            ..TextStyle::new(Face::Regular, 8.5, 12.5, DARK)
        }
    }

    pub fn highlight() -> TextStyle {
        TextStyle {
            left_indent: 10.0,
            space_after: 1.5,
            ..TextStyle::new(Face::Bold, 8.5, 12.5, DARK)
        }
    }

    pub fn about() -> TextStyle {
        TextStyle::new(Face::Regular, 8.5, 13.0, DARK)
    }

    pub fn skill() -> TextStyle {
        TextStyle::new(Face::Regular, 8.5, 12.0, DARK)
    }

    pub fn skill_label() -> TextStyle {
        TextStyle::new(Face::Bold, 8.5, 12.0, DARK)
    }

    pub fn edu() -> TextStyle {
        TextStyle::new(Face::Regular, 8.5, 12.0, DARK)
    }

    pub fn edu_sub() -> TextStyle {
        TextStyle::new(Face::Regular, 8.0, 12.0, MID)
    }
}
