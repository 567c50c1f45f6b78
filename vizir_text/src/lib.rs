// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement capability for axis and value-label layout.
//!
//! Scale and axis computation in `vizir_xy` is pure: the only thing it cannot
//! compute on its own is how much room a string takes once rendered. That is
//! injected through [`TextMeasurer`], so the same layout code can run against a
//! shaping engine, a browser canvas, or a deterministic fake in tests.
//!
//! Measurers are expected to be synchronous and idempotent for a given
//! `(text, style)` pair. Callers that want caching wrap a measurer; nothing in
//! this crate holds state.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// Measures the bounding box of a single line of text.
pub trait TextMeasurer {
    /// Returns the unrotated bounding box of `text` rendered with `style`.
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        (**self).measure(text, style)
    }
}

/// The measured, unrotated extent of a line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBox {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl TextBox {
    /// Creates a box from its width and height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The empty box, returned for empty strings.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// Font inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Preferred font family.
    pub font_family: FontFamily,
    /// Font weight (`400` normal, `700` bold).
    pub font_weight: FontWeight,
    /// Extra horizontal space added on each side of the measured text.
    pub padding: f64,
}

impl TextStyle {
    /// Creates a sans-serif, normal-weight style of the given size.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            padding: 0.0,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the horizontal padding, clamped to be non-negative.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0)
    }
}

/// Font family selection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// CSS `serif`.
    Serif,
    /// CSS `sans-serif`.
    SansSerif,
    /// CSS `monospace`.
    Monospace,
    /// A named family such as `"Inter"`.
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the CSS family string.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// `400`.
    pub const NORMAL: Self = Self(400);
    /// `700`.
    pub const BOLD: Self = Self(700);
}

/// Rough estimate: glyphs average ~0.6em wide, lines are 1em tall.
///
/// Bold text is widened by 10%.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        if text.is_empty() {
            return TextBox::ZERO;
        }
        let weight = if style.font_weight >= FontWeight::BOLD {
            1.1
        } else {
            1.0
        };
        let width = 0.6 * weight * style.font_size * text.chars().count() as f64;
        TextBox::new(width + 2.0 * style.padding, style.font_size)
    }
}

/// Every character is exactly `char_width` wide and every line
/// `line_height` tall, regardless of style.
///
/// Useful wherever layout must be reproducible to the pixel, e.g. tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceTextMeasurer {
    /// Width of one character.
    pub char_width: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl MonospaceTextMeasurer {
    /// Creates a measurer with fixed per-character metrics.
    #[must_use]
    pub const fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

impl TextMeasurer for MonospaceTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextBox {
        if text.is_empty() {
            return TextBox::ZERO;
        }
        let width = self.char_width * text.chars().count() as f64;
        TextBox::new(width + 2.0 * style.padding, self.line_height)
    }
}
