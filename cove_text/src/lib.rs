// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for bar label placement.
//!
//! Cove decides where value and category labels go before anything is drawn:
//! a label that does not fit inside its bar is moved past the bar end. That fit
//! check needs the width of a string in the active font, so chart code depends
//! on the tiny [`TextMeasurer`] interface defined here.
//!
//! Implementations live downstream:
//! - [`HeuristicTextMeasurer`] (fast, font-agnostic, used in tests),
//! - `cove_text_parley` (shaping-aware, native), and
//! - `cove_text_web` (HTML canvas `measureText`, like the authoring tool).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// Measures single lines of label text.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Returns the advance width rounded up to the next whole pixel.
    ///
    /// Label fit checks compare this value against bar lengths, so rounding up
    /// keeps a label that is a fraction of a pixel too wide outside the bar.
    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let w = self.measure(text, style).advance_width;
        if w.is_finite() { ceil(w.max(0.0)) } else { 0.0 }
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        (**self).measure(text, style)
    }
}

/// The three label size presets offered by the chart editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontSizePreset {
    /// 14 px labels.
    Small,
    /// 16 px labels.
    #[default]
    Medium,
    /// 18 px labels.
    Large,
}

impl FontSizePreset {
    /// Returns the preset size in pixels.
    #[must_use]
    pub fn px(self) -> f64 {
        match self {
            Self::Small => 14.0,
            Self::Medium => 16.0,
            Self::Large => 18.0,
        }
    }
}

/// Text styling inputs relevant to measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a sans-serif, normal-weight style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Creates a style from one of the editor's size presets.
    #[must_use]
    pub fn from_preset(preset: FontSizePreset) -> Self {
        Self::new(preset.px())
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::from_preset(FontSizePreset::Medium)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A named family (e.g. `"Source Sans Pro"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the family string for CSS `font` shorthands.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::SansSerif => "sans-serif",
            Self::Serif => "serif",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`), used for axis titles.
    pub const BOLD: Self = Self(700);
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent`.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A font-agnostic measurer.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let weight_factor = if style.font_weight >= FontWeight::BOLD {
            1.1
        } else {
            1.0
        };
        TextMetrics {
            advance_width: 0.6 * weight_factor * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}

#[cfg(feature = "std")]
fn ceil(v: f64) -> f64 {
    extern crate std;
    v.ceil()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn ceil(v: f64) -> f64 {
    libm::ceil(v)
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("cove_text requires either the `std` or `libm` feature");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_editor_sizes() {
        assert_eq!(FontSizePreset::Small.px(), 14.0);
        assert_eq!(FontSizePreset::Medium.px(), 16.0);
        assert_eq!(FontSizePreset::Large.px(), 18.0);
        assert_eq!(TextStyle::default().font_size, 16.0);
    }

    #[test]
    fn text_width_rounds_up_to_whole_pixels() {
        // 3 glyphs * 0.6 * 15px = 27.0, 1 glyph * 0.6 * 15px = 9.0, 2 glyphs * 0.6 * 13 = 15.6
        let m = HeuristicTextMeasurer;
        assert_eq!(m.text_width("abc", &TextStyle::new(15.0)), 27.0);
        assert_eq!(m.text_width("ab", &TextStyle::new(13.0)), 16.0);
        assert_eq!(m.text_width("", &TextStyle::new(13.0)), 0.0);
    }

    #[test]
    fn bold_text_measures_wider() {
        let m = HeuristicTextMeasurer;
        let normal = m.measure("1,234", &TextStyle::new(16.0));
        let bold = m.measure("1,234", &TextStyle::new(16.0).with_weight(FontWeight::BOLD));
        assert!(bold.advance_width > normal.advance_width);
        assert_eq!(normal.height(), 16.0);
    }
}
