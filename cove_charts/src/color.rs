// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color parsing, contrast and tinting for labels and lollipop stems.

use peniko::Color;
use peniko::color::{AlphaColor, Lab, LinearSrgb, Srgb, parse_color};

/// Minimum WCAG contrast ratio between black label text and its fill.
///
/// Below this, labels switch to white.
pub const LABEL_CONTRAST_THRESHOLD: f64 = 4.9;

/// The L* step used by [`brighten`].
pub const LAB_STEP: f32 = 18.0;

/// Parses a CSS color string (`#rgb`, `#rrggbb`, `rgb(...)`, named colors).
pub fn parse_css_color(text: &str) -> Option<Color> {
    match parse_color(text.trim()) {
        Ok(c) => Some(c.to_alpha_color::<Srgb>()),
        Err(_) => {
            tracing::debug!(text, "unparseable color");
            None
        }
    }
}

/// Returns the WCAG relative luminance of `color` (alpha ignored).
pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b, _] = color.convert::<LinearSrgb>().components;
    0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b)
}

/// Returns the WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Returns the text color for a label drawn on `fill`: black, or white when
/// black does not reach [`LABEL_CONTRAST_THRESHOLD`].
pub fn label_color(fill: Color) -> Color {
    if contrast_ratio(Color::BLACK, fill) < LABEL_CONTRAST_THRESHOLD {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

/// Lightens `color` by `steps` Lab lightness steps ([`LAB_STEP`] L* each).
///
/// Results outside the sRGB gamut are clamped.
pub fn brighten(color: Color, steps: f32) -> Color {
    let [l, a, b, alpha] = color.convert::<Lab>().components;
    let lighter = AlphaColor::<Lab>::new([l + LAB_STEP * steps, a, b, alpha]).convert::<Srgb>();
    let [r, g, b, alpha] = lighter.components;
    Color::new([r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), alpha])
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn yellow_takes_black_text_and_navy_takes_white() {
        let yellow = parse_css_color("#FFFF00").unwrap();
        let navy = parse_css_color("#000066").unwrap();
        assert_eq!(label_color(yellow), Color::BLACK);
        assert_eq!(label_color(navy), Color::WHITE);
    }

    #[test]
    fn contrast_is_symmetric_and_bounded() {
        let white = Color::WHITE;
        let black = Color::BLACK;
        assert!((contrast_ratio(white, black) - 21.0).abs() < 1e-3);
        assert_eq!(contrast_ratio(black, white), contrast_ratio(white, black));
        assert!((contrast_ratio(white, white) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn threshold_sits_between_mid_tones() {
        // #767676 is the classic 4.5:1 gray on white; against black it is ~4.7.
        let gray = Color::from_rgb8(0x76, 0x76, 0x76);
        assert_eq!(label_color(gray), Color::WHITE);
        let light = Color::from_rgb8(0x99, 0x99, 0x99);
        assert_eq!(label_color(light), Color::BLACK);
    }

    #[test]
    fn brighten_raises_luminance_and_clamps() {
        let blue = Color::from_rgb8(0x1f, 0x4e, 0x79);
        let tinted = brighten(blue, 1.0);
        assert!(relative_luminance(tinted) > relative_luminance(blue));
        let white = brighten(Color::WHITE, 1.0);
        assert!(white.components.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn bad_color_strings_are_rejected() {
        assert!(parse_css_color("not a color").is_none());
        assert_eq!(parse_css_color(" #000 "), Some(Color::BLACK));
    }
}
