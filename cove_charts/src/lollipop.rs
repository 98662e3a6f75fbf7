// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lollipop bars: a thin stem with a circle or square head at the value end.

use cove_config::{LollipopColorStyle, LollipopShape, LollipopSize};
use kurbo::{BezPath, Circle, Point, Rect, Shape};
use peniko::Color;

use crate::color::brighten;

/// Stem and head sizes for a lollipop size preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LollipopMetrics {
    /// Stem thickness in pixels.
    pub stem: f64,
    /// Head diameter (or side) in pixels.
    pub head: f64,
}

impl LollipopMetrics {
    /// Returns the metrics for `size`.
    pub fn for_size(size: LollipopSize) -> Self {
        match size {
            LollipopSize::Small => Self {
                stem: 5.0,
                head: 10.0,
            },
            LollipopSize::Medium => Self {
                stem: 6.0,
                head: 12.0,
            },
            LollipopSize::Large => Self {
                stem: 7.0,
                head: 14.0,
            },
        }
    }
}

/// Returns the stem color for a series color.
///
/// Two-tone stems are one Lab step lighter than the head.
pub fn stem_color(style: LollipopColorStyle, series: Color) -> Color {
    match style {
        LollipopColorStyle::Regular => series,
        LollipopColorStyle::TwoTone => brighten(series, 1.0),
    }
}

/// The head of a lollipop bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LollipopHead {
    /// Circle or square.
    pub shape: LollipopShape,
    /// Centre, on the stem axis at the value end.
    pub center: Point,
    /// Diameter (circle) or side (square).
    pub size: f64,
    /// Fill color (the series color).
    pub color: Color,
}

impl LollipopHead {
    /// Returns the head's bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.size, self.size))
    }

    /// Returns the head outline.
    pub fn path(&self) -> BezPath {
        match self.shape {
            LollipopShape::Square => self.bounds().to_path(0.1),
            LollipopShape::Circle => {
                // Renderers usually pick a tolerance from the device pixel size.
                Circle::new(self.center, self.size * 0.5).to_path(0.1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::relative_luminance;

    #[test]
    fn size_presets() {
        let small = LollipopMetrics::for_size(LollipopSize::Small);
        let medium = LollipopMetrics::for_size(LollipopSize::Medium);
        let large = LollipopMetrics::for_size(LollipopSize::Large);
        assert_eq!((small.stem, small.head), (5.0, 10.0));
        assert_eq!((medium.stem, medium.head), (6.0, 12.0));
        assert_eq!((large.stem, large.head), (7.0, 14.0));
    }

    #[test]
    fn two_tone_stems_are_lighter() {
        let c = Color::from_rgb8(0x00, 0x5e, 0xaa);
        assert_eq!(stem_color(LollipopColorStyle::Regular, c), c);
        let stem = stem_color(LollipopColorStyle::TwoTone, c);
        assert!(relative_luminance(stem) > relative_luminance(c));
    }

    #[test]
    fn head_is_centred_on_the_value_end() {
        let head = LollipopHead {
            shape: LollipopShape::Square,
            center: Point::new(40.0, 10.0),
            size: 12.0,
            color: Color::BLACK,
        };
        assert_eq!(head.bounds(), Rect::new(34.0, 4.0, 46.0, 16.0));
        let circle = LollipopHead {
            shape: LollipopShape::Circle,
            ..head
        };
        let b = circle.path().bounding_box();
        assert!((b.center().x - 40.0).abs() < 0.2);
        assert!((b.width() - 12.0).abs() < 0.2);
    }
}
