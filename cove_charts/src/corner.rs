// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner rounding for `barStyle = rounded`.

use cove_config::{BarStyle, ChartConfig, RoundingStyle, TipRounding};
use kurbo::RoundedRectRadii;

/// One side of an axis-aligned bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The edge with the smallest y.
    Top,
    /// The edge with the largest x.
    Right,
    /// The edge with the largest y.
    Bottom,
    /// The edge with the smallest x.
    Left,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Returns `true` for [`Side::Left`] and [`Side::Right`].
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Returns the corner radius for a rounding preset, in pixels.
pub fn corner_radius(style: RoundingStyle) -> f64 {
    match style {
        RoundingStyle::Standard => 8.0,
        RoundingStyle::Shallow => 5.0,
        RoundingStyle::Finger => 15.0,
        RoundingStyle::None => 0.0,
    }
}

/// Returns radii with `r` on the two corners touching `side`.
pub fn side_radii(side: Side, r: f64) -> RoundedRectRadii {
    match side {
        Side::Top => RoundedRectRadii::new(r, r, 0.0, 0.0),
        Side::Right => RoundedRectRadii::new(0.0, r, r, 0.0),
        Side::Bottom => RoundedRectRadii::new(0.0, 0.0, r, r),
        Side::Left => RoundedRectRadii::new(r, 0.0, 0.0, r),
    }
}

/// Returns the corner radii of one bar.
///
/// `value_side` is the side at the bar's value end. `layer` is
/// `(index, count)` for a stacked segment, `None` for a grouped bar.
///
/// Value-end corners round on grouped bars and on the top stack layer. With
/// `tipRounding = full`, a grouped bar or a lone stack layer rounds all four
/// corners, and the bottom layer of a taller stack rounds its base end.
pub fn bar_radii(
    config: &ChartConfig,
    value_side: Side,
    layer: Option<(usize, usize)>,
) -> RoundedRectRadii {
    let square = RoundedRectRadii::from_single_radius(0.0);
    if config.bar_style != BarStyle::Rounded {
        return square;
    }
    let r = corner_radius(config.rounding_style);
    let full = config.tip_rounding == TipRounding::Full;

    match layer {
        None if full => RoundedRectRadii::from_single_radius(r),
        None => side_radii(value_side, r),
        Some((0, 1)) if full => RoundedRectRadii::from_single_radius(r),
        Some((0, count)) if full && count > 1 => side_radii(value_side.opposite(), r),
        Some((index, count)) if index + 1 == count => side_radii(value_side, r),
        Some(_) => square,
    }
}
