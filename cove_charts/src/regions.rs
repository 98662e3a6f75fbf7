// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlighted date ranges behind the plot.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::{ChartConfig, Region};
use cove_data::DateFormat;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

use crate::color::parse_css_color;
use crate::scale::ScaleTime;

/// Fill opacity of region rectangles.
pub const REGION_OPACITY: f32 = 0.3;
/// Height of the bracket ticks above the plot.
pub const REGION_TICK: f64 = 5.0;
/// Distance from the plot top to the region label.
pub const REGION_LABEL_OFFSET: f64 = 5.0;

/// One highlighted region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionGeometry {
    /// Region label.
    pub label: String,
    /// Shaded area, spanning the plot height.
    pub rect: Rect,
    /// Fill color.
    pub background: Color,
    /// Fill opacity.
    pub opacity: f32,
    /// Label and bracket color.
    pub color: Color,
    /// Centre-top of the label, hanging below this point.
    pub label_position: Point,
}

impl RegionGeometry {
    /// Returns the bracket drawn along the top edge: a tick at each end joined
    /// by a line.
    pub fn bracket(&self) -> BezPath {
        let (from, to) = (self.rect.x0, self.rect.x1);
        let mut path = BezPath::new();
        path.move_to((from, -REGION_TICK));
        path.line_to((from, REGION_TICK));
        path.move_to((from, 0.0));
        path.line_to((to, 0.0));
        path.move_to((to, -REGION_TICK));
        path.line_to((to, REGION_TICK));
        path
    }
}

/// Computes region geometry over a date axis `time_scale` and a plot
/// `height` pixels tall.
///
/// Regions whose bounds do not parse with `dateParseFormat` are skipped.
/// Colors that do not parse fall back to black.
pub fn region_geometry(
    config: &ChartConfig,
    time_scale: &ScaleTime,
    height: f64,
) -> Vec<RegionGeometry> {
    let format = DateFormat::new(config.x_axis.date_parse_format.as_str());
    config
        .regions
        .iter()
        .filter_map(|region| one_region(region, &format, time_scale, height))
        .collect()
}

fn one_region(
    region: &Region,
    format: &DateFormat,
    time_scale: &ScaleTime,
    height: f64,
) -> Option<RegionGeometry> {
    let (Some(from), Some(to)) = (format.parse_millis(&region.from), format.parse_millis(&region.to))
    else {
        tracing::debug!(label = %region.label, "region bounds do not parse; skipped");
        return None;
    };
    let x0 = time_scale.map(from as f64);
    let x1 = time_scale.map(to as f64);
    let rect = Rect::new(x0, 0.0, x1, height).abs();
    Some(RegionGeometry {
        label: region.label.clone(),
        rect,
        background: parse_css_color(&region.background).unwrap_or(Color::BLACK),
        opacity: REGION_OPACITY,
        color: parse_css_color(&region.color).unwrap_or(Color::BLACK),
        label_position: Point::new(rect.center().x, REGION_LABEL_OFFSET),
    })
}
