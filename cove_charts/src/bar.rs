// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar geometry: grouped bars, category slots and the horizontal extent query.
//!
//! Coordinates are plot-local: `(0, 0)` is the top-left of the plot area and
//! y grows downward. Vertical charts map values to `[plot_height, 0]`;
//! horizontal charts map values to `[0, plot_width]`.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::{ChartConfig, LabelPlacement, LegendBehavior};
use cove_data::{DataView, Row};
use kurbo::{Point, Rect, RoundedRect, RoundedRectRadii};
use peniko::Color;

use crate::corner::{Side, bar_radii};
use crate::domain::has_numeric_value;
use crate::label::label_style;
use crate::lollipop::{LollipopHead, LollipopMetrics, stem_color};
use crate::palette::{Palette, color_code_column};
use crate::scale::ScaleLinear;
use crate::stack::stacked_bars;

/// Width of the border drawn around bars when `barHasBorder` is set.
pub const BAR_BORDER_WIDTH: f64 = 1.0;
/// Opacity of series dimmed by a highlight-style legend.
pub const DIMMED_OPACITY: f32 = 0.5;
/// Spacing between non-stacked horizontal lollipops with labels below them.
pub const LOLLIPOP_BELOW_BAR_SPACE: f64 = 20.0;

/// One computed bar (or stack segment, or lollipop stem).
#[derive(Clone, Debug, PartialEq)]
pub struct BarGeometry {
    /// Left edge in plot coordinates.
    pub x: f64,
    /// Top edge in plot coordinates.
    pub y: f64,
    /// Width in pixels (never negative).
    pub width: f64,
    /// Height in pixels (never negative).
    pub height: f64,
    /// Fill color (the stem color for lollipops).
    pub color: Color,
    /// Series data key.
    pub series_key: String,
    /// Row position in the data view.
    pub row_index: usize,
    /// Series position (grouped) or stack layer (stacked), in declaration order.
    pub stack_index: usize,
    /// Corner radii.
    pub radii: RoundedRectRadii,
    /// 1.0, or [`DIMMED_OPACITY`] for dimmed series.
    pub opacity: f32,
    /// The data value (0 when missing).
    pub value: f64,
    /// Border width in pixels.
    pub border_width: f64,
    /// The side at the value end of the bar.
    pub value_side: Side,
    /// The head, for lollipop bars.
    pub lollipop: Option<LollipopHead>,
}

impl BarGeometry {
    /// Returns the bar rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Returns the bar outline with its corner radii.
    pub fn rounded_rect(&self) -> RoundedRect {
        RoundedRect::from_rect(self.rect(), self.radii)
    }

    /// Returns the bar length along the value axis.
    pub fn length(&self) -> f64 {
        if self.value_side.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }

    /// Returns the position of the value end along the value axis.
    pub fn value_end(&self) -> f64 {
        match self.value_side {
            Side::Top => self.y,
            Side::Bottom => self.y + self.height,
            Side::Left => self.x,
            Side::Right => self.x + self.width,
        }
    }

    /// Returns the centre of the bar.
    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// Where bar groups sit along the category axis.
///
/// Row `i` owns the slot starting at `origin + pitch * i`; its group starts
/// `offset` into the slot and each bar is `bar_thickness` thick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategorySlots {
    /// Start of the first slot.
    pub origin: f64,
    /// Distance between consecutive slots.
    pub pitch: f64,
    /// Offset of the group within its slot.
    pub offset: f64,
    /// Thickness of one bar along the category axis.
    pub bar_thickness: f64,
}

impl CategorySlots {
    /// Creates slots from explicit measurements.
    pub fn new(origin: f64, pitch: f64, offset: f64, bar_thickness: f64) -> Self {
        Self {
            origin,
            pitch,
            offset,
            bar_thickness,
        }
    }

    /// Slots for a vertical chart: `rows` equal slots across `width`.
    ///
    /// Each group covers `barThickness` of its slot and is centred in it.
    /// Grouped lollipops are one stem thick per series.
    pub fn vertical(config: &ChartConfig, width: f64, rows: usize) -> Self {
        if rows == 0 {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let pitch = width / rows as f64;
        let thickness = bar_thickness_ratio(config);
        let bars = bars_per_group(config);
        if config.is_stacked() {
            return Self::new(0.0, pitch, pitch * (1.0 - thickness) / 2.0, pitch * thickness);
        }
        if config.is_lollipop() {
            let stem = LollipopMetrics::for_size(config.lollipop_size).stem;
            return Self::new(0.0, pitch, (pitch - stem * bars as f64) / 2.0, stem);
        }
        Self::new(
            0.0,
            pitch,
            pitch * (1.0 - thickness) / 2.0,
            pitch * thickness / bars as f64,
        )
    }

    /// Slots for a horizontal chart, sized from `barHeight` rather than the plot.
    ///
    /// The slot pitch is group thickness plus the below-bar label reserve plus
    /// the bar spacing.
    pub fn horizontal(config: &ChartConfig) -> Self {
        let m = HorizontalMetrics::new(config);
        Self::new(0.0, m.pitch(), 0.0, m.bar)
    }

    /// Returns the start of row `row`'s slot.
    pub fn slot_start(&self, row: usize) -> f64 {
        self.origin + self.pitch * row as f64
    }

    /// Returns the start of row `row`'s bar group.
    pub fn group_start(&self, row: usize) -> f64 {
        self.slot_start(row) + self.offset
    }

    /// Returns the thickness of a group of `bars` side-by-side bars.
    pub fn group_thickness(&self, bars: usize) -> f64 {
        self.bar_thickness * bars as f64
    }

    /// Returns the start of series `index` of `count` in row `row`.
    ///
    /// The first declared series takes the far position.
    pub fn bar_start(&self, row: usize, index: usize, count: usize) -> f64 {
        let from_far = count.saturating_sub(index + 1);
        self.group_start(row) + self.bar_thickness * from_far as f64
    }

    /// Returns the centre of row `row`'s slot.
    pub fn slot_center(&self, row: usize) -> f64 {
        self.slot_start(row) + self.pitch / 2.0
    }
}

/// Horizontal bar sizing derived from `barHeight`, `barSpace` and the label placement.
#[derive(Clone, Copy, Debug)]
struct HorizontalMetrics {
    bar: f64,
    group: f64,
    label_reserve: f64,
    space: f64,
}

impl HorizontalMetrics {
    fn new(config: &ChartConfig) -> Self {
        let bars = bars_per_group(config) as f64;
        let stacked = config.is_stacked();
        let lollipop = !stacked && config.is_lollipop();
        let bar = if lollipop {
            LollipopMetrics::for_size(config.lollipop_size).stem
        } else {
            config.bar_height
        };
        let group = if stacked { bar } else { bar * bars };
        let below = config.label_placement() == Some(LabelPlacement::BelowBar);
        let label_reserve = if below {
            label_style(config).font_size
        } else {
            0.0
        };
        let space = match (below, lollipop) {
            (true, true) => LOLLIPOP_BELOW_BAR_SPACE,
            (true, false) => group / 2.0,
            (false, _) => config.bar_space,
        };
        Self {
            bar,
            group,
            label_reserve,
            space,
        }
    }

    fn pitch(&self) -> f64 {
        self.group + self.label_reserve + self.space
    }
}

/// Returns the plot height a horizontal bar chart needs for `rows` categories.
///
/// The surrounding layout calls this; the result is never written back into
/// the configuration.
pub fn horizontal_extent(config: &ChartConfig, rows: usize) -> f64 {
    HorizontalMetrics::new(config).pitch() * rows as f64
}

/// Returns the group/bar thickness ratio, falling back to 0.8 when invalid.
pub(crate) fn bar_thickness_ratio(config: &ChartConfig) -> f64 {
    let t = config.bar_thickness;
    if t > 0.0 && t <= 1.0 {
        t
    } else {
        ChartConfig::FALLBACK_BAR_THICKNESS
    }
}

/// Returns the number of side-by-side bars in a group.
pub(crate) fn bars_per_group(config: &ChartConfig) -> usize {
    if config.is_stacked() {
        1
    } else {
        config.runtime.bar_series_keys.len().max(1)
    }
}

/// Returns the opacity of series `key`, or `None` if the legend isolates it away.
///
/// An empty `highlighted` list leaves every series at full opacity.
pub(crate) fn series_opacity(config: &ChartConfig, highlighted: &[String], key: &str) -> Option<f32> {
    if highlighted.is_empty() || highlighted.iter().any(|h| h == key) {
        return Some(1.0);
    }
    match config.legend.behavior {
        LegendBehavior::Highlight => Some(DIMMED_OPACITY),
        LegendBehavior::Isolate => None,
    }
}

/// Styling shared by grouped and stacked bars.
pub(crate) struct BarPainter<'a> {
    pub(crate) config: &'a ChartConfig,
    palette: &'a dyn Palette,
    highlighted: &'a [String],
    color_codes: Option<(&'a str, Vec<String>)>,
}

impl<'a> BarPainter<'a> {
    pub(crate) fn new(
        config: &'a ChartConfig,
        view: &DataView<'_>,
        palette: &'a dyn Palette,
        highlighted: &'a [String],
    ) -> Self {
        let color_codes = color_code_column(config).map(|column| (column, view.distinct(column)));
        Self {
            config,
            palette,
            highlighted,
            color_codes,
        }
    }

    pub(crate) fn opacity(&self, key: &str) -> Option<f32> {
        series_opacity(self.config, self.highlighted, key)
    }

    /// Returns the series color, or the per-row color when coloring by a column.
    pub(crate) fn color(&self, key: &str, row_index: usize) -> Color {
        if let Some((_, values)) = &self.color_codes
            && !values.is_empty()
        {
            return self.palette.color(&values[row_index % values.len()]);
        }
        self.palette.color(self.config.runtime.series_label(key))
    }

    pub(crate) fn border_width(&self) -> f64 {
        if self.config.bar_has_border && !self.config.is_lollipop() {
            BAR_BORDER_WIDTH
        } else {
            0.0
        }
    }

    /// Builds one bar spanning `base_px..value_px` along the value axis.
    pub(crate) fn bar(&self, spec: BarSpec<'_>) -> BarGeometry {
        let horizontal = self.config.is_horizontal();
        let (rect, value_side) = place(
            horizontal,
            spec.start,
            spec.thickness,
            spec.base_px,
            spec.value_px,
            spec.value,
        );
        let series_color = self.color(spec.key, spec.row_index);
        let (color, lollipop) = if self.config.is_lollipop() && !self.config.is_stacked() {
            let head = LollipopHead {
                shape: self.config.lollipop_shape,
                center: value_end_point(&rect, value_side),
                size: LollipopMetrics::for_size(self.config.lollipop_size).head,
                color: series_color,
            };
            (
                stem_color(self.config.lollipop_color_style, series_color),
                Some(head),
            )
        } else {
            (series_color, None)
        };
        BarGeometry {
            x: rect.x0,
            y: rect.y0,
            width: rect.width(),
            height: rect.height(),
            color,
            series_key: String::from(spec.key),
            row_index: spec.row_index,
            stack_index: spec.layer.map_or(spec.series_index, |(i, _)| i),
            radii: bar_radii(self.config, value_side, spec.layer),
            opacity: spec.opacity,
            value: spec.value,
            border_width: self.border_width(),
            value_side,
            lollipop,
        }
    }
}

/// Inputs for [`BarPainter::bar`].
pub(crate) struct BarSpec<'k> {
    pub(crate) key: &'k str,
    pub(crate) row_index: usize,
    pub(crate) series_index: usize,
    pub(crate) layer: Option<(usize, usize)>,
    pub(crate) start: f64,
    pub(crate) thickness: f64,
    pub(crate) base_px: f64,
    pub(crate) value_px: f64,
    pub(crate) value: f64,
    pub(crate) opacity: f32,
}

/// Turns category and value-axis extents into a rectangle and its value side.
fn place(
    horizontal: bool,
    start: f64,
    thickness: f64,
    base_px: f64,
    value_px: f64,
    value: f64,
) -> (Rect, Side) {
    let lo = base_px.min(value_px);
    let hi = base_px.max(value_px);
    if horizontal {
        let side = if value_px > base_px || (value_px == base_px && value >= 0.0) {
            Side::Right
        } else {
            Side::Left
        };
        (Rect::new(lo, start, hi, start + thickness), side)
    } else {
        let side = if value_px < base_px || (value_px == base_px && value >= 0.0) {
            Side::Top
        } else {
            Side::Bottom
        };
        (Rect::new(start, lo, start + thickness, hi), side)
    }
}

fn value_end_point(rect: &Rect, side: Side) -> Point {
    let c = rect.center();
    match side {
        Side::Top => Point::new(c.x, rect.y0),
        Side::Bottom => Point::new(c.x, rect.y1),
        Side::Left => Point::new(rect.x0, c.y),
        Side::Right => Point::new(rect.x1, c.y),
    }
}

/// Returns the value bars grow from: zero, clamped into the scale's domain.
pub(crate) fn baseline(value_scale: &ScaleLinear) -> f64 {
    clamp_to_domain(value_scale, 0.0)
}

/// Clamps a data value into the domain of `value_scale`.
pub(crate) fn clamp_to_domain(value_scale: &ScaleLinear, value: f64) -> f64 {
    let (d0, d1) = (value_scale.domain_min(), value_scale.domain_max());
    value.max(d0.min(d1)).min(d0.max(d1))
}

/// Reads a series value; missing or non-numeric values count as zero.
pub(crate) fn value_of(row: &Row, key: &str) -> f64 {
    row.number(key).unwrap_or(0.0)
}

/// Computes bar geometry for every bar series of `config` over `view`.
///
/// Stacked charts stack series per row; everything else groups them side by
/// side. Rows with no numeric series value produce no bars but keep their
/// slot. A degenerate value scale produces no bars.
pub fn bar_geometry(
    config: &ChartConfig,
    view: &DataView<'_>,
    value_scale: ScaleLinear,
    slots: CategorySlots,
    palette: &dyn Palette,
    highlighted: &[String],
) -> Vec<BarGeometry> {
    let keys = &config.runtime.bar_series_keys;
    if keys.is_empty() || view.is_empty() || value_scale.is_degenerate() {
        return Vec::new();
    }
    let painter = BarPainter::new(config, view, palette, highlighted);
    let bars = if config.is_stacked() {
        stacked_bars(&painter, view, value_scale, slots)
    } else {
        grouped_bars(&painter, view, value_scale, slots)
    };
    tracing::debug!(
        bars = bars.len(),
        rows = view.len(),
        stacked = config.is_stacked(),
        horizontal = config.is_horizontal(),
        "computed bar geometry"
    );
    bars
}

fn grouped_bars(
    painter: &BarPainter<'_>,
    view: &DataView<'_>,
    value_scale: ScaleLinear,
    slots: CategorySlots,
) -> Vec<BarGeometry> {
    let keys = &painter.config.runtime.bar_series_keys;
    let count = keys.len();
    let base_px = value_scale.map(baseline(&value_scale));
    let mut out = Vec::with_capacity(view.len() * count);
    for (row_index, row) in view.rows().enumerate() {
        if !has_numeric_value(row, keys) {
            tracing::debug!(row_index, "row has no numeric series value; skipped");
            continue;
        }
        for (series_index, key) in keys.iter().enumerate() {
            let Some(opacity) = painter.opacity(key) else {
                continue;
            };
            let value = value_of(row, key);
            out.push(painter.bar(BarSpec {
                key,
                row_index,
                series_index,
                layer: None,
                start: slots.bar_start(row_index, series_index, count),
                thickness: slots.bar_thickness,
                base_px,
                value_px: value_scale.map(value),
                value,
                opacity,
            }));
        }
    }
    out
}
