// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label placement for value and category labels on bar charts.
//!
//! Positions are plot-local, like [`BarGeometry`]. Horizontal charts place
//! category labels according to `yAxis.labelPlacement`; vertical charts leave
//! category text to the axis (see [`crate::axis`]).

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::{ChartConfig, FontSize, LabelPlacement};
use cove_data::DataView;
use cove_text::{FontSizePreset, TextMeasurer, TextStyle};
use kurbo::Point;
use peniko::Color;

use crate::bar::{BarGeometry, CategorySlots, bars_per_group};
use crate::color::label_color;
use crate::corner::Side;
use crate::format::NumberFormat;
use crate::tooltip::category_text;

/// A label fits inside a bar when its width is under this share of the bar length.
pub const LABEL_FIT_RATIO: f64 = 0.48;
/// Gap between a label and the bar edge it is attached to.
pub const LABEL_PADDING: f64 = 5.0;
/// Distance from a lollipop's value end to its value label.
pub const LOLLIPOP_LABEL_OFFSET: f64 = 15.0;
/// Stacked segment values are drawn when the segment is this much longer than the text.
pub const STACK_LABEL_MARGIN: f64 = 50.0;
/// Gap between a bar group and the category label below it.
pub const BELOW_BAR_GAP: f64 = 4.0;

/// Horizontal text alignment relative to the label position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position is the start of the text.
    Start,
    /// The position is the middle of the text.
    Middle,
    /// The position is the end of the text.
    End,
}

/// Vertical text alignment relative to the label position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The position is on the alphabetic baseline; text sits above it.
    Alphabetic,
    /// The position is the vertical middle of the text.
    Middle,
    /// The position is the top of the text; text hangs below it.
    Hanging,
}

/// What a label shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// A formatted series value.
    Value,
    /// A category (row) name.
    Category,
}

/// One positioned label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelGeometry {
    /// What the label shows.
    pub kind: LabelKind,
    /// Display text.
    pub text: String,
    /// Anchor point in plot coordinates.
    pub position: Point,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Vertical alignment.
    pub baseline: TextBaseline,
    /// Text color.
    pub color: Color,
    /// Matches the labelled bar's opacity.
    pub opacity: f32,
    /// Row position in the data view.
    pub row_index: usize,
    /// Series key for value labels.
    pub series_key: Option<String>,
}

/// Returns the label text style for the chart's `fontSize`.
pub fn label_style(config: &ChartConfig) -> TextStyle {
    TextStyle::from_preset(match config.font_size {
        FontSize::Small => FontSizePreset::Small,
        FontSize::Medium => FontSizePreset::Medium,
        FontSize::Large => FontSizePreset::Large,
    })
}

/// Returns `true` if text `text_width` pixels wide fits inside a bar `length` long.
pub fn fits_inside(text_width: f64, length: f64) -> bool {
    length > 0.0 && text_width / length < LABEL_FIT_RATIO
}

/// Places `text` at the value end of a horizontal bar.
///
/// Text that fits goes inside, end-aligned against the value end, in the
/// contrast color for the bar. Otherwise it goes just outside in black. Bars
/// growing left mirror both cases.
fn at_value_end(
    bar: &BarGeometry,
    text: String,
    text_width: f64,
    kind: LabelKind,
) -> LabelGeometry {
    let end = bar.value_end();
    let grows_right = bar.value_side != Side::Left;
    let inside = fits_inside(text_width, bar.length());
    let (dx, anchor, color) = match (inside, grows_right) {
        (true, true) => (-LABEL_PADDING, TextAnchor::End, label_color(bar.color)),
        (true, false) => (LABEL_PADDING, TextAnchor::Start, label_color(bar.color)),
        (false, true) => (LABEL_PADDING, TextAnchor::Start, Color::BLACK),
        (false, false) => (-LABEL_PADDING, TextAnchor::End, Color::BLACK),
    };
    LabelGeometry {
        kind,
        text,
        position: Point::new(end + dx, bar.center().y),
        anchor,
        baseline: TextBaseline::Middle,
        color,
        opacity: bar.opacity,
        row_index: bar.row_index,
        series_key: (kind == LabelKind::Value).then(|| bar.series_key.clone()),
    }
}

/// Computes value labels for `bars`.
///
/// Vertical charts draw them when `labels` is set; horizontal charts when
/// `yAxis.displayNumbersOnBar` is set.
pub fn value_labels(
    config: &ChartConfig,
    bars: &[BarGeometry],
    format: &NumberFormat,
    measurer: &dyn TextMeasurer,
) -> Vec<LabelGeometry> {
    if config.is_horizontal() {
        if !config.y_axis.display_numbers_on_bar {
            return Vec::new();
        }
        let style = label_style(config);
        bars.iter()
            .filter_map(|bar| horizontal_value_label(config, bar, format, measurer, &style))
            .collect()
    } else if config.labels {
        bars.iter().map(|bar| vertical_value_label(bar, format)).collect()
    } else {
        Vec::new()
    }
}

fn vertical_value_label(bar: &BarGeometry, format: &NumberFormat) -> LabelGeometry {
    let x = bar.center().x;
    let (y, baseline) = if bar.value_side == Side::Bottom {
        (bar.y + bar.height + LABEL_PADDING, TextBaseline::Hanging)
    } else {
        (bar.y - LABEL_PADDING, TextBaseline::Alphabetic)
    };
    LabelGeometry {
        kind: LabelKind::Value,
        text: format.format(bar.value),
        position: Point::new(x, y),
        anchor: TextAnchor::Middle,
        baseline,
        color: bar.lollipop.map_or(bar.color, |head| head.color),
        opacity: bar.opacity,
        row_index: bar.row_index,
        series_key: Some(bar.series_key.clone()),
    }
}

fn horizontal_value_label(
    config: &ChartConfig,
    bar: &BarGeometry,
    format: &NumberFormat,
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
) -> Option<LabelGeometry> {
    let text = format.format(bar.value);
    let width = measurer.text_width(&text, style);

    if config.is_stacked() {
        if width + STACK_LABEL_MARGIN >= bar.width {
            return None;
        }
        return Some(LabelGeometry {
            kind: LabelKind::Value,
            text,
            position: bar.center(),
            anchor: TextAnchor::Middle,
            baseline: TextBaseline::Middle,
            color: label_color(bar.color),
            opacity: bar.opacity,
            row_index: bar.row_index,
            series_key: Some(bar.series_key.clone()),
        });
    }

    if config.is_lollipop() {
        let (dx, anchor) = if bar.value_side == Side::Left {
            (-LOLLIPOP_LABEL_OFFSET, TextAnchor::End)
        } else {
            (LOLLIPOP_LABEL_OFFSET, TextAnchor::Start)
        };
        return Some(LabelGeometry {
            kind: LabelKind::Value,
            text,
            position: Point::new(bar.value_end() + dx, bar.center().y),
            anchor,
            baseline: TextBaseline::Middle,
            color: Color::BLACK,
            opacity: bar.opacity,
            row_index: bar.row_index,
            series_key: Some(bar.series_key.clone()),
        });
    }

    Some(at_value_end(bar, text, width, LabelKind::Value))
}

/// Computes category labels for horizontal charts.
///
/// - `BelowBar`: under each group, starting near the plot's left edge.
///   Suppressed by `yAxis.hideLabel`.
/// - `OnAxis`: right-aligned just left of the plot, centred on the slot.
/// - `OnBar`: at the value end of the row's longest bar, under the fit check.
///
/// Vertical charts return nothing.
pub fn category_labels(
    config: &ChartConfig,
    view: &DataView<'_>,
    slots: CategorySlots,
    bars: &[BarGeometry],
    measurer: &dyn TextMeasurer,
) -> Vec<LabelGeometry> {
    if !config.is_horizontal() {
        return Vec::new();
    }
    let Some(placement) = config.label_placement() else {
        return Vec::new();
    };
    let plain = |row_index: usize, text: String, position: Point, anchor, baseline| {
        LabelGeometry {
            kind: LabelKind::Category,
            text,
            position,
            anchor,
            baseline,
            color: Color::BLACK,
            opacity: 1.0,
            row_index,
            series_key: None,
        }
    };

    match placement {
        LabelPlacement::BelowBar if config.y_axis.hide_label => Vec::new(),
        LabelPlacement::BelowBar => {
            let x = if config.y_axis.hide_axis { 0.0 } else { LABEL_PADDING };
            view.rows()
                .enumerate()
                .map(|(row_index, row)| {
                    let y = if config.is_stacked() {
                        slots.group_start(row_index) + slots.bar_thickness * 1.2
                    } else {
                        slots.group_start(row_index)
                            + slots.group_thickness(bars_per_group(config))
                            + BELOW_BAR_GAP
                    };
                    plain(
                        row_index,
                        category_text(config, row),
                        Point::new(x, y),
                        TextAnchor::Start,
                        TextBaseline::Hanging,
                    )
                })
                .collect()
        }
        LabelPlacement::OnAxis => view
            .rows()
            .enumerate()
            .map(|(row_index, row)| {
                let group = slots.group_thickness(bars_per_group(config));
                let y = slots.group_start(row_index) + group / 2.0;
                plain(
                    row_index,
                    category_text(config, row),
                    Point::new(-LABEL_PADDING, y),
                    TextAnchor::End,
                    TextBaseline::Middle,
                )
            })
            .collect(),
        LabelPlacement::OnBar => {
            let style = label_style(config);
            view.rows()
                .enumerate()
                .filter_map(|(row_index, row)| {
                    let longest = bars
                        .iter()
                        .filter(|b| b.row_index == row_index)
                        .max_by(|a, b| a.length().total_cmp(&b.length()))?;
                    let text = category_text(config, row);
                    let width = measurer.text_width(&text, &style);
                    Some(at_value_end(longest, text, width, LabelKind::Category))
                })
                .collect()
        }
    }
}
