// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paired bar charts: the first two series mirrored around the centre line.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::ChartConfig;
use cove_data::DataView;
use kurbo::{Point, RoundedRectRadii};
use peniko::Color;

use crate::bar::{BarGeometry, value_of};
use crate::color::label_color;
use crate::corner::Side;
use crate::format::NumberFormat;
use crate::label::{LabelGeometry, LabelKind, TextAnchor, TextBaseline};
use crate::palette::Palette;
use crate::scale::{ScaleBand, ScaleLinear};
use crate::tooltip::{Tooltip, TooltipLine, labelled};

/// Band padding between and around rows.
pub const PAIRED_BAND_PADDING: f64 = 0.2;
/// Bars at least this wide carry their label inside.
pub const PAIRED_INSIDE_LABEL_WIDTH: f64 = 100.0;

/// Bars, labels and tooltips of a paired bar chart.
///
/// `tooltips[i]` belongs to `bars[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairedBars {
    /// Left group first, then right group, each in row order.
    pub bars: Vec<BarGeometry>,
    /// One category label per bar.
    pub labels: Vec<LabelGeometry>,
    /// One tooltip per bar.
    pub tooltips: Vec<Tooltip>,
}

/// Lays out a paired bar chart in a `width` by `height` plot.
///
/// The first series grows left from the centre line and the second grows
/// right, both on a shared `[0, max]` scale over half the width. Rows are
/// bands with [`PAIRED_BAND_PADDING`]. Charts with fewer than two series, or
/// with no positive value, produce nothing.
pub fn paired_bars(
    config: &ChartConfig,
    view: &DataView<'_>,
    width: f64,
    height: f64,
    palette: &dyn Palette,
    format: &NumberFormat,
) -> PairedBars {
    let [first, second, ..] = config.series.as_slice() else {
        tracing::debug!("paired bars need two series");
        return PairedBars::default();
    };
    let keys = [first.data_key.as_str(), second.data_key.as_str()];
    let max = view
        .rows()
        .flat_map(|row| keys.map(|k| value_of(row, k)))
        .fold(0.0_f64, f64::max);
    let half = width / 2.0;
    let x_scale = ScaleLinear::new((0.0, max), (0.0, half));
    if x_scale.is_degenerate() {
        return PairedBars::default();
    }
    let y_scale = ScaleBand::new((0.0, height), view.len())
        .with_padding(PAIRED_BAND_PADDING, PAIRED_BAND_PADDING);
    let band = y_scale.band_width();
    let description = &config.data_description;

    let mut out = PairedBars::default();
    for (group, key) in keys.into_iter().enumerate() {
        let color = palette.color(config.runtime.series_label(key));
        for (row_index, row) in view.rows().enumerate() {
            let value = value_of(row, key);
            let w = x_scale.map(value).max(0.0);
            let y = y_scale.x(row_index);
            let inside = w >= PAIRED_INSIDE_LABEL_WIDTH;
            let (x, side, label_x, anchor) = if group == 0 {
                let label_x = if inside { half - w + 5.0 } else { half - w - 10.0 };
                let anchor = if inside { TextAnchor::Start } else { TextAnchor::End };
                (half - w, Side::Left, label_x, anchor)
            } else {
                let label_x = if inside { half + w - 10.0 } else { half + w + 10.0 };
                let anchor = if inside { TextAnchor::End } else { TextAnchor::Start };
                (half, Side::Right, label_x, anchor)
            };

            out.bars.push(BarGeometry {
                x,
                y,
                width: w,
                height: band,
                color,
                series_key: String::from(key),
                row_index,
                stack_index: group,
                radii: RoundedRectRadii::from_single_radius(0.0),
                opacity: 1.0,
                value,
                border_width: 0.0,
                value_side: side,
                lollipop: None,
            });
            out.labels.push(LabelGeometry {
                kind: LabelKind::Category,
                text: row.label(&description.x_key),
                position: Point::new(label_x, y + band / 1.5),
                anchor,
                baseline: TextBaseline::Alphabetic,
                color: if inside { label_color(color) } else { Color::BLACK },
                opacity: 1.0,
                row_index,
                series_key: Some(String::from(key)),
            });
            out.tooltips.push(Tooltip {
                lines: alloc::vec![
                    TooltipLine::bare(labelled(&description.series_key, key)),
                    TooltipLine::bare(labelled(
                        &config.x_axis.data_key,
                        &row.label(&config.x_axis.data_key)
                    )),
                    TooltipLine::bare(labelled(&description.value_key, &format.format(value))),
                ],
            });
        }
    }
    tracing::debug!(bars = out.bars.len(), max, "computed paired bars");
    out
}
