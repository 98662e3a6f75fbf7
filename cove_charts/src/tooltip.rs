// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip text for bars.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use cove_config::{AxisType, ChartConfig};
use cove_data::{DateFormat, Row};

use crate::format::NumberFormat;

/// One tooltip line: an optional label and a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipLine {
    /// Text before the `": "` separator, if any.
    pub label: Option<String>,
    /// The value text.
    pub value: String,
}

impl TooltipLine {
    /// Creates a line with a label.
    pub fn labelled(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: value.into(),
        }
    }

    /// Creates a line showing just `value`.
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            label: None,
            value: value.into(),
        }
    }
}

impl fmt::Display for TooltipLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Tooltip content: lines displayed top to bottom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tooltip {
    /// The lines, in display order.
    pub lines: Vec<TooltipLine>,
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Returns the display text of a row's category.
///
/// Date axes reformat the parsed date with `dateDisplayFormat`; text that does
/// not parse is shown as-is.
pub fn category_text(config: &ChartConfig, row: &Row) -> String {
    let raw = row.label(&config.x_axis.data_key);
    if config.x_axis.axis_type != AxisType::Date || config.x_axis.date_display_format.is_empty() {
        return raw;
    }
    let parse = DateFormat::new(config.x_axis.date_parse_format.as_str());
    let display = DateFormat::new(config.x_axis.date_display_format.as_str());
    parse.reformat(&raw, &display).unwrap_or(raw)
}

/// Builds the tooltip for series `series_key` in `row`.
///
/// Lines, in order:
/// 1. the value, labelled with the series key when `yAxis.isLegendValue` is
///    set, else with `yAxis.label` when set. Without a label the line is the
///    bare value; it is never dropped;
/// 2. the category, labelled with `xAxis.label` when set;
/// 3. `seriesLabel: key`, only when `seriesLabel` is set.
pub fn bar_tooltip(
    config: &ChartConfig,
    row: &Row,
    series_key: &str,
    format: &NumberFormat,
) -> Tooltip {
    let value = format.format(row.number(series_key).unwrap_or(0.0));
    let value_line = if config.y_axis.is_legend_value {
        TooltipLine::labelled(series_key, value)
    } else if !config.y_axis.label.is_empty() {
        TooltipLine::labelled(config.y_axis.label.as_str(), value)
    } else {
        TooltipLine::bare(value)
    };

    let category = category_text(config, row);
    let category_line = if config.x_axis.label.is_empty() {
        TooltipLine::bare(category)
    } else {
        TooltipLine::labelled(config.x_axis.label.as_str(), category)
    };

    let mut lines = Vec::with_capacity(3);
    lines.push(value_line);
    lines.push(category_line);
    if !config.series_label.is_empty() {
        lines.push(TooltipLine::labelled(config.series_label.as_str(), series_key));
    }
    Tooltip { lines }
}

/// Formats `label: value`, or just `value` when `label` is empty.
pub(crate) fn labelled(label: &str, value: &str) -> String {
    if label.is_empty() {
        String::from(value)
    } else {
        format!("{label}: {value}")
    }
}
