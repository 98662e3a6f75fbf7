// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis ticks.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::ChartConfig;
use cove_data::DataView;

use crate::bar::{CategorySlots, bars_per_group};
use crate::format::NumberFormat;
use crate::scale::ScaleLinear;
use crate::tooltip::category_text;

/// Value-axis tick count when `numTicks` is unset.
pub const DEFAULT_TICK_COUNT: usize = 5;

/// One axis tick.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Tick value (the row position for category ticks).
    pub value: f64,
    /// Position along the axis, in plot coordinates.
    pub position: f64,
    /// Tick label.
    pub label: String,
}

/// Returns value-axis ticks, formatted with `format`.
pub fn value_ticks(config: &ChartConfig, scale: ScaleLinear, format: &NumberFormat) -> Vec<AxisTick> {
    if scale.is_degenerate() {
        return Vec::new();
    }
    let count = config
        .y_axis
        .num_ticks
        .map_or(DEFAULT_TICK_COUNT, |n| n as usize);
    scale
        .ticks(count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            position: scale.map(value),
            label: format.format(value),
        })
        .collect()
}

/// Returns one category tick per row, centred on its bar group.
pub fn category_ticks(
    config: &ChartConfig,
    view: &DataView<'_>,
    slots: CategorySlots,
) -> Vec<AxisTick> {
    let group = slots.group_thickness(bars_per_group(config));
    view.rows()
        .enumerate()
        .map(|(i, row)| AxisTick {
            value: i as f64,
            position: slots.group_start(i) + group / 2.0,
            label: category_text(config, row),
        })
        .collect()
}
