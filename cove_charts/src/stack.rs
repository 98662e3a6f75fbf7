// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked bars.
//!
//! Positive values stack away from zero in one direction and negative values
//! in the other, each series on top of the series declared before it.

use alloc::string::String;
use alloc::vec::Vec;

use cove_data::{DataView, Row};
use smallvec::SmallVec;

use crate::bar::{BarGeometry, BarPainter, BarSpec, CategorySlots, clamp_to_domain, value_of};
use crate::domain::has_numeric_value;
use crate::scale::ScaleLinear;

/// Data-space `(start, end)` of each series' segment in one row, in
/// declaration order.
pub(crate) type RowStack = SmallVec<[(f64, f64); 8]>;

/// Stacks the values of `keys` in `row`, starting from `base`.
pub(crate) fn stack_row(row: &Row, keys: &[String], base: f64) -> RowStack {
    let mut positive = base;
    let mut negative = base;
    keys.iter()
        .map(|key| {
            let v = value_of(row, key);
            if v >= 0.0 {
                let segment = (positive, positive + v);
                positive += v;
                segment
            } else {
                let segment = (negative + v, negative);
                negative += v;
                segment
            }
        })
        .collect()
}

pub(crate) fn stacked_bars(
    painter: &BarPainter<'_>,
    view: &DataView<'_>,
    value_scale: ScaleLinear,
    slots: CategorySlots,
) -> Vec<BarGeometry> {
    let config = painter.config;
    let keys = &config.runtime.bar_series_keys;
    let count = keys.len();

    // Stacks start at zero in data space; segments outside the domain are
    // clipped to its edges.
    let stacks: Vec<Option<RowStack>> = view
        .rows()
        .map(|row| has_numeric_value(row, keys).then(|| stack_row(row, keys, 0.0)))
        .collect();

    // Vertical stacks emit the last declared series first.
    let order: Vec<usize> = if config.is_horizontal() {
        (0..count).collect()
    } else {
        (0..count).rev().collect()
    };

    let mut out = Vec::with_capacity(view.len() * count);
    for layer in order {
        let key = &keys[layer];
        let Some(opacity) = painter.opacity(key) else {
            continue;
        };
        for (row_index, (row, stack)) in view.rows().zip(&stacks).enumerate() {
            let Some(stack) = stack else {
                continue;
            };
            let (start, end) = stack[layer];
            let value = value_of(row, key);
            let (from, to) = if value < 0.0 { (end, start) } else { (start, end) };
            out.push(painter.bar(BarSpec {
                key,
                row_index,
                series_index: layer,
                layer: Some((layer, count)),
                start: slots.group_start(row_index),
                thickness: slots.bar_thickness,
                base_px: value_scale.map(clamp_to_domain(&value_scale, from)),
                value_px: value_scale.map(clamp_to_domain(&value_scale, to)),
                value,
                opacity,
            }));
        }
    }
    out
}
