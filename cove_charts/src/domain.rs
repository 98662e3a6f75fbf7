// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value-axis domain resolution.

use alloc::string::String;

use cove_config::{ChartConfig, VisualizationType};
use cove_data::{DataView, Row};

/// Returns the numeric values of `keys` in `row`, skipping missing ones.
pub(crate) fn row_values<'a>(row: &'a Row, keys: &'a [String]) -> impl Iterator<Item = f64> + 'a {
    keys.iter().filter_map(|k| row.number(k))
}

/// Returns `true` if `row` has at least one numeric value among `keys`.
pub(crate) fn has_numeric_value(row: &Row, keys: &[String]) -> bool {
    row_values(row, keys).next().is_some()
}

/// Resolves the `(min, max)` value domain for a chart.
///
/// - **min**: `yAxis.min` when set; else the smallest series value, raised to
///   0 for Bar and Combo charts when it is positive.
/// - **max**: `yAxis.max` when set; else the largest per-row stack total for
///   stacked bars, the largest upper confidence bound for other bar charts
///   with confidence columns, or the largest series value.
/// - `yAxis.paddingPercent` widens both ends by that fraction of the span.
///
/// Returns `(0.0, 0.0)` when no row has a numeric series value.
pub fn value_domain(config: &ChartConfig, view: &DataView<'_>) -> (f64, f64) {
    let keys = &config.runtime.series_keys;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut stack_min = 0.0_f64;
    let mut stack_max = 0.0_f64;
    let mut upper_max = f64::NEG_INFINITY;
    let mut any = false;

    let stacked = config.visualization_type == VisualizationType::Bar && config.is_stacked();
    let upper_key = (config.visualization_type == VisualizationType::Bar && !stacked)
        .then(|| config.confidence_keys.upper())
        .flatten();

    for row in view.rows() {
        let mut positive = 0.0;
        let mut negative = 0.0;
        for v in row_values(row, keys) {
            any = true;
            min = min.min(v);
            max = max.max(v);
            if v >= 0.0 {
                positive += v;
            } else {
                negative += v;
            }
        }
        stack_max = stack_max.max(positive);
        stack_min = stack_min.min(negative);
        if let Some(upper) = upper_key.and_then(|k| row.number(k)) {
            upper_max = upper_max.max(upper);
        }
    }

    if !any {
        tracing::debug!("no numeric series values; empty value domain");
        return (0.0, 0.0);
    }

    if stacked {
        min = min.min(stack_min);
        max = stack_max;
    } else if upper_max.is_finite() {
        max = upper_max;
    }

    if matches!(
        config.visualization_type,
        VisualizationType::Bar | VisualizationType::Combo
    ) && min > 0.0
    {
        min = 0.0;
    }

    let mut min = config.y_axis.min.unwrap_or(min);
    let mut max = config.y_axis.max.unwrap_or(max);

    if let Some(pct) = config.y_axis.padding_percent.filter(|p| *p > 0.0) {
        let pad = (max - min) * pct;
        min -= pad;
        max += pad;
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use cove_config::{ConfidenceKeys, Series, SubType};
    use cove_data::Dataset;

    fn config(ty: VisualizationType, keys: &[&str]) -> ChartConfig {
        let mut c = ChartConfig::new(ty);
        c.x_axis.data_key = "cat".into();
        c.series = keys.iter().map(|k| Series::bar(*k)).collect();
        c.normalize();
        c
    }

    #[test]
    fn negative_values_extend_the_minimum() {
        let c = config(VisualizationType::Bar, &["v"]);
        let data = Dataset::new(vec![
            Row::new().with("cat", "A").with("v", 3.0),
            Row::new().with("cat", "B").with("v", -2.0),
        ]);
        assert_eq!(value_domain(&c, &data.view()), (-2.0, 3.0));
    }

    #[test]
    fn positive_minimum_snaps_to_zero_for_bars_only() {
        let data = Dataset::new(vec![
            Row::new().with("v", 4.0),
            Row::new().with("v", 9.0),
        ]);
        let bar = config(VisualizationType::Bar, &["v"]);
        assert_eq!(value_domain(&bar, &data.view()), (0.0, 9.0));
        let line = config(VisualizationType::Line, &["v"]);
        assert_eq!(value_domain(&line, &data.view()), (4.0, 9.0));
    }

    #[test]
    fn stacked_maximum_is_the_row_total() {
        let mut c = config(VisualizationType::Bar, &["s1", "s2"]);
        c.visualization_sub_type = SubType::Stacked;
        c.normalize();
        let data = Dataset::new(vec![Row::new().with("s1", 4.0).with("s2", 6.0)]);
        assert_eq!(value_domain(&c, &data.view()), (0.0, 10.0));
    }

    #[test]
    fn upper_confidence_bound_sets_the_maximum() {
        let mut c = config(VisualizationType::Bar, &["v"]);
        c.confidence_keys = ConfidenceKeys {
            upper: "hi".into(),
            lower: "lo".into(),
        };
        let data = Dataset::new(vec![
            Row::new().with("v", 5.0).with("hi", 7.5).with("lo", 4.0),
            Row::new().with("v", 6.0).with("hi", 6.5).with("lo", 5.0),
        ]);
        assert_eq!(value_domain(&c, &data.view()), (0.0, 7.5));
    }

    #[test]
    fn overrides_and_padding() {
        let mut c = config(VisualizationType::Bar, &["v"]);
        c.y_axis.max = Some(20.0);
        c.y_axis.padding_percent = Some(0.1);
        let data = Dataset::new(vec![Row::new().with("v", 5.0)]);
        assert_eq!(value_domain(&c, &data.view()), (-2.0, 22.0));
    }

    #[test]
    fn no_numbers_gives_an_empty_domain() {
        let c = config(VisualizationType::Bar, &["v"]);
        let empty = Dataset::default();
        assert_eq!(value_domain(&c, &empty.view()), (0.0, 0.0));
        let text = Dataset::new(vec![Row::new().with("v", "n/a")]);
        assert_eq!(value_domain(&c, &text.view()), (0.0, 0.0));
    }
}
