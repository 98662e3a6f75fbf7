// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The data view a chart draws: active filters and exclusions applied to the
//! dataset, without copying or mutating it.

use cove_config::{AxisType, ChartConfig};
use cove_data::{DateFormat, Program, Transform};

/// Builds the row-selection program for `config`.
///
/// In order:
/// 1. each filter with an active value keeps rows where its column equals it;
/// 2. active exclusions drop rows whose category is one of `exclusions.keys`;
/// 3. on date axes, active exclusions with `dateStart`/`dateEnd` keep rows
///    inside that inclusive range.
pub fn data_program(config: &ChartConfig) -> Program {
    let mut program = Program::new();
    for filter in &config.filters {
        if let Some(active) = filter.active.as_ref().filter(|a| !a.is_empty()) {
            program.push(Transform::KeepEqual {
                column: filter.column_name.clone(),
                value: active.clone(),
            });
        }
    }

    let exclusions = &config.exclusions;
    if !exclusions.active {
        return program;
    }
    let category = config.x_axis.data_key.clone();
    if !exclusions.keys.is_empty() {
        program.push(Transform::Exclude {
            column: category.clone(),
            values: exclusions.keys.clone(),
        });
    }
    if config.x_axis.axis_type == AxisType::Date {
        let format = DateFormat::new(config.x_axis.date_parse_format.as_str());
        let bound = |text: &Option<alloc::string::String>| {
            let text = text.as_deref()?;
            format
                .parse_millis(text)
                .or_else(|| DateFormat::default().parse_millis(text))
        };
        let (start, end) = (bound(&exclusions.date_start), bound(&exclusions.date_end));
        if start.is_some() || end.is_some() {
            program.push(Transform::DateRange {
                column: category,
                format,
                start,
                end,
            });
        }
    }
    program
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use cove_config::{Filter, VisualizationType};
    use cove_data::{Dataset, Row};

    fn data() -> Dataset {
        Dataset::new(vec![
            Row::new().with("date", "2024-01-01").with("state", "OH").with("v", 1.0),
            Row::new().with("date", "2024-02-01").with("state", "TX").with("v", 2.0),
            Row::new().with("date", "2024-03-01").with("state", "OH").with("v", 3.0),
        ])
    }

    fn config() -> ChartConfig {
        let mut c = ChartConfig::new(VisualizationType::Bar);
        c.x_axis.data_key = "date".into();
        c
    }

    #[test]
    fn active_filters_keep_matching_rows() {
        let mut c = config();
        c.filters = vec![Filter {
            column_name: "state".into(),
            active: Some("OH".into()),
            values: vec![String::from("OH"), String::from("TX")],
            ..Filter::default()
        }];
        let data = data();
        let view = data_program(&c).apply(&data);
        assert_eq!(view.labels("v"), ["1", "3"]);
    }

    #[test]
    fn exclusions_apply_only_when_active() {
        let mut c = config();
        c.exclusions.keys = vec![String::from("2024-02-01")];
        let data = data();
        assert_eq!(data_program(&c).apply(&data).len(), 3);
        c.exclusions.active = true;
        let view = data_program(&c).apply(&data);
        assert_eq!(view.len(), 2);
        assert_eq!(view.source_index(1), Some(2));
    }

    #[test]
    fn date_ranges_on_date_axes() {
        let mut c = config();
        c.x_axis.axis_type = AxisType::Date;
        c.x_axis.date_parse_format = "%Y-%m-%d".into();
        c.exclusions.active = true;
        c.exclusions.date_start = Some("2024-01-15".into());
        let data = data();
        assert_eq!(data_program(&c).apply(&data).labels("v"), ["2", "3"]);

        c.exclusions.date_end = Some("2024-02-01".into());
        assert_eq!(data_program(&c).apply(&data).labels("v"), ["2"]);
    }
}
