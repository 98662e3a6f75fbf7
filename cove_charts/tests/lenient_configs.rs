// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hand-edited configurations load leniently and never make geometry panic.

use cove_charts::{Chart, Viewport};
use cove_config::ChartConfig;
use cove_data::{Dataset, Row};
use peniko::Color;
use proptest::prelude::*;
use serde_json::{Value, json};

fn grey(_: &str) -> Color {
    Color::from_rgb8(0x80, 0x80, 0x80)
}

/// Numbers as an editor text field might deliver them.
fn numeric_text() -> impl Strategy<Value = Value> {
    prop_oneof![
        "-?[0-9]{1,7}(\\.[0-9]{1,3})?".prop_map(Value::from),
        (-1.0e6..1.0e6_f64).prop_map(Value::from),
        Just(json!("")),
        Just(json!("abc")),
        Just(json!("1e308")),
        Just(json!("-1e308")),
        Just(json!("100000")),
        Just(json!(null)),
        Just(json!({})),
    ]
}

fn one_of(options: &'static [&'static str]) -> impl Strategy<Value = Value> {
    prop::sample::select(options).prop_map(Value::from)
}

prop_compose! {
    fn value_axis()(
        num_ticks in numeric_text(),
        padding_percent in numeric_text(),
        min in numeric_text(),
        max in numeric_text(),
        placement in one_of(&["Below Bar", "On Date/Category Axis", "On Bar", "Beside"]),
    ) -> Value {
        json!({
            "numTicks": num_ticks,
            "paddingPercent": padding_percent,
            "min": min,
            "max": max,
            "labelPlacement": placement,
            "displayNumbersOnBar": true
        })
    }
}

prop_compose! {
    fn stored_config()(
        ty in one_of(&["Bar", "Line", "Combo", "Paired Bar", "Pie", ""]),
        sub in one_of(&["regular", "stacked", "horizontal", "Stacked"]),
        orientation in one_of(&["vertical", "horizontal", "diagonal"]),
        style in one_of(&["flat", "rounded", "lollipop", "3d"]),
        axis_type in one_of(&["categorical", "date", "log"]),
        lollipop_size in one_of(&["small", "large", "huge"]),
        labels in any::<bool>(),
        sizes in (numeric_text(), numeric_text(), numeric_text()),
        round_to in numeric_text(),
        y_axis in value_axis(),
    ) -> Value {
        let (bar_height, bar_thickness, height) = sizes;
        json!({
            "visualizationType": ty,
            "visualizationSubType": sub,
            "orientation": orientation,
            "barStyle": style,
            "lollipopSize": lollipop_size,
            "labels": labels,
            "barHeight": bar_height,
            "barThickness": bar_thickness,
            "height": height,
            "xAxis": {
                "dataKey": "cat",
                "type": axis_type,
                "dateParseFormat": "%Y-%m-%d"
            },
            "yAxis": y_axis,
            "series": [
                { "dataKey": "a", "type": "Bar" },
                { "dataKey": "b", "type": "Line" }
            ],
            "confidenceKeys": { "upper": "hi", "lower": "lo" },
            "regions": [ { "label": "R", "from": "2024-01-02", "to": "2024-01-01" } ],
            "dataFormat": { "roundTo": round_to, "commas": true }
        })
    }
}

fn data() -> Dataset {
    Dataset::new(vec![
        Row::new()
            .with("cat", "2024-01-01")
            .with("a", 3.0)
            .with("b", -2.0)
            .with("hi", 4.0)
            .with("lo", 1.0),
        Row::new().with("cat", "2024-01-02").with("a", -7.5).with("b", "n/a"),
        Row::new().with("cat", "not a date").with("a", 0.0),
    ])
}

proptest! {
    #[test]
    fn geometry_never_panics_on_lenient_input(
        stored in stored_config(),
        width in prop_oneof![Just(0.0), 1.0..2000.0_f64],
        large in any::<bool>(),
    ) {
        let config = ChartConfig::from_value(stored);
        prop_assert!(config.is_ok(), "{config:?}");
        let config = config.unwrap();
        let geometry = Chart::new(&config, &grey)
            .with_viewport(Viewport::new(width, large))
            .compute(&data());
        prop_assert_eq!(geometry.tooltips.len(), geometry.bars.len());
    }
}
