// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for bar geometry.

use cove_charts::{
    BarGeometry, CategorySlots, ScaleLinear, bar_geometry, label_color, parse_css_color,
    value_domain,
};
use cove_config::{ChartConfig, Orientation, Series, SubType, VisualizationType};
use cove_data::{Dataset, Row};
use peniko::Color;
use proptest::prelude::*;

const PLOT: f64 = 300.0;

fn grey(_: &str) -> Color {
    Color::from_rgb8(0x80, 0x80, 0x80)
}

fn config(keys: usize, sub_type: SubType, orientation: Orientation) -> ChartConfig {
    let mut c = ChartConfig::new(VisualizationType::Bar);
    c.x_axis.data_key = "cat".into();
    c.series = (0..keys).map(|i| Series::bar(format!("s{i}"))).collect();
    c.visualization_sub_type = sub_type;
    c.orientation = orientation;
    c.normalize();
    c
}

fn dataset(rows: &[Vec<f64>]) -> Dataset {
    Dataset::new(
        rows.iter()
            .enumerate()
            .map(|(i, values)| {
                values
                    .iter()
                    .enumerate()
                    .fold(Row::new().with("cat", format!("c{i}")), |row, (k, v)| {
                        row.with(format!("s{k}"), *v)
                    })
            })
            .collect(),
    )
}

fn vertical(config: &ChartConfig, data: &Dataset) -> (Vec<BarGeometry>, ScaleLinear) {
    let view = data.view();
    let scale = ScaleLinear::new(value_domain(config, &view), (PLOT, 0.0));
    let slots = CategorySlots::vertical(config, PLOT, view.len());
    (bar_geometry(config, &view, scale, slots, &grey, &[]), scale)
}

fn rows(keys: usize, values: impl Strategy<Value = f64> + Clone) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(values, keys), 1..6)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * PLOT
}

proptest! {
    #[test]
    fn horizontal_bars_are_transposed_vertical_bars(
        (keys, data) in (1..4_usize).prop_flat_map(|k| (Just(k), rows(k, -1000.0..1000.0_f64)))
    ) {
        let v_config = config(keys, SubType::Regular, Orientation::Vertical);
        let h_config = config(keys, SubType::Regular, Orientation::Horizontal);
        let data = dataset(&data);
        let view = data.view();
        let domain = value_domain(&v_config, &view);
        let slots = CategorySlots::vertical(&v_config, PLOT, view.len());

        let v_bars = bar_geometry(
            &v_config, &view, ScaleLinear::new(domain, (PLOT, 0.0)), slots, &grey, &[],
        );
        let h_bars = bar_geometry(
            &h_config, &view, ScaleLinear::new(domain, (0.0, PLOT)), slots, &grey, &[],
        );
        prop_assert_eq!(v_bars.len(), h_bars.len());
        for (v, h) in v_bars.iter().zip(&h_bars) {
            let (v, h) = (v.rect(), h.rect());
            prop_assert!(close(h.y0, v.x0) && close(h.y1, v.x1), "{v:?} vs {h:?}");
            prop_assert!(close(h.x0, PLOT - v.y1) && close(h.x1, PLOT - v.y0), "{v:?} vs {h:?}");
        }
    }

    #[test]
    fn horizontal_stacks_are_transposed_vertical_stacks(
        (keys, data) in (1..4_usize).prop_flat_map(|k| (Just(k), rows(k, -1000.0..1000.0_f64)))
    ) {
        let v_config = config(keys, SubType::Stacked, Orientation::Vertical);
        let h_config = config(keys, SubType::Stacked, Orientation::Horizontal);
        let data = dataset(&data);
        let view = data.view();
        let domain = value_domain(&v_config, &view);
        let slots = CategorySlots::vertical(&v_config, PLOT, view.len());

        let v_bars = bar_geometry(
            &v_config, &view, ScaleLinear::new(domain, (PLOT, 0.0)), slots, &grey, &[],
        );
        let h_bars = bar_geometry(
            &h_config, &view, ScaleLinear::new(domain, (0.0, PLOT)), slots, &grey, &[],
        );
        prop_assert_eq!(v_bars.len(), h_bars.len());
        // Vertical stacks draw layers in reverse, so match segments by position in the stack.
        for h in &h_bars {
            let v = v_bars
                .iter()
                .find(|v| v.row_index == h.row_index && v.stack_index == h.stack_index);
            prop_assert!(v.is_some(), "no vertical segment for {h:?}");
            let (v, h) = (v.unwrap().rect(), h.rect());
            prop_assert!(close(h.y0, v.x0) && close(h.y1, v.x1), "{v:?} vs {h:?}");
            prop_assert!(close(h.x0, PLOT - v.y1) && close(h.x1, PLOT - v.y0), "{v:?} vs {h:?}");
        }
    }

    #[test]
    fn non_zero_values_have_visible_bars(
        value in prop_oneof![-1.0e6..-1.0e-3_f64, 1.0e-3..1.0e6_f64]
    ) {
        let c = config(1, SubType::Regular, Orientation::Vertical);
        let data = dataset(&[vec![value]]);
        let scale = ScaleLinear::new((value.min(0.0), value.max(0.0)), (PLOT, 0.0));
        prop_assert!(!scale.is_degenerate());
        let slots = CategorySlots::vertical(&c, PLOT, 1);
        let bars = bar_geometry(&c, &data.view(), scale, slots, &grey, &[]);
        prop_assert_eq!(bars.len(), 1);
        prop_assert!(bars[0].width > 0.0);
        prop_assert!(bars[0].height > 0.0);
    }

    #[test]
    fn stacked_segments_add_up_to_the_row_total(
        (keys, data) in (1..5_usize).prop_flat_map(|k| (Just(k), rows(k, 0.0..1000.0_f64)))
    ) {
        let c = config(keys, SubType::Stacked, Orientation::Vertical);
        let data = dataset(&data);
        let (bars, scale) = vertical(&c, &data);
        for (row_index, row) in data.view().rows().enumerate() {
            let total: f64 = (0..keys).filter_map(|k| row.number(&format!("s{k}"))).sum();
            prop_assume!(total > 0.0);
            let drawn: f64 = bars
                .iter()
                .filter(|b| b.row_index == row_index)
                .map(|b| b.height)
                .sum();
            prop_assert!(close(drawn, scale.map(0.0) - scale.map(total)));
        }
    }
}

#[test]
fn negative_values_extend_the_domain_below_zero() {
    let c = config(1, SubType::Regular, Orientation::Vertical);
    let data = dataset(&[vec![3.0], vec![-2.0]]);
    let (bars, scale) = vertical(&c, &data);
    assert_eq!(value_domain(&c, &data.view()), (-2.0, 3.0));
    let zero = scale.map(0.0);
    assert_eq!(bars[1].y, zero);
    assert!(bars[1].y + bars[1].height > zero);
}

#[test]
fn stacked_domain_is_the_row_total() {
    let c = config(2, SubType::Stacked, Orientation::Vertical);
    let data = dataset(&[vec![4.0, 6.0]]);
    assert_eq!(value_domain(&c, &data.view()), (0.0, 10.0));
}

#[test]
fn label_colors_follow_contrast() {
    let yellow = parse_css_color("#FFFF00").unwrap();
    let navy = parse_css_color("#000066").unwrap();
    assert_eq!(label_color(yellow), Color::BLACK);
    assert_eq!(label_color(navy), Color::WHITE);
}
