// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use cove_config::{
    BarStyle, ChartConfig, LegendBehavior, Orientation, Series, SubType, TipRounding,
    VisualizationType,
};
use cove_data::{Dataset, Row};
use kurbo::{Rect, RoundedRectRadii};
use peniko::Color;

use crate::{BarGeometry, CategorySlots, ScaleLinear, Side, bar_geometry, side_radii};

fn grey(_: &str) -> Color {
    Color::from_rgb8(0x80, 0x80, 0x80)
}

fn stacked() -> ChartConfig {
    let mut c = ChartConfig::new(VisualizationType::Bar);
    c.x_axis.data_key = "cat".into();
    c.series = vec![Series::bar("a"), Series::bar("b"), Series::bar("c")];
    c.visualization_sub_type = SubType::Stacked;
    c.normalize();
    c
}

fn one_row(a: f64, b: f64, c: f64) -> Dataset {
    Dataset::new(vec![
        Row::new()
            .with("cat", "x")
            .with("a", a)
            .with("b", b)
            .with("c", c),
    ])
}

fn vertical_bars(
    config: &ChartConfig,
    data: &Dataset,
    scale: ScaleLinear,
    highlighted: &[String],
) -> (Vec<BarGeometry>, CategorySlots) {
    let slots = CategorySlots::vertical(config, 100.0, data.len());
    let bars = bar_geometry(config, &data.view(), scale, slots, &grey, highlighted);
    (bars, slots)
}

fn bar<'a>(bars: &'a [BarGeometry], key: &str) -> &'a BarGeometry {
    bars.iter()
        .find(|b| b.series_key == key)
        .unwrap_or_else(|| panic!("no bar for {key}"))
}

fn assert_rect_close(a: Rect, b: Rect) {
    let eps = 1e-9;
    assert!((a.x0 - b.x0).abs() <= eps, "x0 {a:?} != {b:?}");
    assert!((a.y0 - b.y0).abs() <= eps, "y0 {a:?} != {b:?}");
    assert!((a.x1 - b.x1).abs() <= eps, "x1 {a:?} != {b:?}");
    assert!((a.y1 - b.y1).abs() <= eps, "y1 {a:?} != {b:?}");
}

#[test]
fn vertical_stacks_draw_the_last_series_first() {
    let c = stacked();
    let (bars, _) = vertical_bars(
        &c,
        &one_row(2.0, 3.0, 5.0),
        ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        &[],
    );
    let keys: Vec<&str> = bars.iter().map(|b| b.series_key.as_str()).collect();
    assert_eq!(keys, ["c", "b", "a"]);
    let layers: Vec<usize> = bars.iter().map(|b| b.stack_index).collect();
    assert_eq!(layers, [2, 1, 0]);
}

#[test]
fn horizontal_stacks_keep_declaration_order() {
    let mut c = stacked();
    c.orientation = Orientation::Horizontal;
    c.normalize();
    let data = one_row(2.0, 3.0, 5.0);
    let slots = CategorySlots::horizontal(&c);
    let scale = ScaleLinear::new((0.0, 10.0), (0.0, 200.0));
    let bars = bar_geometry(&c, &data.view(), scale, slots, &grey, &[]);
    let keys: Vec<&str> = bars.iter().map(|b| b.series_key.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c"]);
    let t = slots.bar_thickness;
    assert_rect_close(bars[0].rect(), Rect::new(0.0, 0.0, 40.0, t));
    assert_rect_close(bars[1].rect(), Rect::new(40.0, 0.0, 100.0, t));
    assert_rect_close(bars[2].rect(), Rect::new(100.0, 0.0, 200.0, t));
    assert!(bars.iter().all(|b| b.value_side == Side::Right));
}

#[test]
fn segments_add_up_to_the_scaled_total() {
    let c = stacked();
    let (bars, slots) = vertical_bars(
        &c,
        &one_row(2.0, 3.0, 5.0),
        ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        &[],
    );
    let x0 = slots.group_start(0);
    let x1 = x0 + slots.bar_thickness;
    assert_rect_close(bar(&bars, "a").rect(), Rect::new(x0, 80.0, x1, 100.0));
    assert_rect_close(bar(&bars, "b").rect(), Rect::new(x0, 50.0, x1, 80.0));
    assert_rect_close(bar(&bars, "c").rect(), Rect::new(x0, 0.0, x1, 50.0));
    let total: f64 = bars.iter().map(|b| b.height).sum();
    assert!((total - 100.0).abs() < 1e-9);
}

#[test]
fn negative_values_stack_below_zero() {
    let c = stacked();
    // Zero maps to y = 20.
    let (bars, _) = vertical_bars(
        &c,
        &one_row(2.0, -3.0, -1.0),
        ScaleLinear::new((-4.0, 2.0), (60.0, 0.0)),
        &[],
    );
    let a = bar(&bars, "a").rect();
    let b = bar(&bars, "b");
    let cc = bar(&bars, "c");
    assert!((a.y0 - 0.0).abs() < 1e-9 && (a.y1 - 20.0).abs() < 1e-9);
    assert!((b.rect().y0 - 20.0).abs() < 1e-9 && (b.rect().y1 - 50.0).abs() < 1e-9);
    assert!((cc.rect().y0 - 50.0).abs() < 1e-9 && (cc.rect().y1 - 60.0).abs() < 1e-9);
    assert_eq!(b.value_side, Side::Bottom);
    assert_eq!(bar(&bars, "a").value_side, Side::Top);
}

#[test]
fn only_the_top_layer_rounds_its_tip() {
    let mut c = stacked();
    c.bar_style = BarStyle::Rounded;
    c.normalize();
    let scale = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
    let (bars, _) = vertical_bars(&c, &one_row(2.0, 3.0, 5.0), scale, &[]);
    let square = RoundedRectRadii::from_single_radius(0.0);
    let r = crate::corner_radius(c.rounding_style);
    assert_eq!(bar(&bars, "c").radii, side_radii(Side::Top, r));
    assert_eq!(bar(&bars, "b").radii, square);
    assert_eq!(bar(&bars, "a").radii, square);

    c.tip_rounding = TipRounding::Full;
    let (bars, _) = vertical_bars(&c, &one_row(2.0, 3.0, 5.0), scale, &[]);
    assert_eq!(bar(&bars, "a").radii, side_radii(Side::Bottom, r));
    assert_eq!(bar(&bars, "b").radii, square);
}

#[test]
fn isolated_series_keep_their_stacked_position() {
    let mut c = stacked();
    c.legend.behavior = LegendBehavior::Isolate;
    let highlighted = [String::from("b")];
    let (bars, slots) = vertical_bars(
        &c,
        &one_row(2.0, 3.0, 5.0),
        ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        &highlighted,
    );
    assert_eq!(bars.len(), 1);
    let x0 = slots.group_start(0);
    assert_rect_close(
        bars[0].rect(),
        Rect::new(x0, 50.0, x0 + slots.bar_thickness, 80.0),
    );

    c.legend.behavior = LegendBehavior::Highlight;
    let (bars, _) = vertical_bars(
        &c,
        &one_row(2.0, 3.0, 5.0),
        ScaleLinear::new((0.0, 10.0), (100.0, 0.0)),
        &highlighted,
    );
    assert_eq!(bars.len(), 3);
    assert_eq!(bar(&bars, "b").opacity, 1.0);
    assert_eq!(bar(&bars, "a").opacity, crate::DIMMED_OPACITY);
}

#[test]
fn rows_without_values_keep_their_slot() {
    let c = stacked();
    let data = Dataset::new(vec![
        Row::new().with("cat", "x"),
        Row::new().with("cat", "y").with("a", 1.0),
    ]);
    let (bars, slots) = vertical_bars(&c, &data, ScaleLinear::new((0.0, 1.0), (100.0, 0.0)), &[]);
    assert!(bars.iter().all(|b| b.row_index == 1));
    assert_eq!(bar(&bars, "a").x, slots.group_start(1));
}

#[test]
fn stack_tops_read_the_row_total_above_a_raised_minimum() {
    let mut c = stacked();
    c.y_axis.min = Some(5.0);
    c.y_axis.max = Some(20.0);
    let data = one_row(4.0, 6.0, 0.0);
    let domain = crate::value_domain(&c, &data.view());
    assert_eq!(domain, (5.0, 20.0));
    let scale = ScaleLinear::new(domain, (100.0, 0.0));
    let (bars, slots) = vertical_bars(&c, &data, scale, &[]);

    let top = bars.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
    assert!((scale.invert(top) - 10.0).abs() < 1e-9, "top reads {}", scale.invert(top));

    // `a` lies entirely below the minimum; `b` is clipped to it.
    let x0 = slots.group_start(0);
    let x1 = x0 + slots.bar_thickness;
    assert_eq!(bar(&bars, "a").height, 0.0);
    assert_rect_close(bar(&bars, "b").rect(), Rect::new(x0, scale.map(10.0), x1, 100.0));
    assert!(bars.iter().all(|b| b.y >= 0.0 && b.y + b.height <= 100.0));
}
