// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `cove_charts`.
//!
//! Writes `cove_charts_demo.html`, one SVG per chart kind. Set `RUST_LOG=debug`
//! to see the geometry engine's log lines.

mod html;
mod svg;

use std::error::Error;
use std::time::Duration;

use cove_charts::{Chart, OrdinalPalette, Viewport, color_domain, data_program, label_style};
use cove_config::{ChartConfig, EditorSession, FieldPath};
use cove_data::Dataset;
use peniko::Color;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const PALETTE: [Color; 6] = [
    Color::from_rgb8(0x00, 0x5e, 0xaa),
    Color::from_rgb8(0x88, 0xc3, 0xea),
    Color::from_rgb8(0xfc, 0xad, 0x90),
    Color::from_rgb8(0xf5, 0x3e, 0x29),
    Color::from_rgb8(0x2e, 0x7d, 0x32),
    Color::from_rgb8(0xff, 0xd5, 0x4f),
];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let sections = vec![
        grouped_demo()?,
        stacked_demo()?,
        horizontal_demo()?,
        lollipop_demo()?,
        paired_demo()?,
        line_regions_demo()?,
        combo_demo()?,
        editor_demo()?,
    ];

    let html = html::render_report("Cove charts demo", &sections);
    std::fs::write("cove_charts_demo.html", html)?;
    tracing::info!(charts = sections.len(), "wrote cove_charts_demo.html");
    Ok(())
}

fn render(
    title: &'static str,
    config: &ChartConfig,
    data: &Dataset,
    width: f64,
) -> html::HtmlSection {
    let view = data_program(config).apply(data);
    let palette = OrdinalPalette::new(PALETTE).with_domain(color_domain(config, &view));
    let measurer = demo_measurer();
    let geometry = Chart::new(config, &palette)
        .with_viewport(Viewport::new(width, false))
        .with_measurer(measurer.as_ref())
        .compute_view(&view);
    let notes = geometry
        .tooltips
        .iter()
        .take(3)
        .map(|t| t.to_string().replace('\n', " | "))
        .collect();
    html::HtmlSection {
        title,
        notes,
        svg: svg::to_svg_string(
            &geometry,
            label_style(config).font_size,
            config.is_horizontal(),
        ),
    }
}

fn demo_measurer() -> Box<dyn cove_text::TextMeasurer> {
    #[cfg(feature = "parley")]
    {
        Box::new(cove_text_parley::ParleyTextMeasurer::new())
    }

    #[cfg(not(feature = "parley"))]
    {
        Box::new(cove_text::HeuristicTextMeasurer)
    }
}

fn config(value: Value) -> Result<ChartConfig, Box<dyn Error>> {
    Ok(ChartConfig::from_value(value)?)
}

fn data(value: Value) -> Result<Dataset, Box<dyn Error>> {
    Ok(Dataset::from_value(value)?)
}

fn state_rates() -> Result<Dataset, Box<dyn Error>> {
    data(json!([
        { "State": "Ohio", "Rate": 12.5, "Prior": 10.1, "Upper": 14.0, "Lower": 11.0 },
        { "State": "Texas", "Rate": 8.25, "Prior": 9.5, "Upper": 9.9, "Lower": 6.8 },
        { "State": "Maine", "Rate": -3.0, "Prior": 1.2, "Upper": -1.0, "Lower": -4.5 },
        { "State": "Utah", "Rate": "n/a", "Prior": 4.4 },
        { "State": "Iowa", "Rate": 5.75, "Prior": 6.0, "Upper": 7.0, "Lower": 4.0 }
    ]))
}

fn grouped_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "type": "chart",
        "visualizationType": "Bar",
        "barStyle": "rounded",
        "roundingStyle": "standard",
        "labels": true,
        "height": 320,
        "xAxis": { "dataKey": "State", "size": 40, "label": "State" },
        "yAxis": { "label": "Rate", "size": 50, "numTicks": 6 },
        "series": [
            { "dataKey": "Rate", "type": "Bar" },
            { "dataKey": "Prior", "type": "Bar", "label": "Prior year" }
        ],
        "dataFormat": { "roundTo": 1, "suffix": "%" }
    }))?;
    Ok(render("Grouped bars with negatives", &config, &state_rates()?, 640.0))
}

fn stacked_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Bar",
        "visualizationSubType": "stacked",
        "barStyle": "rounded",
        "tipRounding": "full",
        "labels": true,
        "height": 320,
        "xAxis": { "dataKey": "Quarter", "size": 40 },
        "yAxis": { "size": 50 },
        "series": [
            { "dataKey": "North", "type": "Bar" },
            { "dataKey": "South", "type": "Bar" },
            { "dataKey": "West", "type": "Bar" }
        ],
        "dataFormat": { "commas": true }
    }))?;
    let data = data(json!([
        { "Quarter": "Q1", "North": 1200, "South": 800, "West": 450 },
        { "Quarter": "Q2", "North": 1350, "South": 950, "West": 300 },
        { "Quarter": "Q3", "North": 900, "South": 1100, "West": 700 },
        { "Quarter": "Q4", "North": 1500, "South": 600, "West": 820 }
    ]))?;
    Ok(render("Stacked bars", &config, &data, 640.0))
}

fn horizontal_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Bar",
        "orientation": "horizontal",
        "barHeight": 28,
        "barSpace": 12,
        "barHasBorder": "true",
        "xAxis": { "dataKey": "State", "size": 30 },
        "yAxis": {
            "size": 80,
            "labelPlacement": "On Bar",
            "displayNumbersOnBar": true
        },
        "series": [ { "dataKey": "Rate", "type": "Bar" } ],
        "confidenceKeys": { "upper": "Upper", "lower": "Lower" },
        "legend": { "hide": true },
        "dataFormat": { "roundTo": 2 }
    }))?;
    Ok(render("Horizontal bars, labels on bar, confidence whiskers", &config, &state_rates()?, 640.0))
}

fn lollipop_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Bar",
        "barStyle": "lollipop",
        "lollipopShape": "circle",
        "lollipopSize": "large",
        "lollipopColorStyle": "two-tone",
        "labels": true,
        "height": 280,
        "xAxis": { "dataKey": "State", "size": 40 },
        "yAxis": { "size": 50 },
        "series": [ { "dataKey": "Prior", "type": "Bar" } ],
        "legend": { "hide": true }
    }))?;
    Ok(render("Lollipops", &config, &state_rates()?, 560.0))
}

fn paired_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Paired Bar",
        "height": 300,
        "xAxis": { "dataKey": "Age" },
        "series": [
            { "dataKey": "Male", "type": "Bar" },
            { "dataKey": "Female", "type": "Bar" }
        ],
        "dataDescription": { "seriesKey": "Sex", "xKey": "Age", "valueKey": "Count" },
        "legend": { "position": "bottom" },
        "dataFormat": { "commas": true }
    }))?;
    let data = data(json!([
        { "Age": "0-19", "Male": 2100, "Female": 1990 },
        { "Age": "20-39", "Male": 2650, "Female": 2580 },
        { "Age": "40-59", "Male": 2400, "Female": 2480 },
        { "Age": "60+", "Male": 1500, "Female": 1900 }
    ]))?;
    Ok(render("Paired bars", &config, &data, 640.0))
}

fn weekly_cases() -> Result<Dataset, Box<dyn Error>> {
    data(json!([
        { "Week": "2024-01-07", "Cases": 120, "Average": 110 },
        { "Week": "2024-01-14", "Cases": 180, "Average": 140 },
        { "Week": "2024-01-21", "Cases": 260, "Average": 190 },
        { "Week": "2024-01-28", "Cases": 210, "Average": 215 },
        { "Week": "2024-02-04", "Cases": 150, "Average": 200 },
        { "Week": "2024-02-11", "Cases": 90, "Average": 150 }
    ]))
}

fn line_regions_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Line",
        "height": 300,
        "xAxis": {
            "dataKey": "Week",
            "type": "date",
            "dateParseFormat": "%Y-%m-%d",
            "dateDisplayFormat": "%b %d",
            "size": 40
        },
        "yAxis": { "size": 50 },
        "series": [
            { "dataKey": "Cases", "type": "Line" },
            { "dataKey": "Average", "type": "Line", "label": "3-week average" }
        ],
        "regions": [
            { "label": "Peak", "from": "2024-01-14", "to": "2024-01-28",
              "background": "#fcad90", "color": "#a33" }
        ],
        "legend": { "position": "bottom" }
    }))?;
    Ok(render("Lines over a date axis with a region", &config, &weekly_cases()?, 640.0))
}

fn combo_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let config = config(json!({
        "visualizationType": "Combo",
        "height": 300,
        "xAxis": { "dataKey": "Week", "size": 40 },
        "yAxis": { "size": 50 },
        "series": [
            { "dataKey": "Cases", "type": "Bar" },
            { "dataKey": "Average", "type": "Line" }
        ],
        "legend": { "position": "bottom" }
    }))?;
    Ok(render("Combo", &config, &weekly_cases()?, 640.0))
}

/// Replays editor keystrokes through a debounced session, then renders the
/// committed configuration.
fn editor_demo() -> Result<html::HtmlSection, Box<dyn Error>> {
    let initial = config(json!({
        "visualizationType": "Bar",
        "height": 300,
        "xAxis": { "dataKey": "State", "size": 40 },
        "yAxis": { "size": 50 },
        "series": [ { "dataKey": "Prior", "type": "Bar" } ],
        "legend": { "hide": true }
    }))?;
    let mut session = EditorSession::new(initial);
    let ms = Duration::from_millis;

    let thickness = FieldPath::top("barThickness");
    session.input(thickness.clone(), json!("0."), ms(0));
    session.input(thickness.clone(), json!("0.4"), ms(150));
    let early = session.tick(ms(500));
    let due = session.next_deadline();
    let applied = session.tick(ms(650));
    tracing::info!(early, applied, ?due, "debounced barThickness");

    session.commit(&FieldPath::section("yAxis", "label"), json!("Prior rate"))?;
    let mut config = session.into_config();
    config.add_exclusion("Utah");
    config.update_field(&FieldPath::section("exclusions", "active"), json!(true))?;
    if let Err(err) = config.update_field(&FieldPath::top("notAField"), json!(1)) {
        tracing::info!(%err, "unknown fields are rejected");
    }

    let mut section = render("Edited through a debounced session", &config, &state_rates()?, 560.0);
    section.notes.insert(
        0,
        format!(
            "barThickness = {} (applied {applied} edit(s) at 650 ms, {early} at 500 ms)",
            config.bar_thickness
        ),
    );
    Ok(section)
}
