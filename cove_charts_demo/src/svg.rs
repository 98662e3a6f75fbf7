// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `cove_charts_demo`.

use std::fmt::Write as _;

use cove_charts::{
    AxisTick, ChartGeometry, LabelGeometry, REGION_OPACITY, TextAnchor, TextBaseline,
    WHISKER_COLOR, WHISKER_STROKE_WIDTH,
};
use kurbo::{BezPath, Shape};
use peniko::Color;

const TICK_FONT_SIZE: f64 = 11.0;
const LINE_STROKE_WIDTH: f64 = 2.0;

/// Renders `geometry` as a standalone SVG document.
///
/// `horizontal` puts value ticks along the bottom instead of the left edge.
pub(crate) fn to_svg_string(geometry: &ChartGeometry, font_size: f64, horizontal: bool) -> String {
    let layout = &geometry.layout;
    let plot = layout.plot;
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 -20 {w} {h}" width="{w}" height="{h}" font-family="sans-serif">"#,
        w = layout.width,
        h = layout.height + 20.0,
    );
    let _ = writeln!(out, r#"<g transform="translate({} {})">"#, plot.x0, plot.y0);

    for region in &geometry.regions {
        let r = region.rect;
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height()
        );
        write_paint(&mut out, "fill", region.background, REGION_OPACITY);
        out.push_str("/>\n");
        write_path(&mut out, &region.bracket(), None, Some((region.color, 1.0)));
        write_text(
            &mut out,
            region.label_position.x,
            region.label_position.y,
            font_size,
            TextAnchor::Middle,
            TextBaseline::Hanging,
            region.color,
            1.0,
            &region.label,
        );
    }

    write_ticks(&mut out, &geometry.value_ticks, horizontal, plot.height());
    write_ticks(&mut out, &geometry.category_ticks, !horizontal, plot.height());

    for bar in &geometry.bars {
        let path = bar.rounded_rect().to_path(0.1);
        let stroke = (bar.border_width > 0.0).then_some((Color::BLACK, bar.border_width));
        write_path(&mut out, &path, Some((bar.color, bar.opacity)), stroke);
        if let Some(head) = &bar.lollipop {
            write_path(&mut out, &head.path(), Some((head.color, bar.opacity)), None);
        }
    }

    for line in &geometry.lines {
        let _ = write!(out, r#"<path d="{}" fill="none""#, line.path().to_svg());
        write_paint(&mut out, "stroke", line.color, line.opacity);
        let _ = writeln!(out, r#" stroke-width="{LINE_STROKE_WIDTH}"/>"#);
    }

    for whisker in &geometry.whiskers {
        write_path(
            &mut out,
            &whisker.path(),
            None,
            Some((WHISKER_COLOR, WHISKER_STROKE_WIDTH)),
        );
    }

    for label in &geometry.labels {
        write_label(&mut out, label, font_size);
    }

    out.push_str("</g>\n</svg>\n");
    out
}

fn write_ticks(out: &mut String, ticks: &[AxisTick], along_bottom: bool, plot_height: f64) {
    for tick in ticks {
        if along_bottom {
            write_text(
                out,
                tick.position,
                plot_height + 4.0,
                TICK_FONT_SIZE,
                TextAnchor::Middle,
                TextBaseline::Hanging,
                Color::BLACK,
                1.0,
                &tick.label,
            );
        } else {
            write_text(
                out,
                -6.0,
                tick.position,
                TICK_FONT_SIZE,
                TextAnchor::End,
                TextBaseline::Middle,
                Color::BLACK,
                1.0,
                &tick.label,
            );
        }
    }
}

fn write_label(out: &mut String, label: &LabelGeometry, font_size: f64) {
    write_text(
        out,
        label.position.x,
        label.position.y,
        font_size,
        label.anchor,
        label.baseline,
        label.color,
        label.opacity,
        &label.text,
    );
}

fn write_text(
    out: &mut String,
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    color: Color,
    opacity: f32,
    text: &str,
) {
    let anchor = match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let baseline = match baseline {
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Middle => "middle",
        TextBaseline::Hanging => "hanging",
    };
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="{baseline}""#
    );
    write_paint(out, "fill", color, opacity);
    let _ = writeln!(out, ">{}</text>", escape_xml(text));
}

fn write_path(
    out: &mut String,
    path: &BezPath,
    fill: Option<(Color, f32)>,
    stroke: Option<(Color, f64)>,
) {
    let _ = write!(out, r#"<path d="{}""#, path.to_svg());
    match fill {
        Some((color, opacity)) => write_paint(out, "fill", color, opacity),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some((color, width)) = stroke {
        write_paint(out, "stroke", color, 1.0);
        let _ = write!(out, r#" stroke-width="{width}""#);
    }
    out.push_str("/>\n");
}

fn write_paint(out: &mut String, name: &str, color: Color, opacity: f32) {
    let rgba = color.to_rgba8();
    let _ = write!(out, r##" {name}="#{:02x}{:02x}{:02x}""##, rgba.r, rgba.g, rgba.b);
    let alpha = f32::from(rgba.a) / 255.0 * opacity;
    if alpha < 1.0 {
        let _ = write!(out, r#" {name}-opacity="{alpha}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
