// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line series for line and combo charts.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::{AxisType, ChartConfig};
use cove_data::{DataView, DateFormat};
use kurbo::{BezPath, Point};
use peniko::Color;

use crate::bar::series_opacity;
use crate::palette::Palette;
use crate::scale::{ScaleLinear, ScalePoint, ScaleTime};

/// One vertex of a line series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePoint {
    /// Row position in the data view.
    pub row_index: usize,
    /// Position in plot coordinates.
    pub position: Point,
    /// The data value.
    pub value: f64,
}

/// One line series.
#[derive(Clone, Debug, PartialEq)]
pub struct LineGeometry {
    /// Series data key.
    pub series_key: String,
    /// Stroke color.
    pub color: Color,
    /// 1.0, or dimmed by a highlight-style legend.
    pub opacity: f32,
    /// Vertices in row order; rows without a value are left out.
    pub points: Vec<LinePoint>,
}

impl LineGeometry {
    /// Returns the polyline through the points.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        for (i, p) in self.points.iter().enumerate() {
            if i == 0 {
                path.move_to(p.position);
            } else {
                path.line_to(p.position);
            }
        }
        path
    }
}

/// Returns each row's position along a category axis `width` pixels long.
///
/// Categorical axes use a point scale with half a step of padding, which puts
/// each point at the centre of its bar slot. Date axes use [`time_scale`];
/// rows whose date does not parse get `None`.
pub fn category_positions(config: &ChartConfig, view: &DataView<'_>, width: f64) -> Vec<Option<f64>> {
    match config.x_axis.axis_type {
        AxisType::Categorical => {
            let scale = ScalePoint::new((0.0, width), view.len());
            (0..view.len()).map(|i| Some(scale.x(i))).collect()
        }
        AxisType::Date => {
            let times = row_times(config, view);
            let Some(scale) = time_scale_over(&times, width) else {
                tracing::debug!(
                    column = %config.x_axis.data_key,
                    "no parseable dates on the category axis"
                );
                return times;
            };
            times.into_iter().map(|t| t.map(|t| scale.map(t))).collect()
        }
    }
}

/// Returns the time scale of a date category axis `width` pixels long.
///
/// The domain spans the earliest to the latest parseable date in `view`.
/// Returns `None` for categorical axes or when no date parses.
pub fn time_scale(config: &ChartConfig, view: &DataView<'_>, width: f64) -> Option<ScaleTime> {
    if config.x_axis.axis_type != AxisType::Date {
        return None;
    }
    time_scale_over(&row_times(config, view), width)
}

/// Parses each row's category date into UTC milliseconds.
fn row_times(config: &ChartConfig, view: &DataView<'_>) -> Vec<Option<f64>> {
    let format = DateFormat::new(config.x_axis.date_parse_format.as_str());
    let key = config.x_axis.data_key.as_str();
    view.rows()
        .map(|row| format.parse_millis(&row.label(key)).map(|t| t as f64))
        .collect()
}

fn time_scale_over(times: &[Option<f64>], width: f64) -> Option<ScaleTime> {
    let (min, max) = times
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });
    min.is_finite().then(|| ScaleTime::new((min, max), (0.0, width)))
}

/// Computes the line series of a line or combo chart.
pub fn line_geometry(
    config: &ChartConfig,
    view: &DataView<'_>,
    value_scale: ScaleLinear,
    width: f64,
    palette: &dyn Palette,
    highlighted: &[String],
) -> Vec<LineGeometry> {
    let keys = &config.runtime.line_series_keys;
    if keys.is_empty() || value_scale.is_degenerate() {
        return Vec::new();
    }
    let positions = category_positions(config, view, width);
    keys.iter()
        .filter_map(|key| {
            let opacity = series_opacity(config, highlighted, key)?;
            let points = view
                .rows()
                .zip(&positions)
                .enumerate()
                .filter_map(|(row_index, (row, x))| {
                    let value = row.number(key)?;
                    Some(LinePoint {
                        row_index,
                        position: Point::new((*x)?, value_scale.map(value)),
                        value,
                    })
                })
                .collect();
            Some(LineGeometry {
                series_key: key.clone(),
                color: palette.color(config.runtime.series_label(key)),
                opacity,
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use cove_config::{Series, VisualizationType};
    use cove_data::{Dataset, Row};
    use kurbo::PathEl;

    fn red(_: &str) -> Color {
        Color::from_rgb8(255, 0, 0)
    }

    #[test]
    fn categorical_points_sit_at_slot_centres() {
        let mut c = ChartConfig::new(VisualizationType::Line);
        c.x_axis.data_key = "cat".into();
        c.series = vec![Series::line("v")];
        c.normalize();
        let data = Dataset::new(vec![
            Row::new().with("cat", "a").with("v", 0.0),
            Row::new().with("cat", "b"),
            Row::new().with("cat", "c").with("v", 10.0),
            Row::new().with("cat", "d").with("v", 5.0),
        ]);
        let scale = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        let lines = line_geometry(&c, &data.view(), scale, 400.0, &red, &[]);
        assert_eq!(lines.len(), 1);
        let pts: Vec<Point> = lines[0].points.iter().map(|p| p.position).collect();
        assert_eq!(
            pts,
            [
                Point::new(50.0, 100.0),
                Point::new(250.0, 0.0),
                Point::new(350.0, 50.0)
            ]
        );
        let path = lines[0].path();
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(50.0, 100.0)));
        assert_eq!(path.elements().len(), 3);
    }

    #[test]
    fn date_axes_use_a_time_scale() {
        let mut c = ChartConfig::new(VisualizationType::Line);
        c.x_axis.data_key = "date".into();
        c.x_axis.axis_type = AxisType::Date;
        c.x_axis.date_parse_format = "%Y-%m-%d".into();
        c.normalize();
        let data = Dataset::new(vec![
            Row::new().with("date", "2024-01-01"),
            Row::new().with("date", "2024-01-03"),
            Row::new().with("date", "2024-01-02"),
            Row::new().with("date", "later"),
        ]);
        let pos = category_positions(&c, &data.view(), 100.0);
        assert_eq!(pos, [Some(0.0), Some(100.0), Some(50.0), None]);
    }

    #[test]
    fn combo_charts_draw_only_line_series() {
        let mut c = ChartConfig::new(VisualizationType::Combo);
        c.series = vec![Series::bar("b"), Series::line("l")];
        c.normalize();
        let data = Dataset::new(vec![Row::new().with("b", 1.0).with("l", 2.0)]);
        let scale = ScaleLinear::new((0.0, 2.0), (100.0, 0.0));
        let lines = line_geometry(&c, &data.view(), scale, 100.0, &red, &[]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].series_key, "l");
    }
}
