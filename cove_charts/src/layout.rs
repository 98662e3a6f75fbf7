// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart and plot-area sizing.

use cove_config::{ChartConfig, LegendPosition};
use kurbo::Rect;

use crate::bar::horizontal_extent;

/// Share of the container width left to the chart when a side legend is shown
/// on a large viewport.
pub const CHART_WIDTH_WITH_LEGEND: f64 = 0.73;

/// The container the chart is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Container width in pixels.
    pub width: f64,
    /// `true` for the large breakpoint, where legends sit beside the chart.
    pub large: bool,
    /// Container height in pixels, when the container has one.
    ///
    /// Only used by vertical charts that configure neither `height` nor
    /// `aspectRatio`. Horizontal charts size themselves from their rows.
    pub height: Option<f64>,
}

impl Viewport {
    /// Creates a viewport without a fixed height.
    pub fn new(width: f64, large: bool) -> Self {
        Self {
            width,
            large,
            height: None,
        }
    }

    /// Sets the container height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640.0, true)
    }
}

/// Chart size and the plot area inside it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlotLayout {
    /// Chart width.
    pub width: f64,
    /// Chart height.
    pub height: f64,
    /// Plot area in chart coordinates; axes sit outside it.
    pub plot: Rect,
}

impl PlotLayout {
    /// Returns the plot width.
    pub fn x_max(&self) -> f64 {
        self.plot.width()
    }

    /// Returns the plot height.
    pub fn y_max(&self) -> f64 {
        self.plot.height()
    }
}

/// Lays out a chart with `rows` categories in `viewport`.
///
/// - width: the viewport width, reduced to [`CHART_WIDTH_WITH_LEGEND`] of it
///   when a side legend is shown on a large viewport;
/// - height: `width * aspectRatio` when set, else `height`, else the viewport
///   height; horizontal bar charts use [`horizontal_extent`] plus the bottom
///   axis instead;
/// - plot: the chart minus the left axis, horizontal padding and the bottom axis.
pub fn plot_layout(config: &ChartConfig, viewport: Viewport, rows: usize) -> PlotLayout {
    let side_legend = !config.legend.hide && config.legend.position != LegendPosition::Bottom;
    let mut width = viewport.width.max(0.0);
    if side_legend && viewport.large {
        width *= CHART_WIDTH_WITH_LEGEND;
    }

    let runtime = &config.runtime;
    let height = if config.is_horizontal() {
        horizontal_extent(config, rows) + runtime.bottom_axis_size
    } else {
        config.aspect_ratio.map_or_else(
            || {
                if config.height > 0.0 {
                    config.height
                } else {
                    viewport.height.filter(|h| h.is_finite()).unwrap_or(0.0).max(0.0)
                }
            },
            |ratio| width * ratio,
        )
    };

    let x0 = runtime.left_axis_size + config.padding.left;
    let x_max = (width - runtime.left_axis_size - config.padding.left - config.padding.right).max(0.0);
    let y_max = (height - runtime.bottom_axis_size).max(0.0);
    let layout = PlotLayout {
        width,
        height,
        plot: Rect::new(x0, 0.0, x0 + x_max, y_max),
    };
    tracing::debug!(width, height, x_max, y_max, "plot layout");
    layout
}
