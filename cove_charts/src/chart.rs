// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-call chart geometry: data view, layout, scales and every mark.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::{ChartConfig, VisualizationType};
use cove_data::{DataView, Dataset};
use cove_text::{HeuristicTextMeasurer, TextMeasurer};

use crate::axis::{AxisTick, category_ticks, value_ticks};
use crate::bar::{BarGeometry, CategorySlots, bar_geometry};
use crate::confidence::{Whisker, confidence_whiskers};
use crate::domain::value_domain;
use crate::format::NumberFormat;
use crate::label::{LabelGeometry, category_labels, value_labels};
use crate::layout::{PlotLayout, Viewport, plot_layout};
use crate::line::{LineGeometry, line_geometry, time_scale};
use crate::paired::paired_bars;
use crate::palette::Palette;
use crate::regions::{RegionGeometry, region_geometry};
use crate::scale::ScaleLinear;
use crate::tooltip::{Tooltip, bar_tooltip};
use crate::view::data_program;

static HEURISTIC: HeuristicTextMeasurer = HeuristicTextMeasurer;

/// Everything a renderer needs to draw one chart.
///
/// Positions are in plot coordinates: `(0, 0)` is the top-left corner of
/// [`PlotLayout::plot`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartGeometry {
    /// Chart size and plot area.
    pub layout: PlotLayout,
    /// Resolved value domain.
    pub domain: (f64, f64),
    /// Bars, in drawing order.
    pub bars: Vec<BarGeometry>,
    /// Value and category labels.
    pub labels: Vec<LabelGeometry>,
    /// `tooltips[i]` belongs to `bars[i]`.
    pub tooltips: Vec<Tooltip>,
    /// Line series.
    pub lines: Vec<LineGeometry>,
    /// Confidence whiskers.
    pub whiskers: Vec<Whisker>,
    /// Highlighted date regions.
    pub regions: Vec<RegionGeometry>,
    /// Value-axis ticks.
    pub value_ticks: Vec<AxisTick>,
    /// Category-axis ticks.
    pub category_ticks: Vec<AxisTick>,
}

/// Computes [`ChartGeometry`] for a normalized configuration.
///
/// ```
/// use cove_charts::Chart;
/// use cove_config::{ChartConfig, Series, VisualizationType};
/// use cove_data::{Dataset, Row};
/// use peniko::Color;
///
/// let mut config = ChartConfig::new(VisualizationType::Bar);
/// config.x_axis.data_key = "cat".into();
/// config.series = vec![Series::bar("v")];
/// config.normalize();
///
/// let data = Dataset::new(vec![
///     Row::new().with("cat", "A").with("v", 3.0),
///     Row::new().with("cat", "B").with("v", -2.0),
/// ]);
/// let palette = |_: &str| Color::from_rgb8(0x00, 0x5e, 0xaa);
/// let geometry = Chart::new(&config, &palette).compute(&data);
/// assert_eq!(geometry.domain, (-2.0, 3.0));
/// assert_eq!(geometry.bars.len(), 2);
/// ```
pub struct Chart<'a> {
    config: &'a ChartConfig,
    palette: &'a dyn Palette,
    viewport: Viewport,
    measurer: &'a dyn TextMeasurer,
    highlighted: &'a [String],
}

impl core::fmt::Debug for Chart<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Chart")
            .field("viewport", &self.viewport)
            .field("highlighted", &self.highlighted)
            .finish_non_exhaustive()
    }
}

impl<'a> Chart<'a> {
    /// Creates a chart over `config`, colored by `palette`.
    pub fn new(config: &'a ChartConfig, palette: &'a dyn Palette) -> Self {
        Self {
            config,
            palette,
            viewport: Viewport::default(),
            measurer: &HEURISTIC,
            highlighted: &[],
        }
    }

    /// Sets the viewport the chart is laid out in.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Sets the text measurer used for label fitting.
    ///
    /// Defaults to [`HeuristicTextMeasurer`].
    #[must_use]
    pub fn with_measurer(mut self, measurer: &'a dyn TextMeasurer) -> Self {
        self.measurer = measurer;
        self
    }

    /// Sets the legend labels currently highlighted or isolated.
    #[must_use]
    pub fn with_highlighted(mut self, highlighted: &'a [String]) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Applies the configured filters and exclusions to `data`, then computes
    /// the geometry of the remaining rows.
    pub fn compute(&self, data: &Dataset) -> ChartGeometry {
        self.compute_view(&data_program(self.config).apply(data))
    }

    /// Computes the geometry of `view` as is.
    pub fn compute_view(&self, view: &DataView<'_>) -> ChartGeometry {
        let config = self.config;
        let layout = plot_layout(config, self.viewport, view.len());
        let format = NumberFormat::from(&config.data_format);
        let domain = value_domain(config, view);
        let (x_max, y_max) = (layout.x_max(), layout.y_max());

        let mut geometry = ChartGeometry {
            layout,
            domain,
            ..ChartGeometry::default()
        };

        if config.visualization_type == VisualizationType::PairedBar {
            let paired = paired_bars(config, view, x_max, y_max, self.palette, &format);
            geometry.bars = paired.bars;
            geometry.labels = paired.labels;
            geometry.tooltips = paired.tooltips;
            return geometry;
        }

        let (value_scale, slots) = if config.is_horizontal() {
            (
                ScaleLinear::new(domain, (0.0, x_max)),
                CategorySlots::horizontal(config),
            )
        } else {
            (
                ScaleLinear::new(domain, (y_max, 0.0)),
                CategorySlots::vertical(config, x_max, view.len()),
            )
        };

        let bars = bar_geometry(config, view, value_scale, slots, self.palette, self.highlighted);
        geometry.tooltips = bars
            .iter()
            .filter_map(|bar| {
                let row = view.get(bar.row_index)?;
                Some(bar_tooltip(config, row, &bar.series_key, &format))
            })
            .collect();
        geometry.labels = value_labels(config, &bars, &format, self.measurer);
        geometry
            .labels
            .extend(category_labels(config, view, slots, &bars, self.measurer));
        geometry.bars = bars;

        geometry.lines = line_geometry(config, view, value_scale, x_max, self.palette, self.highlighted);
        geometry.whiskers = confidence_whiskers(config, view, value_scale, slots);
        if let Some(time) = time_scale(config, view, x_max) {
            geometry.regions = region_geometry(config, &time, y_max);
        }
        geometry.value_ticks = value_ticks(config, value_scale, &format);
        if config.visualization_type == VisualizationType::Bar {
            geometry.category_ticks = category_ticks(config, view, slots);
        }

        tracing::debug!(
            rows = view.len(),
            bars = geometry.bars.len(),
            labels = geometry.labels.len(),
            lines = geometry.lines.len(),
            "computed chart geometry"
        );
        geometry
    }
}
