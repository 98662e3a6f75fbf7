// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart geometry for Cove.
//!
//! Given a normalized [`cove_config::ChartConfig`] and a dataset, this crate
//! computes everything a renderer needs and nothing more:
//! - **Scales** map data values into plot coordinates, with the value domain
//!   resolved from the data and the axis configuration.
//! - **Bars** (grouped, stacked, horizontal, lollipop) with corner rounding,
//!   borders, colors and highlight dimming.
//! - **Labels** with inside/outside placement and contrast colors.
//! - **Tooltips** as plain lines of text.
//! - Paired bars, line series, confidence whiskers, date regions and axis ticks.
//!
//! [`Chart`] runs all of it in one call. The individual functions are public
//! for renderers that only need part of the picture.
//!
//! Drawing, palettes and text shaping are out of scope: colors come from a
//! [`Palette`], and label widths from a [`cove_text::TextMeasurer`].

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod axis;
mod bar;
mod chart;
mod color;
mod confidence;
mod corner;
mod domain;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod label;
mod layout;
mod line;
mod lollipop;
mod paired;
mod palette;
mod regions;
mod scale;
mod stack;
#[cfg(test)]
mod stacked_tests;
mod tooltip;
mod view;

pub use axis::{AxisTick, DEFAULT_TICK_COUNT, category_ticks, value_ticks};
pub use bar::{
    BAR_BORDER_WIDTH, BarGeometry, CategorySlots, DIMMED_OPACITY, LOLLIPOP_BELOW_BAR_SPACE,
    bar_geometry, horizontal_extent,
};
pub use chart::{Chart, ChartGeometry};
pub use color::{
    LAB_STEP, LABEL_CONTRAST_THRESHOLD, brighten, contrast_ratio, label_color, parse_css_color,
    relative_luminance,
};
pub use confidence::{
    WHISKER_COLOR, WHISKER_STROKE_WIDTH, WHISKER_TICK, Whisker, confidence_whiskers,
};
pub use corner::{Side, bar_radii, corner_radius, side_radii};
pub use domain::value_domain;
pub use format::NumberFormat;
pub use label::{
    BELOW_BAR_GAP, LABEL_FIT_RATIO, LABEL_PADDING, LOLLIPOP_LABEL_OFFSET, LabelGeometry,
    LabelKind, STACK_LABEL_MARGIN, TextAnchor, TextBaseline, category_labels, fits_inside,
    label_style, value_labels,
};
pub use layout::{CHART_WIDTH_WITH_LEGEND, PlotLayout, Viewport, plot_layout};
pub use line::{LineGeometry, LinePoint, category_positions, line_geometry, time_scale};
pub use lollipop::{LollipopHead, LollipopMetrics, stem_color};
pub use paired::{PAIRED_BAND_PADDING, PAIRED_INSIDE_LABEL_WIDTH, PairedBars, paired_bars};
pub use palette::{OrdinalPalette, Palette, color_domain};
pub use regions::{
    REGION_LABEL_OFFSET, REGION_OPACITY, REGION_TICK, RegionGeometry, region_geometry,
};
pub use scale::{ScaleBand, ScaleLinear, ScalePoint, ScaleTime, nice_ticks};
pub use tooltip::{Tooltip, TooltipLine, bar_tooltip, category_text};
pub use view::data_program;
