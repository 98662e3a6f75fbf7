// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart configuration schema.
//!
//! Field names serialize in camelCase, matching the JSON the authoring tool
//! stores. Every field is always serialized (including `null` options) so the
//! editor can tell a known-but-unset field from an unknown one.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::RuntimeConfig;
use crate::de;

/// Chart family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualizationType {
    /// Bar chart (grouped, stacked or horizontal).
    #[default]
    Bar,
    /// Line chart.
    Line,
    /// Bars and lines sharing one value axis.
    Combo,
    /// Two mirrored series around a centre line.
    #[serde(rename = "Paired Bar")]
    PairedBar,
}

impl VisualizationType {
    /// Returns the name used in stored configurations.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Line => "Line",
            Self::Combo => "Combo",
            Self::PairedBar => "Paired Bar",
        }
    }
}

/// Bar chart subtype.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubType {
    /// Side-by-side bars per category.
    #[default]
    Regular,
    /// Series drawn as segments of one bar per category.
    Stacked,
    /// Side-by-side bars, categories on the vertical axis.
    Horizontal,
}

/// Direction bars grow in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Categories along x, values along y.
    #[default]
    Vertical,
    /// Categories along y, values along x.
    Horizontal,
}

/// Where category labels go on horizontal bar charts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelPlacement {
    /// Under each bar group, reserving one font-size of space.
    #[serde(rename = "Below Bar")]
    BelowBar,
    /// Next to the category axis.
    #[serde(rename = "On Date/Category Axis", alias = "On Y-Axis")]
    OnAxis,
    /// Inside the bar, at its value end.
    #[serde(rename = "On Bar")]
    OnBar,
}

/// Bar drawing style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    /// Square corners.
    #[default]
    Flat,
    /// Rounded value-end corners.
    Rounded,
    /// Thin stem with a terminal shape.
    Lollipop,
}

/// Corner radius preset for rounded bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingStyle {
    /// 8 px.
    #[default]
    Standard,
    /// 5 px.
    Shallow,
    /// 15 px.
    Finger,
    /// No rounding.
    None,
}

/// Which corners round on rounded bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipRounding {
    /// Only the value-end corners.
    #[default]
    Top,
    /// All four corners when the bar is a single layer.
    Full,
}

/// Lollipop head shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LollipopShape {
    /// Circular head.
    #[default]
    Circle,
    /// Square head.
    Square,
}

/// Lollipop size preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LollipopSize {
    /// Stem 5 px, head 10 px.
    #[default]
    Small,
    /// Stem 6 px, head 12 px.
    Medium,
    /// Stem 7 px, head 14 px.
    Large,
}

/// Lollipop stem coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LollipopColorStyle {
    /// Stem and head share the series color.
    #[default]
    Regular,
    /// Stem is a lighter tint of the head color.
    TwoTone,
}

/// Label font size preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// 14 px.
    Small,
    /// 16 px.
    #[default]
    Medium,
    /// 18 px.
    Large,
}

/// How the category axis interprets its column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    /// Discrete categories.
    #[default]
    Categorical,
    /// Parsed dates on a continuous time scale.
    Date,
}

/// How legend clicks affect series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendBehavior {
    /// Hide series that are not selected.
    #[default]
    Isolate,
    /// Dim series that are not selected.
    Highlight,
}

/// Legend position relative to the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    /// Right of the plot.
    #[default]
    Right,
    /// Left of the plot.
    Left,
    /// Below the plot.
    Bottom,
}

/// Rendering type of one series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    /// Drawn as bars.
    #[default]
    Bar,
    /// Drawn as a line.
    Line,
}

/// Sort order of a filter's values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOrder {
    /// Ascending alphanumeric.
    #[default]
    Asc,
    /// Descending alphanumeric.
    Desc,
    /// User-arranged order.
    Cust,
}

/// Settings for one axis.
///
/// `xAxis` is the category (date) axis and `yAxis` the value axis regardless
/// of orientation; horizontal charts swap where they are drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Axis {
    /// Column holding the axis values (category axis only).
    #[serde(deserialize_with = "de::text")]
    pub data_key: String,
    /// Axis title.
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    /// Requested tick count.
    #[serde(deserialize_with = "de::opt_count")]
    pub num_ticks: Option<u32>,
    /// Space reserved for the axis, in pixels.
    #[serde(deserialize_with = "de::number")]
    pub size: f64,
    /// Hide the axis line, ticks and tick labels.
    #[serde(deserialize_with = "de::flag")]
    pub hide_axis: bool,
    /// Hide the axis title.
    #[serde(deserialize_with = "de::flag")]
    pub hide_label: bool,
    /// Category or date axis.
    #[serde(rename = "type", deserialize_with = "de::or_default")]
    pub axis_type: AxisType,
    /// strftime pattern used to parse date columns.
    #[serde(deserialize_with = "de::text")]
    pub date_parse_format: String,
    /// strftime pattern used to display dates.
    #[serde(deserialize_with = "de::text")]
    pub date_display_format: String,
    /// Explicit domain minimum.
    #[serde(deserialize_with = "de::opt_number")]
    pub min: Option<f64>,
    /// Explicit domain maximum.
    #[serde(deserialize_with = "de::opt_number")]
    pub max: Option<f64>,
    /// Fraction of the domain span added to both ends.
    #[serde(deserialize_with = "de::opt_number")]
    pub padding_percent: Option<f64>,
    /// Draw grid lines at value ticks.
    #[serde(deserialize_with = "de::flag")]
    pub grid_lines: bool,
    /// Category label placement for horizontal bars.
    #[serde(deserialize_with = "de::opt_variant")]
    pub label_placement: Option<LabelPlacement>,
    /// Draw values on horizontal bars.
    #[serde(deserialize_with = "de::flag")]
    pub display_numbers_on_bar: bool,
    /// Tooltips show the series key in place of the value-axis label.
    #[serde(deserialize_with = "de::flag")]
    pub is_legend_value: bool,
    /// Tick label rotation in degrees.
    #[serde(deserialize_with = "de::number")]
    pub tick_rotation: f64,
}

impl Axis {
    /// Default category-axis size.
    pub const CATEGORY_SIZE: f64 = 75.0;
    /// Default value-axis size.
    pub const VALUE_SIZE: f64 = 50.0;

    fn with_size(size: f64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            data_key: String::new(),
            label: String::new(),
            num_ticks: None,
            size: Self::VALUE_SIZE,
            hide_axis: false,
            hide_label: false,
            axis_type: AxisType::Categorical,
            date_parse_format: "%Y-%m-%d".into(),
            date_display_format: "%m/%d/%Y".into(),
            min: None,
            max: None,
            padding_percent: None,
            grid_lines: false,
            label_placement: None,
            display_numbers_on_bar: false,
            is_legend_value: false,
            tick_rotation: 0.0,
        }
    }
}

/// One plotted series.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Series {
    /// Column holding the series values.
    #[serde(deserialize_with = "de::text")]
    pub data_key: String,
    /// Bar or line.
    #[serde(rename = "type", deserialize_with = "de::or_default")]
    pub series_type: SeriesType,
    /// Display label (falls back to the data key).
    pub label: Option<String>,
}

impl Series {
    /// Creates a bar series for `data_key`.
    pub fn bar(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            ..Self::default()
        }
    }

    /// Creates a line series for `data_key`.
    pub fn line(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            series_type: SeriesType::Line,
            label: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Legend settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Legend {
    /// Isolate or highlight on click.
    #[serde(deserialize_with = "de::or_default")]
    pub behavior: LegendBehavior,
    /// Hide the legend.
    #[serde(deserialize_with = "de::flag")]
    pub hide: bool,
    /// Legend position.
    #[serde(deserialize_with = "de::or_default")]
    pub position: LegendPosition,
    /// Column whose values color single-series bars per row.
    #[serde(deserialize_with = "de::text")]
    pub color_code: String,
    /// List legend entries in reverse order.
    #[serde(deserialize_with = "de::flag")]
    pub reverse_label_order: bool,
    /// Legend title.
    #[serde(deserialize_with = "de::text")]
    pub label: String,
}

/// Horizontal padding around the plot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Left padding in pixels.
    #[serde(deserialize_with = "de::number")]
    pub left: f64,
    /// Right padding in pixels.
    #[serde(deserialize_with = "de::number")]
    pub right: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 5.0,
            right: 5.0,
        }
    }
}

/// Number formatting applied to values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataFormat {
    /// Insert thousands separators.
    #[serde(deserialize_with = "de::flag")]
    pub commas: bool,
    /// Fixed number of decimal places.
    #[serde(deserialize_with = "de::opt_count")]
    pub round_to: Option<u32>,
    /// Text before the number.
    #[serde(deserialize_with = "de::text")]
    pub prefix: String,
    /// Text after the number.
    #[serde(deserialize_with = "de::text")]
    pub suffix: String,
}

impl DataFormat {
    /// Largest supported number of decimal places.
    pub const MAX_ROUND_TO: u32 = 20;
}

/// Confidence interval columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceKeys {
    /// Upper bound column.
    #[serde(deserialize_with = "de::text")]
    pub upper: String,
    /// Lower bound column.
    #[serde(deserialize_with = "de::text")]
    pub lower: String,
}

impl ConfidenceKeys {
    /// Returns the upper bound column, if set.
    pub fn upper(&self) -> Option<&str> {
        Some(self.upper.as_str()).filter(|s| !s.is_empty())
    }

    /// Returns the lower bound column, if set.
    pub fn lower(&self) -> Option<&str> {
        Some(self.lower.as_str()).filter(|s| !s.is_empty())
    }

    /// Returns `true` if either bound is set.
    pub fn is_configured(&self) -> bool {
        self.upper().is_some() || self.lower().is_some()
    }
}

/// Category values (and date ranges) excluded from the chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exclusions {
    /// Whether exclusions apply.
    #[serde(deserialize_with = "de::flag")]
    pub active: bool,
    /// Excluded category values.
    pub keys: Vec<String>,
    /// First date kept on date axes.
    pub date_start: Option<String>,
    /// Last date kept on date axes.
    pub date_end: Option<String>,
}

/// A user-facing filter over one column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filter {
    /// Filtered column.
    #[serde(deserialize_with = "de::text")]
    pub column_name: String,
    /// Display label.
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    /// Selected value.
    pub active: Option<String>,
    /// Available values, in display order.
    pub values: Vec<String>,
    /// How `values` is ordered.
    #[serde(deserialize_with = "de::or_default")]
    pub order: FilterOrder,
}

/// A shaded span on a date axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    /// Label drawn inside the region.
    #[serde(deserialize_with = "de::text")]
    pub label: String,
    /// Start date (in the axis parse format).
    #[serde(deserialize_with = "de::text")]
    pub from: String,
    /// End date (in the axis parse format).
    #[serde(deserialize_with = "de::text")]
    pub to: String,
    /// Fill color.
    #[serde(deserialize_with = "de::text")]
    pub background: String,
    /// Label color.
    #[serde(deserialize_with = "de::text")]
    pub color: String,
}

/// Column roles for paired bar charts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataDescription {
    /// Column naming the series of each row.
    #[serde(deserialize_with = "de::text")]
    pub series_key: String,
    /// Column holding categories.
    #[serde(deserialize_with = "de::text")]
    pub x_key: String,
    /// Column holding values.
    #[serde(deserialize_with = "de::text")]
    pub value_key: String,
}

/// A complete chart configuration.
///
/// Construct with [`ChartConfig::new`] or deserialize with
/// [`ChartConfig::from_json`](crate::ChartConfig::from_json); both return a
/// normalized configuration. `runtime` is derived and never serialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    /// Component kind (`"chart"`).
    #[serde(rename = "type", deserialize_with = "de::text")]
    pub kind: String,
    /// Chart title.
    #[serde(deserialize_with = "de::text")]
    pub title: String,
    /// Text shown under the chart.
    #[serde(deserialize_with = "de::text")]
    pub description: String,
    /// Header theme name.
    #[serde(deserialize_with = "de::text")]
    pub theme: String,
    /// Chart family.
    #[serde(deserialize_with = "de::or_default")]
    pub visualization_type: VisualizationType,
    /// Bar subtype.
    #[serde(deserialize_with = "de::or_default")]
    pub visualization_sub_type: SubType,
    /// Bar direction.
    #[serde(deserialize_with = "de::or_default")]
    pub orientation: Orientation,
    /// Label font size.
    #[serde(deserialize_with = "de::or_default")]
    pub font_size: FontSize,
    /// Category axis.
    pub x_axis: Axis,
    /// Value axis.
    pub y_axis: Axis,
    /// Plotted series in declaration order.
    pub series: Vec<Series>,
    /// Legend settings.
    pub legend: Legend,
    /// Palette name.
    #[serde(deserialize_with = "de::text")]
    pub palette: String,
    /// Fraction of each category slot covered by its bar group, in `(0, 1]`.
    #[serde(deserialize_with = "de::number")]
    pub bar_thickness: f64,
    /// Bar thickness in pixels for horizontal charts.
    #[serde(deserialize_with = "de::number")]
    pub bar_height: f64,
    /// Gap between horizontal bar groups in pixels.
    #[serde(deserialize_with = "de::number")]
    pub bar_space: f64,
    /// Draw a 1 px border around bars.
    #[serde(deserialize_with = "de::flag")]
    pub bar_has_border: bool,
    /// Bar drawing style.
    #[serde(deserialize_with = "de::or_default")]
    pub bar_style: BarStyle,
    /// Corner radius preset.
    #[serde(deserialize_with = "de::or_default")]
    pub rounding_style: RoundingStyle,
    /// Which corners round.
    #[serde(deserialize_with = "de::or_default")]
    pub tip_rounding: TipRounding,
    /// Lollipop mode; kept in sync with `bar_style` by normalization.
    #[serde(deserialize_with = "de::flag")]
    pub is_lollipop_chart: bool,
    /// Lollipop head shape.
    #[serde(deserialize_with = "de::or_default")]
    pub lollipop_shape: LollipopShape,
    /// Lollipop size preset.
    #[serde(deserialize_with = "de::or_default")]
    pub lollipop_size: LollipopSize,
    /// Lollipop stem coloring.
    #[serde(deserialize_with = "de::or_default")]
    pub lollipop_color_style: LollipopColorStyle,
    /// Draw value labels on vertical bars.
    #[serde(deserialize_with = "de::flag")]
    pub labels: bool,
    /// Chart height in pixels (vertical charts without an aspect ratio).
    #[serde(deserialize_with = "de::number")]
    pub height: f64,
    /// Height as a fraction of width, when set.
    #[serde(deserialize_with = "de::opt_number")]
    pub aspect_ratio: Option<f64>,
    /// Horizontal padding.
    pub padding: Padding,
    /// Number formatting.
    pub data_format: DataFormat,
    /// Confidence interval columns.
    pub confidence_keys: ConfidenceKeys,
    /// Excluded categories.
    pub exclusions: Exclusions,
    /// User-facing filters.
    pub filters: Vec<Filter>,
    /// Highlighted date spans.
    pub regions: Vec<Region>,
    /// Paired bar column roles.
    pub data_description: DataDescription,
    /// Label shown for the series dimension in tooltips.
    #[serde(deserialize_with = "de::text")]
    pub series_label: String,
    /// The chart is still being set up in the editor.
    #[serde(deserialize_with = "de::flag")]
    pub new_viz: bool,
    /// Derived fields, rebuilt by normalization.
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

impl ChartConfig {
    /// Bar thickness used when the configured ratio is unset or invalid.
    pub const FALLBACK_BAR_THICKNESS: f64 = 0.8;
    /// Minimum bar height for non-lollipop horizontal bars.
    pub const MIN_BAR_HEIGHT: f64 = 25.0;

    /// Creates a normalized configuration with defaults for `visualization_type`.
    pub fn new(visualization_type: VisualizationType) -> Self {
        let mut config = Self {
            visualization_type,
            ..Self::default()
        };
        config.normalize();
        config
    }

    /// Returns `true` if bars grow horizontally.
    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Returns `true` for stacked bar charts.
    pub fn is_stacked(&self) -> bool {
        self.visualization_sub_type == SubType::Stacked
    }

    /// Returns `true` if bars draw as lollipops.
    pub fn is_lollipop(&self) -> bool {
        self.is_lollipop_chart
    }

    /// Returns the label placement for horizontal bars (`None` when unset).
    pub fn label_placement(&self) -> Option<LabelPlacement> {
        self.y_axis.label_placement
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            kind: "chart".into(),
            title: String::new(),
            description: String::new(),
            theme: "theme-blue".into(),
            visualization_type: VisualizationType::Bar,
            visualization_sub_type: SubType::Regular,
            orientation: Orientation::Vertical,
            font_size: FontSize::Medium,
            x_axis: Axis::with_size(Axis::CATEGORY_SIZE),
            y_axis: Axis::with_size(Axis::VALUE_SIZE),
            series: Vec::new(),
            legend: Legend::default(),
            palette: "qualitative-bold".into(),
            bar_thickness: 0.35,
            bar_height: Self::MIN_BAR_HEIGHT,
            bar_space: 15.0,
            bar_has_border: false,
            bar_style: BarStyle::Flat,
            rounding_style: RoundingStyle::Standard,
            tip_rounding: TipRounding::Top,
            is_lollipop_chart: false,
            lollipop_shape: LollipopShape::Circle,
            lollipop_size: LollipopSize::Small,
            lollipop_color_style: LollipopColorStyle::Regular,
            labels: false,
            height: 300.0,
            aspect_ratio: None,
            padding: Padding::default(),
            data_format: DataFormat::default(),
            confidence_keys: ConfidenceKeys::default(),
            exclusions: Exclusions::default(),
            filters: Vec::new(),
            regions: Vec::new(),
            data_description: DataDescription::default(),
            series_label: String::new(),
            new_viz: false,
            runtime: RuntimeConfig::default(),
        }
    }
}
