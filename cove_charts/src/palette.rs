// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Series colors.
//!
//! Palette and theme selection happen outside the geometry engine; all it
//! needs is a pure `label -> color` function.

use alloc::string::String;
use alloc::vec::Vec;

use cove_config::ChartConfig;
use cove_data::DataView;
use peniko::Color;

/// Maps a legend label to a color.
pub trait Palette {
    /// Returns the color for `label`.
    fn color(&self, label: &str) -> Color;
}

impl<F: Fn(&str) -> Color> Palette for F {
    fn color(&self, label: &str) -> Color {
        self(label)
    }
}

/// An ordinal palette: the `i`-th domain label gets the `i`-th color,
/// cycling when there are more labels than colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrdinalPalette {
    colors: Vec<Color>,
    domain: Vec<String>,
}

impl OrdinalPalette {
    /// Creates a palette over `colors` with an empty domain.
    pub fn new(colors: impl IntoIterator<Item = Color>) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            domain: Vec::new(),
        }
    }

    /// Sets the ordered label domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.domain = domain.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the color at `index`, cycling through the colors.
    pub fn nth(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::BLACK;
        }
        self.colors[index % self.colors.len()]
    }
}

impl Palette for OrdinalPalette {
    fn color(&self, label: &str) -> Color {
        let index = self.domain.iter().position(|d| d == label).unwrap_or(0);
        self.nth(index)
    }
}

/// Returns the labels a chart colors by, in palette order.
///
/// With `legend.colorCode` set on a single-series chart, these are the
/// distinct values of that column; otherwise the series labels.
pub fn color_domain(config: &ChartConfig, view: &DataView<'_>) -> Vec<String> {
    if let Some(column) = color_code_column(config) {
        return view.distinct(column);
    }
    config
        .runtime
        .series_keys
        .iter()
        .map(|k| String::from(config.runtime.series_label(k)))
        .collect()
}

pub(crate) fn color_code_column(config: &ChartConfig) -> Option<&str> {
    let column = config.legend.color_code.as_str();
    (!column.is_empty() && config.series.len() == 1).then_some(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cove_config::{Series, VisualizationType};
    use cove_data::{Dataset, Row};

    fn colors() -> [Color; 2] {
        [Color::from_rgb8(1, 2, 3), Color::from_rgb8(4, 5, 6)]
    }

    #[test]
    fn ordinal_palette_cycles() {
        let p = OrdinalPalette::new(colors()).with_domain(["a", "b", "c"]);
        assert_eq!(p.color("a"), colors()[0]);
        assert_eq!(p.color("b"), colors()[1]);
        assert_eq!(p.color("c"), colors()[0]);
        assert_eq!(p.color("unknown"), colors()[0]);
        assert_eq!(OrdinalPalette::default().color("a"), Color::BLACK);
    }

    #[test]
    fn closures_are_palettes() {
        let red = Color::from_rgb8(255, 0, 0);
        let p = |_: &str| red;
        assert_eq!(Palette::color(&p, "x"), red);
    }

    #[test]
    fn color_code_domain_uses_column_values() {
        let mut config = ChartConfig::new(VisualizationType::Bar);
        config.series = alloc::vec![Series::bar("v").with_label("Value")];
        config.normalize();
        let data = Dataset::new(alloc::vec![
            Row::new().with("region", "North").with("v", 1.0),
            Row::new().with("region", "South").with("v", 2.0),
            Row::new().with("region", "North").with("v", 3.0),
        ]);
        assert_eq!(color_domain(&config, &data.view()), ["Value"]);
        config.legend.color_code = "region".into();
        assert_eq!(color_domain(&config, &data.view()), ["North", "South"]);
    }
}
