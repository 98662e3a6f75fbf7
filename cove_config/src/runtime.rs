// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived runtime fields.

use alloc::string::String;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use hashbrown::HashMap;

use crate::{ChartConfig, SeriesType, VisualizationType};

/// Which configured axis a drawn axis shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisRole {
    /// The category (`xAxis`) settings.
    #[default]
    Category,
    /// The value (`yAxis`) settings.
    Value,
}

/// Fields derived from the rest of a [`ChartConfig`].
///
/// Rebuilt from scratch on every normalization; never deserialized or persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuntimeConfig {
    /// All series data keys in declaration order.
    pub series_keys: Vec<String>,
    /// Series drawn as bars.
    pub bar_series_keys: Vec<String>,
    /// Series drawn as lines.
    pub line_series_keys: Vec<String>,
    /// Display label per series key.
    pub series_labels: HashMap<String, String>,
    /// Stable identifier for this chart's DOM/SVG ids.
    pub unique_id: u64,
    /// Bars grow horizontally.
    pub horizontal: bool,
    /// Axis drawn on the left edge.
    pub left_axis: AxisRole,
    /// Axis drawn on the bottom edge.
    pub bottom_axis: AxisRole,
    /// Effective width of the left axis (0 when hidden).
    pub left_axis_size: f64,
    /// Effective height of the bottom axis (0 when hidden).
    pub bottom_axis_size: f64,
}

impl RuntimeConfig {
    pub(crate) fn build(config: &ChartConfig) -> Self {
        let series_keys: Vec<String> = config.series.iter().map(|s| s.data_key.clone()).collect();

        let (bar_series_keys, line_series_keys) = match config.visualization_type {
            VisualizationType::Bar | VisualizationType::PairedBar => {
                (series_keys.clone(), Vec::new())
            }
            VisualizationType::Line => (Vec::new(), series_keys.clone()),
            VisualizationType::Combo => {
                let (bars, lines): (Vec<_>, Vec<_>) = config
                    .series
                    .iter()
                    .partition(|s| s.series_type == SeriesType::Bar);
                (
                    bars.into_iter().map(|s| s.data_key.clone()).collect(),
                    lines.into_iter().map(|s| s.data_key.clone()).collect(),
                )
            }
        };

        let series_labels = config
            .series
            .iter()
            .map(|s| {
                let label = s
                    .label
                    .clone()
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| s.data_key.clone());
                (s.data_key.clone(), label)
            })
            .collect();

        let horizontal = config.is_horizontal();
        let (left_axis, bottom_axis) = if horizontal {
            (AxisRole::Category, AxisRole::Value)
        } else {
            (AxisRole::Value, AxisRole::Category)
        };
        let size_of = |role: AxisRole| {
            let axis = match role {
                AxisRole::Category => &config.x_axis,
                AxisRole::Value => &config.y_axis,
            };
            if axis.hide_axis { 0.0 } else { axis.size }
        };

        Self {
            unique_id: unique_id(config),
            left_axis_size: size_of(left_axis),
            bottom_axis_size: size_of(bottom_axis),
            series_keys,
            bar_series_keys,
            line_series_keys,
            series_labels,
            horizontal,
            left_axis,
            bottom_axis,
        }
    }

    /// Returns the display label for `key` (the key itself when unknown).
    pub fn series_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.series_labels.get(key).map_or(key, String::as_str)
    }

    /// Returns `true` if `key` is drawn as bars.
    pub fn is_bar_series(&self, key: &str) -> bool {
        self.bar_series_keys.iter().any(|k| k == key)
    }
}

/// FNV-1a. Ids must match across processes, and hashbrown's default hasher
/// is randomly seeded.
struct Fnv1a(u64);

impl Default for Fnv1a {
    fn default() -> Self {
        Self(0xcbf2_9ce4_8422_2325)
    }
}

impl Hasher for Fnv1a {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= u64::from(b);
            self.0 = self.0.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
}

/// Hashes the chart's identifying fields.
fn unique_id(config: &ChartConfig) -> u64 {
    let mut hasher = Fnv1a::default();
    config.title.hash(&mut hasher);
    config.visualization_type.as_str().hash(&mut hasher);
    config.x_axis.data_key.hash(&mut hasher);
    for s in &config.series {
        s.data_key.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, Series, SubType};
    use alloc::vec;

    #[test]
    fn combo_splits_series_by_type() {
        let mut config = ChartConfig::new(VisualizationType::Combo);
        config.series = vec![Series::bar("a"), Series::line("b").with_label("Bee")];
        config.normalize();
        let rt = &config.runtime;
        assert_eq!(rt.bar_series_keys, ["a"]);
        assert_eq!(rt.line_series_keys, ["b"]);
        assert_eq!(rt.series_label("b"), "Bee");
        assert_eq!(rt.series_label("a"), "a");
        assert_eq!(rt.series_label("zzz"), "zzz");
    }

    #[test]
    fn horizontal_swaps_drawn_axes() {
        let mut config = ChartConfig::new(VisualizationType::Bar);
        config.visualization_sub_type = SubType::Horizontal;
        config.y_axis.hide_axis = true;
        config.normalize();
        let rt = &config.runtime;
        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(rt.left_axis, AxisRole::Category);
        assert_eq!(rt.left_axis_size, 75.0);
        assert_eq!(rt.bottom_axis_size, 0.0);
    }

    #[test]
    fn unique_id_is_stable_and_content_sensitive() {
        let a = ChartConfig::new(VisualizationType::Bar);
        let mut b = a.clone();
        b.normalize();
        assert_eq!(a.runtime.unique_id, b.runtime.unique_id);
        b.title = "Other".into();
        b.normalize();
        assert_ne!(a.runtime.unique_id, b.runtime.unique_id);
    }

    #[test]
    fn unique_id_is_fnv1a_of_the_identifying_fields() {
        let mut c = ChartConfig::new(VisualizationType::Bar);
        c.title = "T".into();
        c.normalize();
        // Each field is its bytes followed by a 0xff terminator.
        let mut expected: u64 = 0xcbf2_9ce4_8422_2325;
        for b in b"T\xffBar\xff\xff" {
            expected ^= u64::from(*b);
            expected = expected.wrapping_mul(0x0000_0100_0000_01b3);
        }
        assert_eq!(c.runtime.unique_id, expected);
    }
}
