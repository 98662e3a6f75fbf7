// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration normalization.
//!
//! All derived and coerced fields are settled in one ordered pass. Each rule
//! only reads fields settled by earlier rules, so a second pass is a no-op.

use alloc::string::String;

use hashbrown::HashSet;

use crate::{
    BarStyle, ChartConfig, DataFormat, LabelPlacement, Orientation, RuntimeConfig, SubType,
    VisualizationType,
};

/// Returns `config` normalized.
///
/// Equivalent to calling [`ChartConfig::normalize`] on an owned value.
pub fn normalize(mut config: ChartConfig) -> ChartConfig {
    config.normalize();
    config
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

impl ChartConfig {
    /// Applies every normalization rule once, in order, and rebuilds `runtime`.
    pub fn normalize(&mut self) {
        // Horizontal subtype implies horizontal bars without vertical value labels.
        if self.visualization_sub_type == SubType::Horizontal {
            self.orientation = Orientation::Horizontal;
            self.labels = false;
        }
        if self.visualization_type != VisualizationType::Bar {
            self.orientation = Orientation::Vertical;
        }

        if self.is_horizontal() && self.y_axis.label_placement.is_none() {
            self.y_axis.label_placement = Some(LabelPlacement::BelowBar);
        }

        if self.bar_style == BarStyle::Lollipop
            && (self.is_stacked() || self.visualization_type != VisualizationType::Bar)
        {
            tracing::debug!("lollipop style is not available for this chart; using flat bars");
            self.bar_style = BarStyle::Flat;
        }

        self.is_lollipop_chart = self.bar_style == BarStyle::Lollipop;

        if !self.is_lollipop_chart
            && !(self.bar_height.is_finite() && self.bar_height >= Self::MIN_BAR_HEIGHT)
        {
            self.bar_height = Self::MIN_BAR_HEIGHT;
        }

        if !(self.bar_thickness > 0.0 && self.bar_thickness <= 1.0) {
            self.bar_thickness = Self::FALLBACK_BAR_THICKNESS;
        }
        self.bar_height = non_negative(self.bar_height);
        self.bar_space = non_negative(self.bar_space);
        self.height = non_negative(self.height);
        self.padding.left = non_negative(self.padding.left);
        self.padding.right = non_negative(self.padding.right);
        for axis in [&mut self.x_axis, &mut self.y_axis] {
            axis.size = non_negative(axis.size);
            axis.padding_percent = axis.padding_percent.map(non_negative);
            axis.min = axis.min.filter(|v| v.is_finite());
            axis.max = axis.max.filter(|v| v.is_finite());
            if !axis.tick_rotation.is_finite() {
                axis.tick_rotation = 0.0;
            }
        }
        self.aspect_ratio = self.aspect_ratio.filter(|r| r.is_finite() && *r > 0.0);
        self.data_format.round_to = self
            .data_format
            .round_to
            .map(|n| n.min(DataFormat::MAX_ROUND_TO));

        let mut seen: HashSet<String> = HashSet::new();
        self.series.retain(|s| {
            let keep = !s.data_key.is_empty() && seen.insert(s.data_key.clone());
            if !keep {
                tracing::debug!(key = %s.data_key, "dropping duplicate or empty series");
            }
            keep
        });

        self.runtime = RuntimeConfig::build(self);
    }
}
