// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Confidence-interval whiskers for non-stacked bar charts.

use alloc::vec::Vec;

use cove_config::{ChartConfig, VisualizationType};
use cove_data::DataView;
use kurbo::{BezPath, Point};
use peniko::Color;

use crate::bar::{CategorySlots, bars_per_group};
use crate::scale::ScaleLinear;

/// Half the length of the cross ticks at each end.
pub const WHISKER_TICK: f64 = 5.0;
/// Stroke width.
pub const WHISKER_STROKE_WIDTH: f64 = 2.0;
/// Stroke color.
pub const WHISKER_COLOR: Color = Color::from_rgb8(0x33, 0x33, 0x33);

/// One whisker: a line between the bounds with a tick across each end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Whisker {
    /// Row position in the data view.
    pub row_index: usize,
    /// Position along the category axis.
    pub center: f64,
    /// Lower bound, in value-axis pixels.
    pub lower: f64,
    /// Upper bound, in value-axis pixels.
    pub upper: f64,
    /// `true` when the value axis is horizontal.
    pub horizontal: bool,
}

impl Whisker {
    fn point(&self, along: f64, value: f64) -> Point {
        if self.horizontal {
            Point::new(value, along)
        } else {
            Point::new(along, value)
        }
    }

    /// Returns the whisker as an open path.
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        for end in [self.upper, self.lower] {
            path.move_to(self.point(self.center - WHISKER_TICK, end));
            path.line_to(self.point(self.center + WHISKER_TICK, end));
        }
        path.move_to(self.point(self.center, self.upper));
        path.line_to(self.point(self.center, self.lower));
        path
    }
}

/// Computes whiskers from the `confidenceKeys` columns.
///
/// Only non-stacked bar charts with both keys set draw whiskers. Rows missing
/// either bound are skipped.
pub fn confidence_whiskers(
    config: &ChartConfig,
    view: &DataView<'_>,
    value_scale: ScaleLinear,
    slots: CategorySlots,
) -> Vec<Whisker> {
    let (Some(upper_key), Some(lower_key)) =
        (config.confidence_keys.upper(), config.confidence_keys.lower())
    else {
        return Vec::new();
    };
    if config.visualization_type != VisualizationType::Bar
        || config.is_stacked()
        || value_scale.is_degenerate()
    {
        return Vec::new();
    }
    let group = slots.group_thickness(bars_per_group(config));
    view.rows()
        .enumerate()
        .filter_map(|(row_index, row)| {
            let upper = row.number(upper_key)?;
            let lower = row.number(lower_key)?;
            Some(Whisker {
                row_index,
                center: slots.group_start(row_index) + group / 2.0,
                lower: value_scale.map(lower),
                upper: value_scale.map(upper),
                horizontal: config.is_horizontal(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use cove_config::{ConfidenceKeys, Series, SubType};
    use cove_data::{Dataset, Row};
    use kurbo::{PathEl, Shape};

    fn config() -> ChartConfig {
        let mut c = ChartConfig::new(VisualizationType::Bar);
        c.series = vec![Series::bar("v")];
        c.confidence_keys = ConfidenceKeys {
            upper: "hi".into(),
            lower: "lo".into(),
        };
        c.normalize();
        c
    }

    #[test]
    fn whiskers_span_the_bounds_at_the_group_centre() {
        let c = config();
        let data = Dataset::new(vec![
            Row::new().with("v", 5.0).with("hi", 8.0).with("lo", 2.0),
            Row::new().with("v", 5.0).with("hi", 8.0),
        ]);
        let scale = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        let slots = CategorySlots::vertical(&c, 200.0, 2);
        let w = confidence_whiskers(&c, &data.view(), scale, slots);
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].center, 50.0);
        assert_eq!(w[0].upper, 20.0);
        assert_eq!(w[0].lower, 80.0);

        let path = w[0].path();
        assert_eq!(path.elements().len(), 6);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(45.0, 20.0)));
        let bounds = path.bounding_box();
        assert_eq!(bounds.width(), 2.0 * WHISKER_TICK);
        assert_eq!(bounds.height(), 60.0);
    }

    #[test]
    fn horizontal_whiskers_are_transposed() {
        let mut c = config();
        c.orientation = cove_config::Orientation::Horizontal;
        c.normalize();
        let data = Dataset::new(vec![Row::new().with("v", 5.0).with("hi", 8.0).with("lo", 2.0)]);
        let scale = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        let w = confidence_whiskers(&c, &data.view(), scale, CategorySlots::horizontal(&c));
        let bounds = w[0].path().bounding_box();
        assert_eq!(bounds.x0, 20.0);
        assert_eq!(bounds.x1, 80.0);
        assert_eq!(bounds.height(), 2.0 * WHISKER_TICK);
    }

    #[test]
    fn stacked_and_unconfigured_charts_have_none() {
        let data = Dataset::new(vec![Row::new().with("v", 5.0).with("hi", 8.0).with("lo", 2.0)]);
        let scale = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        let mut stacked = config();
        stacked.visualization_sub_type = SubType::Stacked;
        stacked.normalize();
        let slots = CategorySlots::vertical(&stacked, 100.0, 1);
        assert!(confidence_whiskers(&stacked, &data.view(), scale, slots).is_empty());

        let mut plain = config();
        plain.confidence_keys = ConfidenceKeys::default();
        assert!(confidence_whiskers(&plain, &data.view(), scale, slots).is_empty());
    }
}
