// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration for Cove.
//!
//! A [`ChartConfig`] is the user's intent: chart type, axes, series, styling.
//! It is loaded leniently from the JSON the authoring tool stores, and every
//! change goes through one deterministic normalization pass
//! ([`ChartConfig::normalize`]) that coerces incompatible options and rebuilds
//! the derived [`RuntimeConfig`].
//!
//! The editor surface is [`ChartConfig::update_field`] plus a few list edits
//! (series, exclusions, filters). Text-field edits can be debounced with
//! [`FieldDebouncer`] or an [`EditorSession`].
//!
//! Layout values computed from a configuration (plot height for horizontal
//! bars, for instance) are never written back into it.

#![no_std]

extern crate alloc;

mod de;
mod debounce;
mod editor;
mod error;
mod normalize;
mod runtime;
mod schema;

pub use debounce::{DEFAULT_DEBOUNCE, EditorSession, FieldDebouncer, PendingEdit};
pub use editor::FieldPath;
pub use error::{ConfigError, ConfigResult};
pub use normalize::normalize;
pub use runtime::{AxisRole, RuntimeConfig};
pub use schema::{
    Axis, AxisType, BarStyle, ChartConfig, ConfidenceKeys, DataDescription, DataFormat,
    Exclusions, Filter, FilterOrder, FontSize, LabelPlacement, Legend, LegendBehavior,
    LegendPosition, LollipopColorStyle, LollipopShape, LollipopSize, Orientation, Padding,
    Region, RoundingStyle, Series, SeriesType, SubType, TipRounding, VisualizationType,
};
