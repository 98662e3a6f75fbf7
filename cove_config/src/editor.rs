// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Editor updates.
//!
//! The editor panel produces deltas against a configuration. Every delta goes
//! through [`ChartConfig`] methods here, which apply the change atomically and
//! then normalize, so derived fields are never edited directly.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

use serde_json::Value;

use crate::{ChartConfig, ConfigError, ConfigResult, Filter, FilterOrder, Series, VisualizationType};

/// Address of one editable field: `(section, subsection, field)`.
///
/// - no section: a top-level field (`title`),
/// - a section: a field of a nested record (`yAxis.label`),
/// - a section and an index: a field of one list element (`series[1].type`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath {
    /// Section name, or `None` for top-level fields.
    pub section: Option<String>,
    /// Element index for list sections.
    pub subsection: Option<usize>,
    /// Field name.
    pub field: String,
}

impl FieldPath {
    /// A top-level field.
    pub fn top(field: impl Into<String>) -> Self {
        Self {
            section: None,
            subsection: None,
            field: field.into(),
        }
    }

    /// A field of a nested record.
    pub fn section(section: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            subsection: None,
            field: field.into(),
        }
    }

    /// A field of one element of a list section.
    pub fn element(section: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            subsection: Some(index),
            field: field.into(),
        }
    }

    /// Reads the current value at this path from a serialized configuration.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut node = root;
        if let Some(section) = &self.section {
            node = node.get(section.as_str())?;
        }
        if let Some(index) = self.subsection {
            node = node.get(index)?;
        }
        node.get(self.field.as_str())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(section) = &self.section {
            write!(f, "{section}")?;
            if let Some(index) = self.subsection {
                write!(f, "[{index}]")?;
            }
            f.write_str(".")?;
        }
        f.write_str(&self.field)
    }
}

fn set_field(node: &mut Value, scope: &str, field: &str, value: Value) -> ConfigResult<()> {
    let slot = node
        .as_object_mut()
        .and_then(|map| map.get_mut(field))
        .ok_or_else(|| ConfigError::UnknownField {
            scope: scope.into(),
            field: field.into(),
        })?;
    *slot = value;
    Ok(())
}

fn apply_patch(root: &mut Value, path: &FieldPath, value: Value) -> ConfigResult<()> {
    let Some(section) = &path.section else {
        return set_field(root, "config", &path.field, value);
    };
    let target = root
        .get_mut(section.as_str())
        .ok_or_else(|| ConfigError::UnknownSection(section.clone()))?;
    match path.subsection {
        None => set_field(target, section, &path.field, value),
        Some(index) => {
            let Value::Array(items) = target else {
                return Err(ConfigError::NotAList(section.clone()));
            };
            let len = items.len();
            let item = items
                .get_mut(index)
                .ok_or_else(|| ConfigError::IndexOutOfRange {
                    section: section.clone(),
                    index,
                    len,
                })?;
            set_field(item, &format!("{section}[{index}]"), &path.field, value)
        }
    }
}

fn check_index(section: &str, index: usize, len: usize) -> ConfigResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(ConfigError::IndexOutOfRange {
            section: section.into(),
            index,
            len,
        })
    }
}

impl ChartConfig {
    /// Parses and normalizes a stored configuration.
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    /// Builds a normalized configuration from parsed JSON.
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let mut config: Self = serde_json::from_value(value)?;
        config.normalize();
        Ok(config)
    }

    /// Sets the field at `path` to `value`, then normalizes.
    ///
    /// The edit is atomic: on error the configuration is unchanged. Values are
    /// read with the same leniency as stored configurations, so text-field
    /// strings such as `"25"` are accepted for numeric fields.
    pub fn update_field(&mut self, path: &FieldPath, value: Value) -> ConfigResult<()> {
        let mut root = serde_json::to_value(&*self)?;
        if let Err(err) = apply_patch(&mut root, path, value) {
            tracing::warn!(%path, %err, "rejected configuration edit");
            return Err(err);
        }
        *self = Self::from_value(root)?;
        tracing::debug!(%path, "configuration field updated");
        Ok(())
    }

    /// Returns the serialized value at `path`, if the field exists.
    pub fn field_value(&self, path: &FieldPath) -> Option<Value> {
        let root = serde_json::to_value(self).ok()?;
        path.lookup(&root).cloned()
    }

    /// Appends a bar series for `data_key` (no-op if already present).
    pub fn add_series(&mut self, data_key: impl Into<String>) {
        self.series.push(Series::bar(data_key));
        self.normalize();
    }

    /// Removes the series for `data_key`. Returns `false` if it was absent.
    pub fn remove_series(&mut self, data_key: &str) -> bool {
        let Some(index) = self.series.iter().position(|s| s.data_key == data_key) else {
            return false;
        };
        self.series.remove(index);
        self.normalize();
        true
    }

    /// Moves the series at `from` to position `to` (legend/drag reordering).
    pub fn move_series(&mut self, from: usize, to: usize) -> ConfigResult<()> {
        let len = self.series.len();
        check_index("series", from, len)?;
        check_index("series", to, len)?;
        let series = self.series.remove(from);
        self.series.insert(to, series);
        self.normalize();
        Ok(())
    }

    /// Adds `key` to the excluded category values.
    pub fn add_exclusion(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.exclusions.keys.contains(&key) {
            self.exclusions.keys.push(key);
        }
        self.normalize();
    }

    /// Removes `key` from the excluded category values. Returns `false` if absent.
    pub fn remove_exclusion(&mut self, key: &str) -> bool {
        let before = self.exclusions.keys.len();
        self.exclusions.keys.retain(|k| k != key);
        let removed = self.exclusions.keys.len() != before;
        if removed {
            self.normalize();
        }
        removed
    }

    /// Appends an empty filter and returns its index.
    pub fn add_filter(&mut self) -> usize {
        self.filters.push(Filter::default());
        self.normalize();
        self.filters.len() - 1
    }

    /// Removes the filter at `index`.
    pub fn remove_filter(&mut self, index: usize) -> ConfigResult<()> {
        check_index("filters", index, self.filters.len())?;
        self.filters.remove(index);
        self.normalize();
        Ok(())
    }

    /// Sets one field of the filter at `index`.
    pub fn update_filter(&mut self, index: usize, field: &str, value: Value) -> ConfigResult<()> {
        self.update_field(&FieldPath::element("filters", index, field), value)
    }

    /// Moves a filter value from `from` to `to`.
    ///
    /// The filter switches to custom ordering and its first value becomes active.
    pub fn reorder_filter_values(
        &mut self,
        index: usize,
        from: usize,
        to: usize,
    ) -> ConfigResult<()> {
        check_index("filters", index, self.filters.len())?;
        let filter = &mut self.filters[index];
        let section = format!("filters[{index}].values");
        check_index(&section, from, filter.values.len())?;
        check_index(&section, to, filter.values.len())?;
        let value = filter.values.remove(from);
        filter.values.insert(to, value);
        filter.order = FilterOrder::Cust;
        filter.active = filter.values.first().cloned();
        self.normalize();
        Ok(())
    }

    /// Returns `true` while the chart lacks the sections needed to render.
    pub fn missing_required_sections(&self) -> bool {
        self.series.is_empty() || self.x_axis.data_key.is_empty()
    }

    /// Finishes the new-visualization flow.
    pub fn confirm_new_viz(&mut self) -> ConfigResult<()> {
        if self.missing_required_sections() {
            return Err(ConfigError::MissingRequiredSections);
        }
        self.new_viz = false;
        self.normalize();
        Ok(())
    }

    /// Replaces the configuration wholesale for a different chart type.
    ///
    /// Only the title carries over; the new chart starts the setup flow.
    pub fn replace_visualization_type(&mut self, visualization_type: VisualizationType) {
        let title = core::mem::take(&mut self.title);
        *self = Self {
            title,
            new_viz: true,
            ..Self::new(visualization_type)
        };
        self.normalize();
    }

    /// Returns the stored form: no runtime fields, and no `newViz` once complete.
    pub fn to_persisted(&self) -> ConfigResult<Value> {
        let mut value = serde_json::to_value(self)?;
        if !self.missing_required_sections()
            && let Some(map) = value.as_object_mut()
        {
            map.remove("newViz");
        }
        Ok(value)
    }

    /// Returns the stored form as JSON text.
    pub fn to_persisted_json(&self) -> ConfigResult<String> {
        let value = self.to_persisted()?;
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LabelPlacement, SeriesType, SubType};
    use serde_json::json;

    fn config() -> ChartConfig {
        let mut c = ChartConfig::new(VisualizationType::Bar);
        c.x_axis.data_key = "cat".into();
        c.add_series("a");
        c.add_series("b");
        c
    }

    #[test]
    fn top_level_update_normalizes() {
        let mut c = config();
        c.update_field(&FieldPath::top("visualizationSubType"), json!("horizontal"))
            .unwrap();
        assert!(c.is_horizontal());
        assert_eq!(c.label_placement(), Some(LabelPlacement::BelowBar));
        assert!(c.runtime.horizontal);
    }

    #[test]
    fn section_update_accepts_text_field_strings() {
        let mut c = config();
        c.update_field(&FieldPath::section("yAxis", "size"), json!("64"))
            .unwrap();
        assert_eq!(c.y_axis.size, 64.0);
        assert_eq!(c.runtime.left_axis_size, 64.0);
    }

    #[test]
    fn element_update_patches_one_series() {
        let mut c = config();
        c.update_field(&FieldPath::element("series", 1, "type"), json!("Line"))
            .unwrap();
        assert_eq!(c.series[1].series_type, SeriesType::Line);
        assert_eq!(c.series[0].series_type, SeriesType::Bar);
    }

    #[test]
    fn unknown_targets_are_rejected_atomically() {
        let mut c = config();
        let before = c.clone();
        assert_eq!(
            c.update_field(&FieldPath::top("nope"), json!(1)),
            Err(ConfigError::UnknownField {
                scope: "config".into(),
                field: "nope".into()
            })
        );
        assert_eq!(
            c.update_field(&FieldPath::section("runtime", "horizontal"), json!(true)),
            Err(ConfigError::UnknownSection("runtime".into()))
        );
        assert!(matches!(
            c.update_field(&FieldPath::element("series", 9, "type"), json!("Line")),
            Err(ConfigError::IndexOutOfRange { index: 9, len: 2, .. })
        ));
        assert_eq!(
            c.update_field(&FieldPath::element("yAxis", 0, "size"), json!(1)),
            Err(ConfigError::NotAList("yAxis".into()))
        );
        assert_eq!(c, before);
    }

    #[test]
    fn series_edits() {
        let mut c = config();
        c.add_series("a");
        assert_eq!(c.runtime.series_keys, ["a", "b"]);
        c.move_series(1, 0).unwrap();
        assert_eq!(c.runtime.series_keys, ["b", "a"]);
        assert!(c.remove_series("b"));
        assert!(!c.remove_series("b"));
        assert_eq!(c.runtime.series_keys, ["a"]);
        assert!(c.move_series(0, 3).is_err());
    }

    #[test]
    fn custom_filter_order_activates_first_value() {
        let mut c = config();
        let i = c.add_filter();
        c.update_filter(i, "values", json!(["x", "y", "z"])).unwrap();
        c.update_filter(i, "active", json!("x")).unwrap();
        c.reorder_filter_values(i, 2, 0).unwrap();
        let f = &c.filters[i];
        assert_eq!(f.values, ["z", "x", "y"]);
        assert_eq!(f.order, FilterOrder::Cust);
        assert_eq!(f.active.as_deref(), Some("z"));
        c.remove_filter(i).unwrap();
        assert!(c.filters.is_empty());
    }

    #[test]
    fn exclusion_edits() {
        let mut c = config();
        c.add_exclusion("A");
        c.add_exclusion("A");
        assert_eq!(c.exclusions.keys, ["A"]);
        assert!(c.remove_exclusion("A"));
        assert!(!c.remove_exclusion("A"));
    }

    #[test]
    fn new_viz_flow() {
        let mut c = ChartConfig::new(VisualizationType::Bar);
        c.title = "Rates".into();
        c.replace_visualization_type(VisualizationType::Line);
        assert_eq!(c.title, "Rates");
        assert!(c.new_viz);
        assert_eq!(c.confirm_new_viz(), Err(ConfigError::MissingRequiredSections));
        let stored = c.to_persisted().unwrap();
        assert_eq!(stored["newViz"], json!(true));

        c.x_axis.data_key = "cat".into();
        c.add_series("a");
        c.confirm_new_viz().unwrap();
        assert!(!c.new_viz);
    }

    #[test]
    fn persisted_form_round_trips_without_runtime() {
        let mut c = config();
        c.visualization_sub_type = SubType::Stacked;
        c.normalize();
        let text = c.to_persisted_json().unwrap();
        assert!(!text.contains("runtime"));
        assert!(!text.contains("newViz"));
        let back = ChartConfig::from_json(&text).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn field_paths_display_and_lookup() {
        let c = config();
        let path = FieldPath::element("series", 0, "dataKey");
        assert_eq!(path.to_string(), "series[0].dataKey");
        assert_eq!(c.field_value(&path), Some(json!("a")));
        assert_eq!(c.field_value(&FieldPath::top("missing")), None);
    }
}
