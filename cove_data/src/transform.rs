// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row transforms producing [`DataView`]s.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::{DataView, Dataset, DateFormat, Row};

/// A row-level transform.
///
/// Transforms only select rows; they never rewrite values.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Keep rows whose `column` displays as `value` (a filter's active value).
    KeepEqual {
        /// Column to compare.
        column: String,
        /// Value to keep.
        value: String,
    },
    /// Drop rows whose `column` displays as one of `values`.
    Exclude {
        /// Column to compare.
        column: String,
        /// Values to drop.
        values: Vec<String>,
    },
    /// Keep rows whose date in `column` lies within `[start, end]` (UTC ms).
    ///
    /// Missing bounds are open. Rows whose date does not parse are dropped.
    DateRange {
        /// Date column.
        column: String,
        /// Pattern used to parse the column.
        format: DateFormat,
        /// Inclusive lower bound.
        start: Option<i64>,
        /// Inclusive upper bound.
        end: Option<i64>,
    },
}

impl Transform {
    fn keeps(&self, row: &Row, excluded: Option<&HashSet<&str>>) -> bool {
        match self {
            Self::KeepEqual { column, value } => row.label(column) == *value,
            Self::Exclude { column, .. } => {
                let label = row.label(column);
                !excluded.is_some_and(|set| set.contains(label.as_str()))
            }
            Self::DateRange {
                column,
                format,
                start,
                end,
            } => {
                let Some(t) = format.parse_millis(&row.label(column)) else {
                    return false;
                };
                start.is_none_or(|s| t >= s) && end.is_none_or(|e| t <= e)
            }
        }
    }
}

/// An ordered list of transforms applied to a dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Transforms in application order.
    pub transforms: Vec<Transform>,
}

impl Program {
    /// Creates an empty program (the identity view).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, transform: Transform) -> &mut Self {
        self.transforms.push(transform);
        self
    }

    /// Appends a transform, returning the program (builder style).
    pub fn with(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Applies all transforms, returning the surviving rows in dataset order.
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> DataView<'a> {
        let mut view = dataset.view();
        for transform in &self.transforms {
            let excluded: Option<HashSet<&str>> = match transform {
                Transform::Exclude { values, .. } => {
                    Some(values.iter().map(String::as_str).collect())
                }
                _ => None,
            };
            view.retain(|row| transform.keeps(row, excluded.as_ref()));
        }
        tracing::trace!(
            transforms = self.transforms.len(),
            kept = view.len(),
            total = dataset.len(),
            "applied data program"
        );
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Dataset {
        Dataset::from_json(
            r#"[
                {"state":"OH","date":"2024-01-01","v":1},
                {"state":"TX","date":"2024-02-01","v":2},
                {"state":"OH","date":"2024-03-01","v":3},
                {"state":"OH","date":"bad","v":4}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn empty_program_is_identity() {
        let data = sample();
        assert_eq!(Program::new().apply(&data).len(), data.len());
    }

    #[test]
    fn filters_and_exclusions_compose() {
        let data = sample();
        let program = Program::new()
            .with(Transform::KeepEqual {
                column: "state".into(),
                value: "OH".into(),
            })
            .with(Transform::Exclude {
                column: "date".into(),
                values: vec!["2024-03-01".into()],
            });
        let view = program.apply(&data);
        assert_eq!(view.labels("v"), ["1", "4"]);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_unparsable() {
        let data = sample();
        let f = DateFormat::default();
        let program = Program::new().with(Transform::DateRange {
            column: "date".into(),
            start: f.parse_millis("2024-02-01"),
            end: None,
            format: f,
        });
        assert_eq!(program.apply(&data).labels("v"), ["2", "3"]);
    }
}
