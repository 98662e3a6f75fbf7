// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable datasets and index views over them.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashSet;
use serde_json::Value;

use crate::{DataError, Row};

/// An immutable list of rows.
///
/// Cloning is cheap; rows are shared. Filters and exclusions never mutate a
/// dataset, they produce a [`DataView`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Arc<[Row]>,
}

impl Dataset {
    /// Creates a dataset from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    /// Parses a dataset from a JSON array of objects.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Builds a dataset from an already-parsed JSON array of objects.
    pub fn from_value(value: Value) -> Result<Self, DataError> {
        let Value::Array(items) = value else {
            return Err(DataError::NotTabular);
        };
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            if !item.is_object() {
                return Err(DataError::NotTabular);
            }
            rows.push(serde_json::from_value::<Row>(item)?);
        }
        tracing::debug!(rows = rows.len(), "dataset loaded");
        Ok(Self::new(rows))
    }

    /// Returns all rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the union of column names across all rows, sorted.
    pub fn columns(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in self.rows.iter() {
            for col in row.columns() {
                if seen.insert(col) {
                    out.push(String::from(col));
                }
            }
        }
        out.sort();
        out
    }

    /// Returns a view over every row, in order.
    pub fn view(&self) -> DataView<'_> {
        DataView {
            dataset: self,
            indices: (0..self.rows.len()).collect(),
        }
    }

    /// Returns a view over the given row indices. Out-of-range indices are dropped.
    pub fn select(&self, indices: impl IntoIterator<Item = usize>) -> DataView<'_> {
        let n = self.rows.len();
        DataView {
            dataset: self,
            indices: indices.into_iter().filter(|&i| i < n).collect(),
        }
    }
}

/// A computed view: an ordered subset of a [`Dataset`]'s rows.
///
/// Positions in the view (`0..len()`) are the row indices used by geometry
/// output; [`DataView::source_index`] maps back to the dataset.
#[derive(Clone, Debug)]
pub struct DataView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> DataView<'a> {
    /// Returns the number of rows in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the view has no rows.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the row at view position `i`.
    pub fn get(&self, i: usize) -> Option<&'a Row> {
        let idx = *self.indices.get(i)?;
        let dataset: &'a Dataset = self.dataset;
        dataset.rows.get(idx)
    }

    /// Returns the dataset index of view position `i`.
    pub fn source_index(&self, i: usize) -> Option<usize> {
        self.indices.get(i).copied()
    }

    /// Iterates over the rows in view order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Row> + '_ {
        let dataset: &'a Dataset = self.dataset;
        let rows = &dataset.rows;
        self.indices.iter().filter_map(move |&i| rows.get(i))
    }

    /// Returns the display text of `column` for each row, in view order.
    pub fn labels(&self, column: &str) -> Vec<String> {
        self.rows().map(|r| r.label(column)).collect()
    }

    /// Returns the distinct display values of `column`, in first-seen order.
    pub fn distinct(&self, column: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in self.rows() {
            let label = row.label(column);
            if seen.insert(label.clone()) {
                out.push(label);
            }
        }
        out
    }

    /// Keeps only rows for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Row) -> bool) {
        let rows = &self.dataset.rows;
        self.indices.retain(|&i| rows.get(i).is_some_and(&mut keep));
    }

    /// Returns the underlying dataset.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }
}
