// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw cell values and rows.

use alloc::format;
use alloc::string::{String, ToString};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A raw cell value as loaded from the data source.
///
/// CSV-backed sources deliver numbers as strings, so numeric access is lenient:
/// see [`Datum::as_f64`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    /// JSON `null` or an absent value.
    Null,
    /// A boolean cell.
    Bool(bool),
    /// A numeric cell.
    Number(f64),
    /// A text cell (possibly holding a number).
    Text(String),
}

impl Datum {
    /// Returns the value as a finite number, if it has one.
    ///
    /// Text is trimmed and parsed; empty text, `NaN` and infinities yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                s.parse::<f64>().ok()?
            }
            Self::Null | Self::Bool(_) => return None,
        };
        v.is_finite().then_some(v)
    }

    /// Returns the value as display text (category labels, tooltips).
    ///
    /// Whole numbers print without a fractional part (`3`, not `3.0`).
    pub fn label(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format!("{n}"),
            Self::Text(s) => s.clone(),
        }
    }

    /// Returns `true` for [`Datum::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Datum {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One dataset row: column name to raw value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, Datum>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, returning the row (builder style).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Datum>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Returns the raw value of `column`.
    pub fn get(&self, column: &str) -> Option<&Datum> {
        self.cells.get(column)
    }

    /// Returns the numeric value of `column`, if present and numeric.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Datum::as_f64)
    }

    /// Returns the display text of `column` (empty when absent).
    pub fn label(&self, column: &str) -> String {
        self.get(column).map(Datum::label).unwrap_or_default()
    }

    /// Returns `true` if the row has a non-null value for `column`.
    pub fn has(&self, column: &str) -> bool {
        self.get(column).is_some_and(|d| !d.is_null())
    }

    /// Iterates over column names in unspecified order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Datum>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_parse_and_blanks_do_not() {
        assert_eq!(Datum::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(Datum::from("").as_f64(), None);
        assert_eq!(Datum::from("n/a").as_f64(), None);
        assert_eq!(Datum::Number(f64::NAN).as_f64(), None);
        assert_eq!(Datum::Null.as_f64(), None);
    }

    #[test]
    fn whole_numbers_label_without_fraction() {
        assert_eq!(Datum::from(3.0).label(), "3");
        assert_eq!(Datum::from(2.5).label(), "2.5");
        assert_eq!(Datum::from("A").label(), "A");
    }

    #[test]
    fn rows_deserialize_from_json_objects() {
        let row: Row = serde_json::from_str(r#"{"cat":"A","v":3,"w":"4","x":null}"#).unwrap();
        assert_eq!(row.number("v"), Some(3.0));
        assert_eq!(row.number("w"), Some(4.0));
        assert_eq!(row.label("cat"), "A");
        assert!(!row.has("x"));
        assert!(!row.has("missing"));
    }
}
