// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! strftime-style date parsing and display for date axes.

use alloc::format;
use alloc::string::String;
use core::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// A strftime-style date pattern (for example `%Y-%m-%d`).
///
/// Dates are handled as UTC milliseconds since the Unix epoch, the unit used by
/// time scales.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DateFormat(String);

impl DateFormat {
    /// Default pattern for parsing date columns.
    pub const DEFAULT_PARSE: &'static str = "%Y-%m-%d";
    /// Default pattern for displaying dates on axes and in tooltips.
    pub const DEFAULT_DISPLAY: &'static str = "%m/%d/%Y";

    /// Creates a format from a pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// Returns the pattern.
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Parses `text` into UTC milliseconds.
    ///
    /// Patterns without a time component parse as midnight. Patterns that omit
    /// the day (or the month and day) default them to the first.
    pub fn parse_millis(&self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, &self.0) {
            return Some(dt.and_utc().timestamp_millis());
        }
        let date = NaiveDate::parse_from_str(text, &self.0)
            .or_else(|_| {
                NaiveDate::parse_from_str(&format!("{text} 01"), &format!("{} %d", self.0))
            })
            .or_else(|_| {
                NaiveDate::parse_from_str(
                    &format!("{text} 01 01"),
                    &format!("{} %m %d", self.0),
                )
            })
            .ok()?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
    }

    /// Formats UTC milliseconds with this pattern.
    ///
    /// Returns `None` for out-of-range timestamps or invalid patterns.
    pub fn format_millis(&self, millis: i64) -> Option<String> {
        let dt = DateTime::from_timestamp_millis(millis)?;
        let mut out = String::new();
        write!(out, "{}", dt.format(&self.0)).ok()?;
        Some(out)
    }

    /// Re-formats `text` from this pattern into `display`.
    pub fn reformat(&self, text: &str, display: &Self) -> Option<String> {
        display.format_millis(self.parse_millis(text)?)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PARSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_as_utc_midnight() {
        let f = DateFormat::default();
        assert_eq!(f.parse_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(f.parse_millis("not a date"), None);
        assert_eq!(f.parse_millis(""), None);
    }

    #[test]
    fn partial_patterns_default_to_the_first() {
        let year = DateFormat::new("%Y");
        let month = DateFormat::new("%Y-%m");
        assert_eq!(year.parse_millis("1970"), Some(0));
        assert_eq!(month.parse_millis("1970-01"), Some(0));
    }

    #[test]
    fn reformat_uses_display_pattern() {
        let parse = DateFormat::default();
        let display = DateFormat::new(DateFormat::DEFAULT_DISPLAY);
        assert_eq!(
            parse.reformat("2024-03-05", &display).as_deref(),
            Some("03/05/2024")
        );
    }

    #[test]
    fn invalid_display_patterns_yield_none() {
        let bad = DateFormat::new("%Q");
        assert_eq!(bad.format_millis(0), None);
    }
}
