// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for value labels, ticks and tooltips.

use alloc::format;
use alloc::string::String;

use cove_config::DataFormat;

/// Formats numbers according to a chart's `dataFormat`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumberFormat {
    /// Insert `,` between groups of three integer digits.
    pub commas: bool,
    /// Fixed number of decimal places (shortest representation when `None`).
    pub round_to: Option<u32>,
    /// Text placed before the number.
    pub prefix: String,
    /// Text placed after the number.
    pub suffix: String,
}

impl NumberFormat {
    /// Creates a format that prints numbers as-is.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables thousands separators.
    #[must_use]
    pub fn with_commas(mut self, commas: bool) -> Self {
        self.commas = commas;
        self
    }

    /// Sets the number of decimal places, at most
    /// [`DataFormat::MAX_ROUND_TO`].
    #[must_use]
    pub fn with_round_to(mut self, places: u32) -> Self {
        self.round_to = Some(places.min(DataFormat::MAX_ROUND_TO));
        self
    }

    /// Sets the prefix and suffix.
    #[must_use]
    pub fn with_affixes(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Formats `value`. Non-finite values format as an empty string.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        // Avoid printing "-0".
        let value = if value == 0.0 { 0.0 } else { value };
        let digits = match self.round_to {
            Some(places) => {
                let prec = places.min(DataFormat::MAX_ROUND_TO) as usize;
                format!("{value:.prec$}")
            }
            None => format!("{value}"),
        };
        let digits = if self.commas {
            group_thousands(&digits)
        } else {
            digits
        };
        format!("{}{digits}{}", self.prefix, self.suffix)
    }
}

impl From<&DataFormat> for NumberFormat {
    fn from(f: &DataFormat) -> Self {
        Self {
            commas: f.commas,
            round_to: f.round_to.map(|n| n.min(DataFormat::MAX_ROUND_TO)),
            prefix: f.prefix.clone(),
            suffix: f.suffix.clone(),
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, rest) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int, frac) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };
    let mut out = String::with_capacity(digits.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push_str(frac);
    out
}
