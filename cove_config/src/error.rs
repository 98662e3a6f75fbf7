// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for configuration loading and editing.

use alloc::string::{String, ToString};

use thiserror::Error;

/// Errors that can occur when loading or editing a chart configuration.
///
/// Malformed field values never produce errors; they are coerced to defaults
/// during deserialization and normalization. Only structural problems and
/// edits addressed to fields that do not exist are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The input was not valid JSON, or not shaped like a configuration.
    #[error("invalid configuration: {0}")]
    Json(String),

    /// An edit addressed a section the configuration does not have.
    #[error("unknown section `{0}`")]
    UnknownSection(String),

    /// An edit addressed a field the configuration does not have.
    #[error("unknown field `{field}` in {scope}")]
    UnknownField {
        /// Where the field was looked up (`config`, a section, or an element).
        scope: String,
        /// The missing field name.
        field: String,
    },

    /// An edit addressed a list element past the end of the list.
    #[error("index {index} is out of range for `{section}` (length {len})")]
    IndexOutOfRange {
        /// The list section.
        section: String,
        /// The requested index.
        index: usize,
        /// The list length.
        len: usize,
    },

    /// An element edit addressed a section that is not a list.
    #[error("section `{0}` is not a list")]
    NotAList(String),

    /// The new-visualization flow cannot finish until required sections are set.
    #[error("required sections are missing (series and x-axis data key)")]
    MissingRequiredSections,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
