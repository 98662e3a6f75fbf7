// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for dataset loading.

use alloc::string::{String, ToString};

use thiserror::Error;

/// Errors returned when building a [`Dataset`](crate::Dataset).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// The input was not valid JSON.
    #[error("invalid dataset JSON: {0}")]
    Json(String),
    /// The JSON was valid but not an array of row objects.
    #[error("dataset must be an array of row objects")]
    NotTabular,
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
