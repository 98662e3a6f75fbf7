// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart datasets and computed views.
//!
//! This crate provides:
//! - [`Row`] and [`Datum`]: one loaded record, column name to raw value,
//! - [`Dataset`]: an immutable, cheaply shared list of rows,
//! - [`Transform`] and [`Program`]: filters and exclusions that produce a
//!   [`DataView`] (row indices into the dataset) without mutating anything,
//! - [`DateFormat`]: strftime-style parsing and display for date axes.
//!
//! Loading and CSV parsing happen elsewhere; the dataset arrives as JSON rows
//! or already-built [`Row`] values.

#![no_std]

extern crate alloc;

mod dataset;
mod date;
mod datum;
mod error;
mod transform;

pub use dataset::{DataView, Dataset};
pub use date::DateFormat;
pub use datum::{Datum, Row};
pub use error::DataError;
pub use transform::{Program, Transform};
