// Copyright 2025 the Cove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncing of editor text fields.
//!
//! Timestamps are supplied by the caller (any monotonic clock, as a
//! [`Duration`] since an arbitrary origin); nothing here reads a clock or
//! spawns timers.

use alloc::vec::Vec;
use core::time::Duration;

use hashbrown::HashMap;
use serde_json::Value;

use crate::{ChartConfig, ConfigError, FieldPath};

/// Delay between the last keystroke and the commit.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// An edit whose debounce delay has elapsed.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingEdit {
    /// The edited field.
    pub path: FieldPath,
    /// The value to commit.
    pub value: Value,
}

#[derive(Clone, Debug)]
struct Pending {
    value: Value,
    deadline: Duration,
}

/// Per-field trailing-edge debouncer.
///
/// Each input restarts that field's timer. An edit is emitted by
/// [`FieldDebouncer::poll`] once its field has been quiet for the delay. An
/// edit is dropped when its value returns to the committed value or when the
/// field is unmounted.
#[derive(Clone, Debug)]
pub struct FieldDebouncer {
    delay: Duration,
    pending: HashMap<FieldPath, Pending>,
}

impl Default for FieldDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl FieldDebouncer {
    /// Creates a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Returns the debounce delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records an input at time `now`.
    ///
    /// `committed` is the field's current value in the configuration.
    pub fn input(&mut self, path: FieldPath, value: Value, committed: Option<&Value>, now: Duration) {
        if committed == Some(&value) {
            if self.pending.remove(&path).is_some() {
                tracing::trace!(%path, "edit reverted; pending commit cancelled");
            }
            return;
        }
        self.pending.insert(
            path,
            Pending {
                value,
                deadline: now.saturating_add(self.delay),
            },
        );
    }

    /// Cancels any pending edit for an unmounted field. Returns `true` if one was pending.
    pub fn unmount(&mut self, path: &FieldPath) -> bool {
        self.pending.remove(path).is_some()
    }

    /// Returns `true` if `path` has an uncommitted edit.
    pub fn is_pending(&self, path: &FieldPath) -> bool {
        self.pending.contains_key(path)
    }

    /// Returns the earliest time at which [`FieldDebouncer::poll`] will yield an edit.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Removes and returns every edit due at `now`, oldest deadline first.
    pub fn poll(&mut self, now: Duration) -> Vec<PendingEdit> {
        let mut due: Vec<(Duration, FieldPath)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(path, p)| (p.deadline, path.clone()))
            .collect();
        due.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.field.cmp(&b.1.field)));
        due.into_iter()
            .filter_map(|(_, path)| {
                let pending = self.pending.remove(&path)?;
                Some(PendingEdit {
                    path,
                    value: pending.value,
                })
            })
            .collect()
    }

    /// Removes and returns every pending edit regardless of deadline.
    pub fn flush(&mut self) -> Vec<PendingEdit> {
        self.poll(Duration::MAX)
    }
}

/// A configuration plus the debounced edits waiting to be applied to it.
#[derive(Clone, Debug)]
pub struct EditorSession {
    config: ChartConfig,
    debouncer: FieldDebouncer,
}

impl EditorSession {
    /// Starts a session on a configuration with the default delay.
    pub fn new(config: ChartConfig) -> Self {
        Self::with_debouncer(config, FieldDebouncer::default())
    }

    /// Starts a session with a custom debouncer.
    pub fn with_debouncer(mut config: ChartConfig, debouncer: FieldDebouncer) -> Self {
        config.normalize();
        Self { config, debouncer }
    }

    /// Returns the committed configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Ends the session, returning the committed configuration.
    pub fn into_config(self) -> ChartConfig {
        self.config
    }

    /// Records a text-field keystroke. The edit commits on a later [`EditorSession::tick`].
    pub fn input(&mut self, path: FieldPath, value: Value, now: Duration) {
        let committed = self.config.field_value(&path);
        self.debouncer.input(path, value, committed.as_ref(), now);
    }

    /// Applies an edit immediately (checkboxes and selects are not debounced).
    pub fn commit(&mut self, path: &FieldPath, value: Value) -> Result<(), ConfigError> {
        self.debouncer.unmount(path);
        self.config.update_field(path, value)
    }

    /// Cancels a pending edit for a field that went away.
    pub fn unmount(&mut self, path: &FieldPath) {
        self.debouncer.unmount(path);
    }

    /// Returns the earliest time a pending edit becomes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.next_deadline()
    }

    /// Applies every edit due at `now`. Returns the number applied.
    ///
    /// Rejected edits are logged and dropped.
    pub fn tick(&mut self, now: Duration) -> usize {
        let mut applied = 0;
        for edit in self.debouncer.poll(now) {
            match self.config.update_field(&edit.path, edit.value) {
                Ok(()) => applied += 1,
                Err(err) => tracing::warn!(path = %edit.path, %err, "dropping debounced edit"),
            }
        }
        applied
    }
}
