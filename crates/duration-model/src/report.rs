// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Historical duration reports.
//!
//! # Format
//! A flat JSON object mapping test file paths to measured seconds, as
//! written by knapsack-style test balancers:
//!
//! ```json
//! {
//!   "spec/models/user_spec.rb": 12.41,
//!   "spec/features/login_spec.rb": 87.0
//! }
//! ```
//!
//! Entries whose value is not a positive finite number (zero, negative,
//! `null`, strings...) are dropped during parsing. Every duration that
//! leaves this module is therefore safe to divide by.

use crate::DurationError;
use std::collections::BTreeMap;
use std::path::Path;
use test_catalog::TestFile;

/// Validated `file → seconds` mapping.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DurationReport {
    durations: BTreeMap<TestFile, f64>,
    /// Number of entries dropped during validation.
    #[serde(skip)]
    rejected: usize,
}

impl DurationReport {
    /// An empty report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a report from raw entries, dropping invalid durations.
    pub fn from_entries<I, F>(entries: I) -> Self
    where
        I: IntoIterator<Item = (F, f64)>,
        F: Into<TestFile>,
    {
        let mut durations = BTreeMap::new();
        let mut rejected = 0;
        for (file, seconds) in entries {
            if is_valid_duration(seconds) {
                durations.insert(file.into(), seconds);
            } else {
                rejected += 1;
            }
        }
        if rejected > 0 {
            tracing::debug!("dropped {rejected} report entries with non-positive durations");
        }
        Self {
            durations,
            rejected,
        }
    }

    /// Parses a report from a JSON string.
    ///
    /// # Errors
    /// [`DurationError::ReportParseError`] if the document is not a JSON
    /// object. Individual bad values are dropped, not reported.
    pub fn from_json(json: &str) -> Result<Self, DurationError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut non_numeric = 0;
        let entries: Vec<(String, f64)> = raw
            .into_iter()
            .filter_map(|(file, value)| match value.as_f64() {
                Some(seconds) => Some((file, seconds)),
                None => {
                    non_numeric += 1;
                    None
                }
            })
            .collect();

        let mut report = Self::from_entries(entries);
        report.rejected += non_numeric;
        Ok(report)
    }

    /// Loads a report from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, DurationError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Loads a report, degrading to the empty report on any failure.
    ///
    /// `None`, an unreadable file and unparsable content all yield an empty
    /// report; the latter two are logged as warnings.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("no duration report given, using default durations");
            return Self::empty();
        };

        match Self::from_file(path) {
            Ok(report) => {
                tracing::info!(
                    "loaded duration report '{}' ({} entries, {} rejected)",
                    path.display(),
                    report.len(),
                    report.rejected(),
                );
                report
            }
            Err(e) => {
                tracing::warn!(
                    "ignoring duration report '{}': {e}; using default durations",
                    path.display(),
                );
                Self::empty()
            }
        }
    }

    /// Returns the measured duration for `file`.
    pub fn get(&self, file: &TestFile) -> Option<f64> {
        self.durations.get(file).copied()
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Number of entries dropped because their value was invalid.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Report files in sorted order.
    pub fn files(&self) -> Vec<TestFile> {
        self.durations.keys().cloned().collect()
    }

    /// Iterates over `(file, seconds)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&TestFile, f64)> {
        self.durations.iter().map(|(f, &s)| (f, s))
    }
}

fn is_valid_duration(seconds: f64) -> bool {
    seconds.is_finite() && seconds > 0.0
}
