// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Corpus baseline: the source of the global default per-file duration.

use crate::DurationError;

/// A one-time measurement of the full test suite.
///
/// The default duration is derived once as `total_seconds / total_files`
/// and injected into the estimator, so it can be tested and overridden
/// independently of any report.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CorpusBaseline {
    /// Wall-clock seconds the whole suite took in one serial run.
    pub total_seconds: f64,
    /// Number of test files in that run.
    pub total_files: u64,
}

impl CorpusBaseline {
    pub fn new(total_seconds: f64, total_files: u64) -> Self {
        Self {
            total_seconds,
            total_files,
        }
    }

    /// The stock measurement: 62 hours over 18 254 files (≈ 12.23 s/file).
    pub fn gitlab() -> Self {
        Self::new(62.0 * 60.0 * 60.0, 18_254)
    }

    /// Returns the average seconds per file.
    ///
    /// # Errors
    /// [`DurationError::InvalidBaseline`] when the file count is zero or the
    /// total is not a positive finite number.
    pub fn default_file_duration(&self) -> Result<f64, DurationError> {
        if self.total_files == 0 {
            return Err(DurationError::InvalidBaseline(
                "total_files must be at least 1".into(),
            ));
        }
        if !self.total_seconds.is_finite() || self.total_seconds <= 0.0 {
            return Err(DurationError::InvalidBaseline(format!(
                "total_seconds must be positive, got {}",
                self.total_seconds
            )));
        }
        Ok(self.total_seconds / self.total_files as f64)
    }
}

impl Default for CorpusBaseline {
    fn default() -> Self {
        Self::gitlab()
    }
}
