// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for duration reports and baselines.

/// Errors that can occur when loading reports or deriving defaults.
#[derive(Debug, thiserror::Error)]
pub enum DurationError {
    /// The report file could not be read.
    #[error("failed to read duration report: {0}")]
    ReportReadError(#[from] std::io::Error),

    /// The report is not a JSON object of file paths.
    #[error("failed to parse duration report: {0}")]
    ReportParseError(#[from] serde_json::Error),

    /// The corpus baseline cannot produce a positive default duration.
    #[error("invalid corpus baseline: {0}")]
    InvalidBaseline(String),

    /// The global default per-file duration is not positive and finite.
    #[error("default file duration must be positive and finite, got {0}")]
    InvalidDefaultDuration(f64),
}
