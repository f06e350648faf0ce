// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the scheduler.

/// Errors raised while building a scheduler or planning.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// The rule set or file list is invalid.
    #[error("catalog error: {0}")]
    CatalogError(#[from] test_catalog::CatalogError),

    /// The corpus baseline or a report could not be used.
    #[error("duration error: {0}")]
    DurationError(#[from] duration_model::DurationError),

    /// The lane planner rejected its inputs.
    #[error("planner error: {0}")]
    PlannerError(#[from] lane_planner::PlannerError),

    /// Rendering the outcome failed.
    #[error("emit error: {0}")]
    EmitError(#[from] EmitError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Errors raised by a [`crate::PlanEmitter`].
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The document could not be serialised.
    #[error("failed to serialise plan: {0}")]
    Serialize(#[from] serde_json::Error),
}
