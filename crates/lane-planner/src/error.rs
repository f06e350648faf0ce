// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the lane planner.

use test_catalog::TestCategory;

/// Errors that can occur during lane planning.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// The budget leaves no time for tests once setup is paid.
    #[error("job budget {budget_seconds}s must exceed setup overhead {overhead_seconds}s")]
    BudgetTooSmall {
        budget_seconds: f64,
        overhead_seconds: f64,
    },

    /// A budget field is negative, NaN or infinite.
    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    /// The lane cap is zero.
    #[error("max lanes must be at least 1")]
    ZeroLaneCap,

    /// A category's representative duration cannot be divided by.
    #[error("category '{category}' has invalid average duration {seconds}s")]
    InvalidDuration { category: TestCategory, seconds: f64 },

    /// A finished plan breaks one of its invariants.
    #[error("invalid plan: {0}")]
    InvalidPlan(String),
}
