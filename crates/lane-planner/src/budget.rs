// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lane budget configuration and duration parsing.

use crate::PlannerError;
use std::fmt;

/// Time and parallelism limits for one pipeline.
///
/// # Examples
/// ```
/// use lane_planner::LaneBudget;
///
/// let b = LaneBudget::new(600.0, 180.0, 50).unwrap();
/// assert_eq!(b.target_seconds_per_lane(), 420.0);
///
/// assert!(LaneBudget::new(120.0, 180.0, 50).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LaneBudget {
    /// Wall-clock seconds a single lane may run, setup included.
    job_budget_seconds: f64,
    /// Fixed startup cost paid once per lane.
    setup_overhead_seconds: f64,
    /// Platform ceiling on lanes per category.
    max_lanes: usize,
}

impl LaneBudget {
    /// Creates a validated budget.
    ///
    /// # Errors
    /// - [`PlannerError::InvalidBudget`] for negative or non-finite values.
    /// - [`PlannerError::BudgetTooSmall`] unless budget > overhead.
    /// - [`PlannerError::ZeroLaneCap`] if `max_lanes` is zero.
    pub fn new(
        job_budget_seconds: f64,
        setup_overhead_seconds: f64,
        max_lanes: usize,
    ) -> Result<Self, PlannerError> {
        if !job_budget_seconds.is_finite() || job_budget_seconds <= 0.0 {
            return Err(PlannerError::InvalidBudget(format!(
                "job budget must be positive, got {job_budget_seconds}"
            )));
        }
        if !setup_overhead_seconds.is_finite() || setup_overhead_seconds < 0.0 {
            return Err(PlannerError::InvalidBudget(format!(
                "setup overhead must be non-negative, got {setup_overhead_seconds}"
            )));
        }
        if job_budget_seconds <= setup_overhead_seconds {
            return Err(PlannerError::BudgetTooSmall {
                budget_seconds: job_budget_seconds,
                overhead_seconds: setup_overhead_seconds,
            });
        }
        if max_lanes == 0 {
            return Err(PlannerError::ZeroLaneCap);
        }

        Ok(Self {
            job_budget_seconds,
            setup_overhead_seconds,
            max_lanes,
        })
    }

    /// Stock limits: 10 minute jobs, 3 minutes of setup, 50 parallel lanes.
    pub fn gitlab() -> Self {
        Self {
            job_budget_seconds: 600.0,
            setup_overhead_seconds: 180.0,
            max_lanes: 50,
        }
    }

    pub fn job_budget_seconds(&self) -> f64 {
        self.job_budget_seconds
    }

    pub fn setup_overhead_seconds(&self) -> f64 {
        self.setup_overhead_seconds
    }

    pub fn max_lanes(&self) -> usize {
        self.max_lanes
    }

    /// Seconds of test runtime available to each lane.
    pub fn target_seconds_per_lane(&self) -> f64 {
        self.job_budget_seconds - self.setup_overhead_seconds
    }
}

impl Default for LaneBudget {
    fn default() -> Self {
        Self::gitlab()
    }
}

impl fmt::Display for LaneBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}s job ({}s setup, {}s tests), max {} lanes",
            self.job_budget_seconds,
            self.setup_overhead_seconds,
            self.target_seconds_per_lane(),
            self.max_lanes,
        )
    }
}

/// Parses a human-readable duration into seconds.
///
/// Accepted formats: `"600"`, `"600s"`, `"10m"`, `"1.5h"`, and compound
/// forms such as `"1h30m"` or `"2m30s"`. Case-insensitive.
///
/// ```
/// use lane_planner::parse_seconds;
///
/// assert_eq!(parse_seconds("10m").unwrap(), 600.0);
/// assert_eq!(parse_seconds("1h30m").unwrap(), 5400.0);
/// assert_eq!(parse_seconds("42.5").unwrap(), 42.5);
/// ```
pub fn parse_seconds(s: &str) -> Result<f64, PlannerError> {
    let s = s.trim().to_lowercase();
    let invalid = || {
        PlannerError::InvalidBudget(format!(
            "invalid duration '{s}': expected a number with an optional h/m/s suffix"
        ))
    };

    if s.is_empty() {
        return Err(invalid());
    }

    // Plain number: seconds.
    if let Ok(value) = s.parse::<f64>() {
        return if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(invalid())
        };
    }

    let mut total = 0.0;
    let mut number = String::new();
    for ch in s.chars() {
        match ch {
            '0'..='9' | '.' => number.push(ch),
            'h' | 'm' | 's' => {
                let value: f64 = number.parse().map_err(|_| invalid())?;
                let multiplier = match ch {
                    'h' => 3600.0,
                    'm' => 60.0,
                    _ => 1.0,
                };
                total += value * multiplier;
                number.clear();
            }
            _ => return Err(invalid()),
        }
    }
    if !number.is_empty() {
        // Trailing digits without a unit, e.g. "1m30".
        return Err(invalid());
    }

    Ok(total)
}
