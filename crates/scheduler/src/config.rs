// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scheduler configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! Every key is optional; missing keys take the stock values.
//! ```toml
//! job_budget_seconds = 600.0
//! setup_overhead_seconds = 180.0
//! max_lanes = 50
//! # Overrides the baseline-derived default when set.
//! default_file_duration_seconds = 10.2
//!
//! [baseline]
//! total_seconds = 223200.0
//! total_files = 18254
//!
//! [[rules]]
//! category = "migration"
//! pattern = '^(?:ee/)?spec/migrations/'
//!
//! [[rules]]
//! category = "unit"
//! pattern = '^(?:ee/)?spec/(?:lib|models|services)/'
//! ```

use crate::{Scheduler, SchedulerError};
use duration_model::CorpusBaseline;
use lane_planner::LaneBudget;
use std::path::Path;
use test_catalog::{RuleSet, RuleSpec};

/// Configuration for the scheduler.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wall-clock seconds a single lane may run, setup included.
    pub job_budget_seconds: f64,
    /// Fixed startup cost paid once per lane.
    pub setup_overhead_seconds: f64,
    /// Platform ceiling on lanes per category.
    pub max_lanes: usize,
    /// Explicit global default per-file duration. Takes precedence over
    /// `baseline` when set.
    pub default_file_duration_seconds: Option<f64>,
    /// Corpus measurement the default duration is derived from.
    pub baseline: CorpusBaseline,
    /// Classification rules in priority order.
    pub rules: Vec<RuleSpec>,
}

impl SchedulerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SchedulerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchedulerError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SchedulerError> {
        toml::from_str(toml_str)
            .map_err(|e| SchedulerError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SchedulerError> {
        toml::to_string_pretty(self)
            .map_err(|e| SchedulerError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Builds the validated lane budget.
    pub fn lane_budget(&self) -> Result<LaneBudget, SchedulerError> {
        Ok(LaneBudget::new(
            self.job_budget_seconds,
            self.setup_overhead_seconds,
            self.max_lanes,
        )?)
    }

    /// Resolves the global default per-file duration.
    ///
    /// The explicit override wins; otherwise the baseline ratio is used.
    pub fn default_file_duration(&self) -> Result<f64, SchedulerError> {
        match self.default_file_duration_seconds {
            Some(seconds) if seconds.is_finite() && seconds > 0.0 => Ok(seconds),
            Some(seconds) => Err(SchedulerError::ConfigError(format!(
                "default_file_duration_seconds must be positive, got {seconds}"
            ))),
            None => Ok(self.baseline.default_file_duration()?),
        }
    }

    /// Compiles the classification rules.
    pub fn rule_set(&self) -> Result<RuleSet, SchedulerError> {
        Ok(RuleSet::new(&self.rules)?)
    }

    /// Validates the configuration and builds a [`Scheduler`].
    pub fn validate(self) -> Result<Scheduler, SchedulerError> {
        Scheduler::new(self)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        let budget = LaneBudget::gitlab();
        Self {
            job_budget_seconds: budget.job_budget_seconds(),
            setup_overhead_seconds: budget.setup_overhead_seconds(),
            max_lanes: budget.max_lanes(),
            default_file_duration_seconds: None,
            baseline: CorpusBaseline::gitlab(),
            rules: RuleSet::gitlab_default_specs(),
        }
    }
}
