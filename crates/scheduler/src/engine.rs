// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The scheduler: configuration in, plan out.
//!
//! ```text
//! SchedulerConfig
//!     │  Scheduler::new()      all validation happens here
//!     ▼
//! Scheduler
//!     │  .plan(files, report)  pure, single pass
//!     ▼
//! PlanOutcome::{Planned(Plan), NoOp}
//! ```

use crate::{SchedulerConfig, SchedulerError};
use duration_model::{CategoryEstimate, DurationEstimator, DurationReport};
use lane_planner::{PartitionPlanner, Plan};
use test_catalog::{Classification, Classifier, TestFile};

/// What the scheduler hands to a [`crate::PlanEmitter`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// The file list was non-empty; here is the plan.
    Planned(Plan),
    /// The file list was empty; emit the fixed no-op artifact.
    NoOp,
}

impl PlanOutcome {
    /// `true` when the overall input was empty and no categories exist.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    pub fn plan(&self) -> Option<&Plan> {
        match self {
            Self::Planned(plan) => Some(plan),
            Self::NoOp => None,
        }
    }

    pub fn into_plan(self) -> Option<Plan> {
        match self {
            Self::Planned(plan) => Some(plan),
            Self::NoOp => None,
        }
    }
}

/// Classifies test files and plans lanes under a validated configuration.
///
/// # Example
/// ```
/// use duration_model::DurationReport;
/// use scheduler::{Scheduler, SchedulerConfig};
/// use test_catalog::FileList;
///
/// let scheduler = Scheduler::new(SchedulerConfig::default()).unwrap();
/// let files = FileList::parse("spec/models/user_spec.rb spec/features/login_spec.rb");
/// let outcome = scheduler.plan(files.as_slice(), DurationReport::empty()).unwrap();
/// assert_eq!(outcome.plan().unwrap().total_lanes(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    classifier: Classifier,
    planner: PartitionPlanner,
    default_seconds: f64,
}

impl Scheduler {
    /// Validates `config` and builds a scheduler.
    ///
    /// # Errors
    /// Any invalid budget, lane cap, default duration or rule.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let budget = config.lane_budget()?;
        let default_seconds = config.default_file_duration()?;
        let rules = config.rule_set()?;

        tracing::info!(
            "scheduler ready: {budget}, default {:.2}s/file, rules [{}]",
            default_seconds,
            rules
                .categories()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        );

        Ok(Self {
            classifier: Classifier::new(rules),
            planner: PartitionPlanner::new(budget),
            default_seconds,
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn planner(&self) -> &PartitionPlanner {
        &self.planner
    }

    /// The global default per-file duration, in seconds.
    pub fn default_file_duration(&self) -> f64 {
        self.default_seconds
    }

    /// Classifies `files`, logging the files no rule claimed.
    pub fn classify(&self, files: &[TestFile]) -> Classification {
        let classification = self.classifier.classify(files);
        let unclassified = classification.unclassified().len();
        if unclassified > 0 {
            tracing::warn!(
                "{unclassified} of {} files matched no category and will not be scheduled",
                classification.total_files(),
            );
        }
        classification
    }

    /// Representative durations for every non-empty category of `files`.
    pub fn estimate(
        &self,
        files: &[TestFile],
        report: DurationReport,
    ) -> Result<Vec<CategoryEstimate>, SchedulerError> {
        let estimator = self.estimator(report)?;
        Ok(self
            .classify(files)
            .buckets()
            .iter()
            .filter_map(|b| estimator.category_average(b.category, &b.files))
            .collect())
    }

    /// Produces the plan for `files`.
    ///
    /// An empty file list yields [`PlanOutcome::NoOp`]. A non-empty list
    /// always yields a plan, even if every file is unclassified.
    pub fn plan(
        &self,
        files: &[TestFile],
        report: DurationReport,
    ) -> Result<PlanOutcome, SchedulerError> {
        if files.is_empty() {
            tracing::info!("no test files given, emitting no-op plan");
            return Ok(PlanOutcome::NoOp);
        }

        let (buckets, unclassified) = self.classify(files).into_parts();
        let estimator = self.estimator(report)?;

        let loads = buckets.into_iter().map(|bucket| {
            let avg = estimator
                .category_average(bucket.category, &bucket.files)
                .map_or(self.default_seconds, |e| {
                    tracing::debug!(
                        "category '{}': avg {:.2}s ({} report, {} category mean, {} default)",
                        e.category,
                        e.mean_seconds,
                        e.report_hits,
                        e.category_mean_hits,
                        e.default_hits,
                    );
                    e.mean_seconds
                });
            (bucket, avg)
        });

        let plan = self.planner.plan(loads, unclassified)?;
        tracing::info!("{}", plan.summary());
        Ok(PlanOutcome::Planned(plan))
    }

    fn estimator(&self, report: DurationReport) -> Result<DurationEstimator, SchedulerError> {
        Ok(DurationEstimator::new(
            report,
            &self.classifier,
            self.default_seconds,
        )?)
    }
}
