// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lane count computation.
//!
//! # Lane Model
//!
//! Setup is paid once per lane, so the time a lane has for tests is the
//! job budget minus setup. A lane is packed with as many average-length
//! files as fit in that time, but never fewer than one:
//!
//! ```text
//! files_per_lane = max(1, floor(target / avg))
//! lanes          = min(ceil(n / files_per_lane), max_lanes)
//! ```
//!
//! When the cap binds, the surplus files are spread across the capped
//! lanes and the expected lane runtime exceeds the budget. That overrun is
//! reported (`capped`, `estimated_lane_seconds`) but never corrected by
//! exceeding the cap.

use crate::plan::PlanBuilder;
use crate::{CategoryPlan, LaneBudget, Plan, PlannerError};
use test_catalog::{CategoryBucket, TestFile};

/// Lane arithmetic for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneCount {
    /// Files one lane can run within the target duration (≥ 1).
    pub files_per_lane: usize,
    /// Lanes before the cap was applied.
    pub uncapped_lanes: usize,
    /// Lanes after the cap was applied.
    pub lanes: usize,
}

impl LaneCount {
    /// Returns `true` if the cap reduced the lane count.
    pub fn capped(&self) -> bool {
        self.lanes < self.uncapped_lanes
    }
}

/// Computes lane counts under a [`LaneBudget`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionPlanner {
    budget: LaneBudget,
}

impl PartitionPlanner {
    pub fn new(budget: LaneBudget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> &LaneBudget {
        &self.budget
    }

    /// Lane count for `file_count` files averaging `avg_duration_seconds`.
    ///
    /// Zero files need zero lanes. `avg_duration_seconds` must be positive
    /// and finite; callers validate it (see [`Self::plan_category`]).
    pub fn lane_count(&self, file_count: usize, avg_duration_seconds: f64) -> LaneCount {
        if file_count == 0 {
            return LaneCount {
                files_per_lane: 1,
                uncapped_lanes: 0,
                lanes: 0,
            };
        }

        let fitting = (self.budget.target_seconds_per_lane() / avg_duration_seconds).floor();
        // `as` saturates, so a vanishingly small average cannot overflow.
        let files_per_lane = (fitting as usize).max(1);
        let uncapped_lanes = file_count.div_ceil(files_per_lane);

        LaneCount {
            files_per_lane,
            uncapped_lanes,
            lanes: uncapped_lanes.min(self.budget.max_lanes()),
        }
    }

    /// Plans one category bucket.
    ///
    /// Returns `Ok(None)` for an empty bucket: the category is omitted from
    /// the plan rather than given zero lanes.
    ///
    /// # Errors
    /// [`PlannerError::InvalidDuration`] if `avg_duration_seconds` is not
    /// positive and finite.
    pub fn plan_category(
        &self,
        bucket: CategoryBucket,
        avg_duration_seconds: f64,
    ) -> Result<Option<CategoryPlan>, PlannerError> {
        if bucket.is_empty() {
            tracing::debug!("category '{}' has no files, skipping", bucket.category);
            return Ok(None);
        }
        if !avg_duration_seconds.is_finite() || avg_duration_seconds <= 0.0 {
            return Err(PlannerError::InvalidDuration {
                category: bucket.category,
                seconds: avg_duration_seconds,
            });
        }

        let count = self.lane_count(bucket.len(), avg_duration_seconds);
        let fullest_lane_files = bucket.len().div_ceil(count.lanes);
        // Saturates instead of reaching infinity for huge averages.
        let estimated_lane_seconds = (self.budget.setup_overhead_seconds()
            + fullest_lane_files as f64 * avg_duration_seconds)
            .min(f64::MAX);

        if count.capped() {
            tracing::warn!(
                "category '{}' needs {} lanes but the cap is {}; lanes will run ~{:.0}s against a {:.0}s budget",
                bucket.category,
                count.uncapped_lanes,
                count.lanes,
                estimated_lane_seconds,
                self.budget.job_budget_seconds(),
            );
        } else {
            tracing::debug!(
                "category '{}': {} files, avg {:.2}s, {} files/lane → {} lanes",
                bucket.category,
                bucket.len(),
                avg_duration_seconds,
                count.files_per_lane,
                count.lanes,
            );
        }

        Ok(Some(CategoryPlan {
            category: bucket.category,
            files: bucket.files,
            lanes: count.lanes,
            files_per_lane: count.files_per_lane,
            avg_file_duration_seconds: avg_duration_seconds,
            estimated_lane_seconds,
            capped: count.capped(),
        }))
    }

    /// Plans every bucket, in the order given.
    ///
    /// `loads` pairs each bucket with its representative per-file duration.
    /// Empty buckets are omitted; `unclassified` is recorded on the plan.
    pub fn plan<I>(&self, loads: I, unclassified: Vec<TestFile>) -> Result<Plan, PlannerError>
    where
        I: IntoIterator<Item = (CategoryBucket, f64)>,
    {
        let mut builder = PlanBuilder::new(self.budget);
        for (bucket, avg) in loads {
            if let Some(plan) = self.plan_category(bucket, avg)? {
                builder.add_category(plan);
            }
        }
        builder.set_unclassified(unclassified);

        let plan = builder.build();
        plan.validate()?;
        Ok(plan)
    }
}
