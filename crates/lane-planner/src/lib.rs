// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # lane-planner
//!
//! Turns categorised test files and their representative durations into
//! lane counts: how many parallel jobs each category needs so that no lane
//! runs longer than the job budget, without ever exceeding the platform's
//! lane cap.
//!
//! # Lane Model
//!
//! ```text
//! target          = job_budget − setup_overhead       (per lane, once)
//! files_per_lane  = max(1, floor(target / avg_duration))
//! lanes           = min(ceil(files / files_per_lane), max_lanes)
//! ```
//!
//! The cap is hard: when a category would need more lanes than
//! `max_lanes`, lanes are overloaded rather than the cap exceeded.
//!
//! # Example
//! ```
//! use lane_planner::{LaneBudget, PartitionPlanner};
//! use test_catalog::{CategoryBucket, TestCategory, TestFile};
//!
//! let planner = PartitionPlanner::new(LaneBudget::new(600.0, 180.0, 50).unwrap());
//! let bucket = CategoryBucket {
//!     category: TestCategory::Unit,
//!     files: (0..100).map(|i| TestFile::new(format!("spec/models/m{i}_spec.rb"))).collect(),
//! };
//! let plan = planner.plan_category(bucket, 10.2).unwrap().unwrap();
//! assert_eq!(plan.files_per_lane, 41);
//! assert_eq!(plan.lanes, 3);
//! ```

mod budget;
mod error;
pub(crate) mod plan;
pub mod planner;

pub use budget::{parse_seconds, LaneBudget};
pub use error::PlannerError;
pub use plan::{CategoryPlan, Plan};
pub use planner::{LaneCount, PartitionPlanner};
