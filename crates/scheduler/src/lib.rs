// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # scheduler
//!
//! Ties the pipeline together:
//!
//! ```text
//! FileList ──► Classifier ──► buckets ──┐
//!                                       ├─► PartitionPlanner ──► PlanOutcome ──► PlanEmitter
//! DurationReport ──► DurationEstimator ─┘
//! ```
//!
//! - [`SchedulerConfig`]: TOML-backed constants (budget, overhead, lane
//!   cap, ordered rules, default duration).
//! - [`Scheduler`]: built once from a config; all precondition checks
//!   happen there, after which planning cannot fail on user input.
//! - [`PlanOutcome`]: either a plan or the no-op signal for an empty file
//!   list.
//! - [`PlanEmitter`]: renders the outcome into the document consumed by
//!   the CI system; [`JsonEmitter`] is the built-in one.
//!
//! The scheduler is synchronous, holds no global state, and produces
//! identical output for identical input.

mod config;
mod emitter;
mod engine;
mod error;

pub use config::SchedulerConfig;
pub use emitter::{JsonEmitter, PlanEmitter, NO_OP_REASON};
pub use engine::{PlanOutcome, Scheduler};
pub use error::{EmitError, SchedulerError};
