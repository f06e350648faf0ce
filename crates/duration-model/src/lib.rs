// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # duration-model
//!
//! Expected run time of test files, resolved from historical data.
//!
//! # Key Components
//!
//! - [`DurationReport`]: validated `file → seconds` map loaded from a
//!   knapsack-style JSON report. Non-positive and non-finite values are
//!   dropped at the boundary.
//! - [`CorpusBaseline`]: a one-time measurement of the whole suite
//!   (`total seconds / total files`) giving the global default duration.
//! - [`DurationEstimator`]: resolves a duration for `(category, file)`.
//!
//! # Resolution Order
//!
//! ```text
//! 1. report[file]                       exact historical entry
//! 2. mean(report[f] for f in category)  computed once per category
//! 3. baseline default                   empty report / no category data
//! ```
//!
//! A missing or malformed report is never an error for the estimator: the
//! caller loads it with [`DurationReport::load_or_empty`] and every file
//! then resolves through step 3.
//!
//! # Example
//! ```
//! use duration_model::{CorpusBaseline, DurationEstimator, DurationReport};
//! use test_catalog::{Classifier, RuleSet, TestCategory, TestFile};
//!
//! let report = DurationReport::from_json(r#"{"spec/models/user_spec.rb": 12.5}"#).unwrap();
//! let classifier = Classifier::new(RuleSet::gitlab_default().unwrap());
//! let default = CorpusBaseline::new(1020.0, 100).default_file_duration().unwrap();
//! let estimator = DurationEstimator::new(report, &classifier, default).unwrap();
//!
//! let file = TestFile::from("spec/models/user_spec.rb");
//! assert_eq!(estimator.estimate(TestCategory::Unit, &file), 12.5);
//! ```

mod baseline;
mod error;
pub mod estimator;
mod report;

pub use baseline::CorpusBaseline;
pub use error::DurationError;
pub use estimator::{CategoryEstimate, DurationEstimator, Estimate, EstimateSource};
pub use report::DurationReport;
