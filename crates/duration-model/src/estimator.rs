// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-file duration resolution with layered fallback.
//!
//! The per-category means are computed once, at construction, by running
//! the report's own files through the same ordered classification as the
//! input. A report entry therefore contributes to exactly one category
//! mean, and the first declared matching rule decides which.

use crate::{DurationError, DurationReport};
use std::collections::BTreeMap;
use test_catalog::{Classifier, TestCategory, TestFile};

/// Where a resolved duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// The file's own historical entry.
    Report,
    /// The mean of the category's historical entries.
    CategoryMean,
    /// The global default derived from the corpus baseline.
    Default,
}

impl EstimateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::CategoryMean => "category_mean",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for EstimateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved duration for one file.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Estimate {
    pub seconds: f64,
    pub source: EstimateSource,
}

/// The representative duration of a whole category bucket.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryEstimate {
    pub category: TestCategory,
    /// Mean resolved duration per file, in seconds.
    pub mean_seconds: f64,
    /// Files resolved from their own report entry.
    pub report_hits: usize,
    /// Files resolved from the category mean.
    pub category_mean_hits: usize,
    /// Files resolved from the global default.
    pub default_hits: usize,
}

impl CategoryEstimate {
    pub fn num_files(&self) -> usize {
        self.report_hits + self.category_mean_hits + self.default_hits
    }
}

/// Resolves expected run times for `(category, file)` pairs.
#[derive(Debug, Clone)]
pub struct DurationEstimator {
    report: DurationReport,
    category_means: BTreeMap<TestCategory, f64>,
    default_seconds: f64,
}

impl DurationEstimator {
    /// Builds an estimator over `report`.
    ///
    /// # Errors
    /// [`DurationError::InvalidDefaultDuration`] unless `default_seconds` is
    /// positive and finite.
    pub fn new(
        report: DurationReport,
        classifier: &Classifier,
        default_seconds: f64,
    ) -> Result<Self, DurationError> {
        if !default_seconds.is_finite() || default_seconds <= 0.0 {
            return Err(DurationError::InvalidDefaultDuration(default_seconds));
        }

        let mut category_means = BTreeMap::new();
        if !report.is_empty() {
            let classified = classifier.classify(&report.files());
            for bucket in classified.buckets() {
                let Some(mean) = running_mean(bucket.files.iter().filter_map(|f| report.get(f)))
                else {
                    continue;
                };
                tracing::debug!(
                    "historical mean for '{}': {:.2}s over {} files",
                    bucket.category,
                    mean,
                    bucket.len(),
                );
                category_means.insert(bucket.category, mean);
            }
        }

        Ok(Self {
            report,
            category_means,
            default_seconds,
        })
    }

    /// The global default duration, in seconds.
    pub fn default_seconds(&self) -> f64 {
        self.default_seconds
    }

    pub fn report(&self) -> &DurationReport {
        &self.report
    }

    /// The historical mean for `category`, if the report has entries for it.
    pub fn category_mean(&self, category: TestCategory) -> Option<f64> {
        self.category_means.get(&category).copied()
    }

    /// Resolves the duration of `file` and records where it came from.
    pub fn resolve(&self, category: TestCategory, file: &TestFile) -> Estimate {
        if let Some(seconds) = self.report.get(file) {
            return Estimate {
                seconds,
                source: EstimateSource::Report,
            };
        }
        if let Some(seconds) = self.category_mean(category) {
            return Estimate {
                seconds,
                source: EstimateSource::CategoryMean,
            };
        }
        Estimate {
            seconds: self.default_seconds,
            source: EstimateSource::Default,
        }
    }

    /// Returns the expected run time of `file`, in seconds. Always positive.
    pub fn estimate(&self, category: TestCategory, file: &TestFile) -> f64 {
        self.resolve(category, file).seconds
    }

    /// Mean resolved duration over a category's files.
    ///
    /// Returns `None` for an empty file list. With an empty report the mean
    /// is exactly the global default.
    pub fn category_average(
        &self,
        category: TestCategory,
        files: &[TestFile],
    ) -> Option<CategoryEstimate> {
        if files.is_empty() {
            return None;
        }

        if self.report.is_empty() {
            return Some(CategoryEstimate {
                category,
                mean_seconds: self.default_seconds,
                report_hits: 0,
                category_mean_hits: 0,
                default_hits: files.len(),
            });
        }

        let mut estimate = CategoryEstimate {
            category,
            mean_seconds: 0.0,
            report_hits: 0,
            category_mean_hits: 0,
            default_hits: 0,
        };
        let mut mean = 0.0;
        for (i, file) in files.iter().enumerate() {
            let resolved = self.resolve(category, file);
            mean += (resolved.seconds - mean) / (i + 1) as f64;
            match resolved.source {
                EstimateSource::Report => estimate.report_hits += 1,
                EstimateSource::CategoryMean => estimate.category_mean_hits += 1,
                EstimateSource::Default => estimate.default_hits += 1,
            }
        }
        estimate.mean_seconds = mean;
        Some(estimate)
    }
}

/// Arithmetic mean computed incrementally.
///
/// The running value stays between the smallest and largest input, so
/// finite inputs give a finite mean however large their sum would be.
fn running_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut mean = 0.0;
    let mut count = 0usize;
    for x in values {
        count += 1;
        mean += (x - mean) / count as f64;
    }
    (count > 0).then_some(mean)
}
