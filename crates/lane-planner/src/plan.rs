// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Lane plan: the output of the partition planner.
//!
//! A plan is an ordered list of [`CategoryPlan`]s, one per non-empty
//! category, in rule declaration order. It is the contract between the
//! scheduler and whatever renders the downstream pipeline document.

use crate::{LaneBudget, PlannerError};
use std::collections::HashSet;
use test_catalog::{TestCategory, TestFile};

/// Files and lane count for one category.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryPlan {
    /// The category these files belong to.
    pub category: TestCategory,
    /// Files to distribute across the lanes, in input order.
    pub files: Vec<TestFile>,
    /// Number of parallel lanes. `1 ≤ lanes ≤ max_lanes`.
    pub lanes: usize,
    /// Files one lane can run within the target duration.
    pub files_per_lane: usize,
    /// Representative per-file duration the lane count is based on.
    pub avg_file_duration_seconds: f64,
    /// Expected runtime of the fullest lane, setup included.
    pub estimated_lane_seconds: f64,
    /// Whether the lane cap reduced the lane count.
    pub capped: bool,
}

impl CategoryPlan {
    /// Returns the number of files in this category.
    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the fullest lane is expected to overrun `budget`.
    pub fn exceeds_budget(&self, budget: &LaneBudget) -> bool {
        self.estimated_lane_seconds > budget.job_budget_seconds()
    }
}

/// The complete plan produced by a [`crate::PartitionPlanner`].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Plan {
    /// Per-category plans in rule declaration order.
    pub categories: Vec<CategoryPlan>,
    /// Input files no rule claimed. They are not scheduled.
    pub unclassified_files: Vec<TestFile>,
    /// The budget used for planning.
    pub budget: LaneBudget,
}

impl Plan {
    /// Returns the plan for `category`, if it has any files.
    pub fn get(&self, category: TestCategory) -> Option<&CategoryPlan> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Lane count for `category`; zero when the category has no files.
    pub fn lanes(&self, category: TestCategory) -> usize {
        self.get(category).map_or(0, |c| c.lanes)
    }

    /// Returns the number of planned categories.
    pub fn num_categories(&self) -> usize {
        self.categories.len()
    }

    /// Returns the total number of lanes across all categories.
    pub fn total_lanes(&self) -> usize {
        self.categories.iter().map(|c| c.lanes).sum()
    }

    /// Returns the number of scheduled files.
    pub fn total_files(&self) -> usize {
        self.categories.iter().map(|c| c.num_files()).sum()
    }

    /// Validates the plan.
    ///
    /// Checks:
    /// - No category appears twice.
    /// - Every category has files and `1 ≤ lanes ≤ max_lanes`.
    /// - `files_per_lane ≥ 1`.
    /// - No file is scheduled twice or also listed as unclassified.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let max_lanes = self.budget.max_lanes();
        let mut categories = HashSet::new();
        let mut files = HashSet::new();

        for plan in &self.categories {
            if !categories.insert(plan.category) {
                return Err(PlannerError::InvalidPlan(format!(
                    "category '{}' planned twice",
                    plan.category
                )));
            }

            if plan.files.is_empty() {
                return Err(PlannerError::InvalidPlan(format!(
                    "category '{}' has no files",
                    plan.category
                )));
            }

            if plan.lanes == 0 || plan.lanes > max_lanes {
                return Err(PlannerError::InvalidPlan(format!(
                    "category '{}' has {} lanes, expected 1..={max_lanes}",
                    plan.category, plan.lanes,
                )));
            }

            if plan.files_per_lane == 0 {
                return Err(PlannerError::InvalidPlan(format!(
                    "category '{}' plans zero files per lane",
                    plan.category
                )));
            }

            for file in &plan.files {
                if !files.insert(file) {
                    return Err(PlannerError::InvalidPlan(format!(
                        "file '{file}' scheduled more than once"
                    )));
                }
            }
        }

        if let Some(file) = self.unclassified_files.iter().find(|f| files.contains(f)) {
            return Err(PlannerError::InvalidPlan(format!(
                "file '{file}' is both scheduled and unclassified"
            )));
        }

        Ok(())
    }

    /// Returns a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let per_category: Vec<String> = self
            .categories
            .iter()
            .map(|c| {
                format!(
                    "{}={}x{}{}",
                    c.category,
                    c.lanes,
                    c.files_per_lane,
                    if c.capped { "(capped)" } else { "" },
                )
            })
            .collect();

        format!(
            "Plan: {} categories, {} files, {} lanes total, {} unclassified, \
             target {:.0}s/lane, lanes x files/lane: [{}]",
            self.num_categories(),
            self.total_files(),
            self.total_lanes(),
            self.unclassified_files.len(),
            self.budget.target_seconds_per_lane(),
            per_category.join(", "),
        )
    }
}

/// Builder helper for constructing a `Plan` incrementally.
///
/// Used internally by the planner.
pub(crate) struct PlanBuilder {
    budget: LaneBudget,
    categories: Vec<CategoryPlan>,
    unclassified_files: Vec<TestFile>,
}

impl PlanBuilder {
    /// Creates a new builder.
    pub fn new(budget: LaneBudget) -> Self {
        Self {
            budget,
            categories: Vec::new(),
            unclassified_files: Vec::new(),
        }
    }

    /// Appends a category plan.
    pub fn add_category(&mut self, plan: CategoryPlan) {
        self.categories.push(plan);
    }

    /// Records the files no rule claimed.
    pub fn set_unclassified(&mut self, files: Vec<TestFile>) {
        self.unclassified_files = files;
    }

    /// Consumes the builder and returns the finished plan.
    pub fn build(self) -> Plan {
        Plan {
            categories: self.categories,
            unclassified_files: self.unclassified_files,
            budget: self.budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(prefix: &str, n: usize) -> Vec<TestFile> {
        (0..n).map(|i| TestFile::new(format!("{prefix}/f{i}_spec.rb"))).collect()
    }

    fn category(category: TestCategory, files: Vec<TestFile>, lanes: usize) -> CategoryPlan {
        CategoryPlan {
            category,
            files,
            lanes,
            files_per_lane: 10,
            avg_file_duration_seconds: 10.0,
            estimated_lane_seconds: 280.0,
            capped: false,
        }
    }

    fn sample_plan() -> Plan {
        Plan {
            categories: vec![
                category(TestCategory::Unit, files("spec/models", 25), 3),
                category(TestCategory::System, files("spec/features", 4), 1),
            ],
            unclassified_files: vec![TestFile::from("spec/spec_helper.rb")],
            budget: LaneBudget::gitlab(),
        }
    }

    #[test]
    fn test_validate_ok() {
        sample_plan().validate().unwrap();
    }

    #[test]
    fn test_totals() {
        let plan = sample_plan();
        assert_eq!(plan.num_categories(), 2);
        assert_eq!(plan.total_lanes(), 4);
        assert_eq!(plan.total_files(), 29);
        assert_eq!(plan.lanes(TestCategory::Unit), 3);
        assert_eq!(plan.lanes(TestCategory::Migration), 0);
    }

    #[test]
    fn test_validate_empty_plan_ok() {
        let plan = PlanBuilder::new(LaneBudget::gitlab()).build();
        plan.validate().unwrap();
    }

    #[test]
    fn test_validate_zero_lanes() {
        let mut plan = sample_plan();
        plan.categories[0].lanes = 0;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_over_cap() {
        let mut plan = sample_plan();
        plan.categories[0].lanes = 51;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_empty_category() {
        let mut plan = sample_plan();
        plan.categories[1].files.clear();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_category() {
        let mut plan = sample_plan();
        plan.categories[1].category = TestCategory::Unit;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_file_in_two_categories() {
        let mut plan = sample_plan();
        let shared = plan.categories[0].files[0].clone();
        plan.categories[1].files.push(shared);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_scheduled_and_unclassified() {
        let mut plan = sample_plan();
        let shared = plan.categories[0].files[0].clone();
        plan.unclassified_files.push(shared);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_summary() {
        let s = sample_plan().summary();
        assert!(s.contains("2 categories"));
        assert!(s.contains("4 lanes total"));
        assert!(s.contains("1 unclassified"));
        assert!(s.contains("unit=3x10"));
    }

    #[test]
    fn test_plan_builder() {
        let mut b = PlanBuilder::new(LaneBudget::gitlab());
        b.add_category(category(TestCategory::Migration, files("spec/migrations", 2), 1));
        b.set_unclassified(files("tmp", 1));
        let plan = b.build();

        assert_eq!(plan.num_categories(), 1);
        assert_eq!(plan.unclassified_files.len(), 1);
        plan.validate().unwrap();
    }

    #[test]
    fn test_exceeds_budget() {
        let mut c = category(TestCategory::Unit, files("spec/models", 1), 1);
        assert!(!c.exceeds_budget(&LaneBudget::gitlab()));
        c.estimated_lane_seconds = 601.0;
        assert!(c.exceeds_budget(&LaneBudget::gitlab()));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(sample_plan()).unwrap();
        assert_eq!(json["categories"][0]["category"], "unit");
        assert_eq!(json["categories"][0]["lanes"], 3);
    }
}
