// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rendering a [`PlanOutcome`] into the document consumed downstream.
//!
//! The emitter is the only place that knows the output format. Anything
//! implementing [`PlanEmitter`] can replace [`JsonEmitter`].

use crate::{EmitError, PlanOutcome};
use lane_planner::{CategoryPlan, LaneBudget, Plan};
use serde::Serialize;
use test_catalog::TestFile;

/// Reason attached to the no-op document.
pub const NO_OP_REASON: &str = "no test files to run";

/// Trait for plan renderers.
pub trait PlanEmitter {
    /// Returns the emitter name (e.g. "json").
    fn name(&self) -> &str;

    /// Renders `outcome`. Identical outcomes render identically.
    fn emit(&self, outcome: &PlanOutcome) -> Result<String, EmitError>;
}

/// Emits the plan as a JSON document.
///
/// A plan renders as
/// ```json
/// {
///   "no_op": false,
///   "total_lanes": 3,
///   "categories": [
///     { "category": "unit", "lanes": 3, "files_per_lane": 41, "files": ["..."] }
///   ],
///   "unclassified_files": []
/// }
/// ```
/// and an empty input as `{"no_op": true, "reason": "no test files to run"}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    pretty: bool,
}

impl JsonEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl PlanEmitter for JsonEmitter {
    fn name(&self) -> &str {
        "json"
    }

    fn emit(&self, outcome: &PlanOutcome) -> Result<String, EmitError> {
        let document = match outcome {
            PlanOutcome::Planned(plan) => Document::Plan(PlanDocument::from(plan)),
            PlanOutcome::NoOp => Document::NoOp(NoOpDocument {
                no_op: true,
                reason: NO_OP_REASON,
            }),
        };

        let mut out = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        out.push('\n');
        Ok(out)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Document<'a> {
    Plan(PlanDocument<'a>),
    NoOp(NoOpDocument),
}

#[derive(Serialize)]
struct NoOpDocument {
    no_op: bool,
    reason: &'static str,
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    no_op: bool,
    total_lanes: usize,
    total_files: usize,
    categories: Vec<CategoryDocument<'a>>,
    unclassified_files: &'a [TestFile],
    budget: &'a LaneBudget,
}

#[derive(Serialize)]
struct CategoryDocument<'a> {
    category: &'static str,
    lanes: usize,
    files_per_lane: usize,
    avg_file_duration_seconds: f64,
    estimated_lane_seconds: f64,
    capped: bool,
    files: &'a [TestFile],
}

impl<'a> From<&'a Plan> for PlanDocument<'a> {
    fn from(plan: &'a Plan) -> Self {
        Self {
            no_op: false,
            total_lanes: plan.total_lanes(),
            total_files: plan.total_files(),
            categories: plan.categories.iter().map(CategoryDocument::from).collect(),
            unclassified_files: &plan.unclassified_files,
            budget: &plan.budget,
        }
    }
}

impl<'a> From<&'a CategoryPlan> for CategoryDocument<'a> {
    fn from(c: &'a CategoryPlan) -> Self {
        Self {
            category: c.category.as_str(),
            lanes: c.lanes,
            files_per_lane: c.files_per_lane,
            avg_file_duration_seconds: c.avg_file_duration_seconds,
            estimated_lane_seconds: c.estimated_lane_seconds,
            capped: c.capped,
            files: &c.files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duration_model::DurationReport;
    use test_catalog::FileList;

    fn outcome(files: &str) -> PlanOutcome {
        let scheduler = crate::Scheduler::new(crate::SchedulerConfig {
            default_file_duration_seconds: Some(10.2),
            ..Default::default()
        })
        .unwrap();
        scheduler
            .plan(FileList::parse(files).as_slice(), DurationReport::empty())
            .unwrap()
    }

    #[test]
    fn test_no_op_document() {
        let out = JsonEmitter::new().emit(&PlanOutcome::NoOp).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["no_op"], true);
        assert_eq!(json["reason"], NO_OP_REASON);
        assert!(json.get("categories").is_none());
    }

    #[test]
    fn test_plan_document() {
        let out = JsonEmitter::new()
            .emit(&outcome("spec/models/a_spec.rb spec/features/b_spec.rb tmp/x.rb"))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["no_op"], false);
        assert_eq!(json["total_lanes"], 2);
        assert_eq!(json["categories"][0]["category"], "unit");
        assert_eq!(json["categories"][0]["files"][0], "spec/models/a_spec.rb");
        assert_eq!(json["categories"][1]["category"], "system");
        assert_eq!(json["unclassified_files"][0], "tmp/x.rb");
        assert_eq!(json["budget"]["max_lanes"], 50);
    }

    #[test]
    fn test_emit_is_deterministic() {
        let files = "spec/migrations/m_spec.rb spec/lib/l_spec.rb spec/requests/r_spec.rb";
        let emitter = JsonEmitter::pretty();
        assert_eq!(
            emitter.emit(&outcome(files)).unwrap(),
            emitter.emit(&outcome(files)).unwrap()
        );
    }

    #[test]
    fn test_name() {
        assert_eq!(JsonEmitter::new().name(), "json");
    }
}
