// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: file list → classification → estimation → lanes → document.
//!
//! These tests drive the scheduler exactly as the CLI does, proving that
//! the catalog, duration model and lane planner compose correctly.

use duration_model::DurationReport;
use scheduler::{JsonEmitter, PlanEmitter, PlanOutcome, Scheduler, SchedulerConfig, NO_OP_REASON};
use std::io::Write;
use test_catalog::{FileList, TestCategory, TestFile};

// ── Helpers ────────────────────────────────────────────────────

fn scheduler(default_seconds: f64) -> Scheduler {
    Scheduler::new(SchedulerConfig {
        default_file_duration_seconds: Some(default_seconds),
        ..Default::default()
    })
    .unwrap()
}

fn files(prefix: &str, n: usize) -> Vec<TestFile> {
    (0..n)
        .map(|i| TestFile::new(format!("{prefix}/f{i}_spec.rb")))
        .collect()
}

fn planned(outcome: PlanOutcome) -> lane_planner::Plan {
    outcome.into_plan().expect("expected a plan, got no-op")
}

// ── Lane counts ────────────────────────────────────────────────

#[test]
fn hundred_unit_files_need_three_lanes() {
    let plan = planned(
        scheduler(10.2)
            .plan(&files("spec/models", 100), DurationReport::empty())
            .unwrap(),
    );

    assert_eq!(plan.num_categories(), 1);
    let unit = plan.get(TestCategory::Unit).unwrap();
    assert_eq!(unit.files_per_lane, 41);
    assert_eq!(unit.lanes, 3);
    assert_eq!(unit.files.len(), 100);
}

#[test]
fn lane_cap_is_never_exceeded() {
    let plan = planned(
        scheduler(1.0)
            .plan(&files("spec/lib", 100_000), DurationReport::empty())
            .unwrap(),
    );

    let unit = plan.get(TestCategory::Unit).unwrap();
    assert_eq!(unit.files_per_lane, 420);
    assert_eq!(unit.lanes, 50);
    assert!(unit.capped);
}

#[test]
fn every_category_gets_at_least_one_lane() {
    let mut input = files("spec/migrations", 1);
    input.extend(files("spec/lib/gitlab/background_migration", 1));
    input.extend(files("spec/models", 1));
    input.extend(files("spec/requests", 1));
    input.extend(files("ee/spec/features", 1));

    let plan = planned(scheduler(10.2).plan(&input, DurationReport::empty()).unwrap());

    assert_eq!(plan.num_categories(), 5);
    for category in TestCategory::ALL {
        assert_eq!(plan.lanes(category), 1, "{category}");
    }
}

// ── No-op ──────────────────────────────────────────────────────

#[test]
fn empty_input_emits_no_op_document() {
    let outcome = scheduler(10.2)
        .plan(FileList::parse("  \n ").as_slice(), DurationReport::empty())
        .unwrap();
    assert!(outcome.is_empty());

    let doc = JsonEmitter::new().emit(&outcome).unwrap();
    let json: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(json["no_op"], true);
    assert_eq!(json["reason"], NO_OP_REASON);
}

#[test]
fn unmatched_input_plans_nothing_but_is_not_no_op() {
    let input = FileList::parse("spec/spec_helper.rb qa/specs/login_spec.rb");
    let plan = planned(
        scheduler(10.2)
            .plan(input.as_slice(), DurationReport::empty())
            .unwrap(),
    );

    assert_eq!(plan.num_categories(), 0);
    assert_eq!(plan.total_lanes(), 0);
    assert_eq!(plan.unclassified_files.len(), 2);
}

// ── Durations ──────────────────────────────────────────────────

#[test]
fn report_hits_category_means_and_default() {
    let report = DurationReport::from_json(
        r#"{
            "spec/features/f0_spec.rb": 140.0,
            "spec/features/other_spec.rb": 140.0,
            "spec/models/measured_spec.rb": 5.0
        }"#,
    )
    .unwrap();

    // Six system files: one measured, five at the system mean (140s).
    // Two migration files: no report data for the category, default 10.2s.
    let mut input = files("spec/features", 6);
    input.extend(files("spec/migrations", 2));

    let plan = planned(scheduler(10.2).plan(&input, report).unwrap());

    let system = plan.get(TestCategory::System).unwrap();
    assert_eq!(system.avg_file_duration_seconds, 140.0);
    assert_eq!(system.files_per_lane, 3);
    assert_eq!(system.lanes, 2);

    let migration = plan.get(TestCategory::Migration).unwrap();
    assert_eq!(migration.avg_file_duration_seconds, 10.2);
    assert_eq!(migration.lanes, 1);
}

#[test]
fn report_loaded_from_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(
        tmp,
        r#"{{"spec/requests/f0_spec.rb": 210.0, "spec/requests/f1_spec.rb": 210.0, "broken": "n/a"}}"#
    )
    .unwrap();

    let report = DurationReport::load_or_empty(Some(tmp.path()));
    assert_eq!(report.len(), 2);

    let plan = planned(
        scheduler(10.2)
            .plan(&files("spec/requests", 4), report)
            .unwrap(),
    );
    // 420 / 210 = 2 files per lane.
    assert_eq!(plan.lanes(TestCategory::Integration), 2);
}

#[test]
fn extreme_report_durations_still_emit_a_plan() {
    let report = DurationReport::from_json(
        r#"{"spec/models/a_spec.rb": 1e308, "spec/models/b_spec.rb": 1e308}"#,
    )
    .unwrap();
    let mut input = files("spec/models", 60);
    input.push(TestFile::from("spec/models/a_spec.rb"));
    input.push(TestFile::from("spec/models/b_spec.rb"));

    let outcome = scheduler(10.2).plan(&input, report).unwrap();
    let unit = outcome.plan().unwrap().get(TestCategory::Unit).unwrap().clone();
    assert!(unit.avg_file_duration_seconds.is_finite());
    assert!(unit.estimated_lane_seconds.is_finite());
    assert_eq!(unit.lanes, 50);

    let doc = JsonEmitter::new().emit(&outcome).unwrap();
    let json: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert!(json["categories"][0]["estimated_lane_seconds"].is_f64());
}

#[test]
fn missing_report_falls_back_to_default() {
    let report = DurationReport::load_or_empty(Some(std::path::Path::new(
        "/nonexistent/knapsack_report.json",
    )));
    assert!(report.is_empty());

    let plan = planned(scheduler(10.2).plan(&files("spec/models", 100), report).unwrap());
    assert_eq!(plan.lanes(TestCategory::Unit), 3);
}

// ── Rule order ─────────────────────────────────────────────────

#[test]
fn first_matching_rule_claims_the_file() {
    let input = FileList::parse(
        "spec/lib/gitlab/background_migration/backfill_spec.rb spec/lib/gitlab/utils_spec.rb",
    );

    let plan = planned(
        scheduler(10.2)
            .plan(input.as_slice(), DurationReport::empty())
            .unwrap(),
    );
    assert_eq!(plan.get(TestCategory::BackgroundMigration).unwrap().files.len(), 1);
    assert_eq!(plan.get(TestCategory::Unit).unwrap().files.len(), 1);

    // Declaring `unit` first lets it claim the background migration too.
    let config = SchedulerConfig::from_toml(
        r#"
default_file_duration_seconds = 10.2

[[rules]]
category = "unit"
pattern = '^spec/lib/'

[[rules]]
category = "background_migration"
pattern = '^spec/lib/gitlab/background_migration/'
"#,
    )
    .unwrap();
    let plan = planned(
        Scheduler::new(config)
            .unwrap()
            .plan(input.as_slice(), DurationReport::empty())
            .unwrap(),
    );
    assert_eq!(plan.get(TestCategory::Unit).unwrap().files.len(), 2);
    assert!(plan.get(TestCategory::BackgroundMigration).is_none());
}

// ── Determinism ────────────────────────────────────────────────

#[test]
fn identical_input_emits_identical_bytes() {
    let input = FileList::parse(
        "spec/models/a_spec.rb spec/features/b_spec.rb ee/spec/migrations/c_spec.rb tmp/d.rb",
    );
    let report_json = r#"{"spec/models/a_spec.rb": 3.5, "spec/features/b_spec.rb": 90.0}"#;
    let emitter = JsonEmitter::pretty();

    let render = || {
        let outcome = scheduler(10.2)
            .plan(input.as_slice(), DurationReport::from_json(report_json).unwrap())
            .unwrap();
        emitter.emit(&outcome).unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn duplicate_input_files_are_scheduled_once() {
    let input = FileList::parse("spec/models/a_spec.rb spec/models/a_spec.rb");
    let plan = planned(
        scheduler(10.2)
            .plan(input.as_slice(), DurationReport::empty())
            .unwrap(),
    );
    assert_eq!(plan.total_files(), 1);
}
