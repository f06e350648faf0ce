// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `suite-lanes plan` command: the full pipeline.
//!
//! ```text
//! file list + report ──► Scheduler::plan ──► JsonEmitter ──► stdout | --output
//! ```

use duration_model::DurationReport;
use scheduler::{JsonEmitter, PlanEmitter, PlanOutcome, SchedulerConfig};
use std::path::PathBuf;

pub struct PlanArgs {
    pub files: PathBuf,
    pub report: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub job_budget: Option<String>,
    pub max_lanes: Option<usize>,
    pub compact: bool,
}

pub fn execute(mut config: SchedulerConfig, args: PlanArgs) -> anyhow::Result<()> {
    if let Some(budget) = &args.job_budget {
        config.job_budget_seconds = lane_planner::parse_seconds(budget)
            .map_err(|e| anyhow::anyhow!("invalid --job-budget: {e}"))?;
    }
    if let Some(max_lanes) = args.max_lanes {
        config.max_lanes = max_lanes;
    }

    let scheduler = config.validate()?;
    let files = super::load_files(&args.files)?;
    let report = DurationReport::load_or_empty(args.report.as_deref());

    let outcome = scheduler.plan(files.as_slice(), report)?;

    let emitter = if args.compact {
        JsonEmitter::new()
    } else {
        JsonEmitter::pretty()
    };
    let document = emitter.emit(&outcome)?;

    let Some(output) = args.output else {
        print!("{document}");
        return Ok(());
    };

    std::fs::write(&output, &document)
        .map_err(|e| anyhow::anyhow!("failed to write '{}': {e}", output.display()))?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              suite-lanes · Lane Planner              ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    print_outcome(&outcome, scheduler.planner().budget());
    println!("  Wrote {} document to {}", emitter.name(), output.display());

    Ok(())
}

fn print_outcome(outcome: &PlanOutcome, budget: &lane_planner::LaneBudget) {
    let Some(plan) = outcome.plan() else {
        println!("  No test files: emitted no-op document.");
        println!();
        return;
    };

    println!("  Budget: {budget}");
    println!();
    println!(
        "  {:<22} {:>7} {:>6} {:>10} {:>10} {:>9}",
        "Category", "Files", "Lanes", "Files/lane", "Avg file", "Est. lane",
    );
    println!("  {}", "-".repeat(70));

    for c in &plan.categories {
        println!(
            "  {:<22} {:>7} {:>6} {:>10} {:>9.1}s {:>8.0}s{}",
            c.category.as_str(),
            c.num_files(),
            c.lanes,
            c.files_per_lane,
            c.avg_file_duration_seconds,
            c.estimated_lane_seconds,
            if c.capped { "  (capped)" } else { "" },
        );
    }

    println!("  {}", "-".repeat(70));
    println!(
        "  {:<22} {:>7} {:>6}",
        "Total",
        plan.total_files(),
        plan.total_lanes(),
    );
    if !plan.unclassified_files.is_empty() {
        println!(
            "  {} unclassified files were not scheduled.",
            plan.unclassified_files.len()
        );
    }
    println!();
}
