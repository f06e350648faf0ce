// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `suite-lanes estimate` command: per-category representative durations.
//!
//! Each file's duration comes from the report, else its category's report
//! mean, else the global default. The columns count how many files each
//! source supplied.

use duration_model::DurationReport;
use scheduler::SchedulerConfig;
use std::path::PathBuf;

pub fn execute(
    config: SchedulerConfig,
    files: PathBuf,
    report: Option<PathBuf>,
) -> anyhow::Result<()> {
    let scheduler = config.validate()?;
    let files = super::load_files(&files)?;
    let report = DurationReport::load_or_empty(report.as_deref());
    let report_entries = report.len();

    let estimates = scheduler.estimate(files.as_slice(), report)?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            suite-lanes · Duration Estimate           ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("  Report entries:   {report_entries}");
    println!(
        "  Default duration: {:.2}s/file",
        scheduler.default_file_duration()
    );
    println!();

    println!(
        "  {:<22} {:>7} {:>9} {:>8} {:>8} {:>8}",
        "Category", "Files", "Avg file", "Report", "Cat.mean", "Default",
    );
    println!("  {}", "-".repeat(68));
    for e in &estimates {
        println!(
            "  {:<22} {:>7} {:>8.2}s {:>8} {:>8} {:>8}",
            e.category.as_str(),
            e.num_files(),
            e.mean_seconds,
            e.report_hits,
            e.category_mean_hits,
            e.default_hits,
        );
    }
    if estimates.is_empty() {
        println!("  (no classified files)");
    }
    println!();

    Ok(())
}
