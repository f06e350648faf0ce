// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `suite-lanes classify` command: show how files split into categories.

use super::truncate;
use scheduler::SchedulerConfig;
use std::path::PathBuf;

pub fn execute(config: SchedulerConfig, files: PathBuf, list: bool) -> anyhow::Result<()> {
    let scheduler = config.validate()?;
    let files = super::load_files(&files)?;
    let classification = scheduler.classify(files.as_slice());

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║             suite-lanes · Classification             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Rules ──────────────────────────────────────────────────
    println!("  Rules (first match wins):");
    for (i, rule) in scheduler.classifier().rules().iter().enumerate() {
        println!(
            "   {}. {:<22} {}",
            i + 1,
            rule.category().as_str(),
            truncate(rule.pattern(), 60),
        );
    }
    println!();

    // ── Buckets ────────────────────────────────────────────────
    println!("  {:<22} {:>7}", "Category", "Files");
    println!("  {}", "-".repeat(30));
    for bucket in classification.buckets() {
        println!("  {:<22} {:>7}", bucket.category.as_str(), bucket.len());
        if list {
            for file in &bucket.files {
                println!("      {file}");
            }
        }
    }
    println!("  {}", "-".repeat(30));
    println!(
        "  {:<22} {:>7}",
        "Classified",
        classification.classified_count()
    );
    println!(
        "  {:<22} {:>7}",
        "Unclassified",
        classification.unclassified().len()
    );
    if list {
        for file in classification.unclassified() {
            println!("      {file}");
        }
    }
    println!();

    Ok(())
}
