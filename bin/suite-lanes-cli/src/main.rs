// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # suite-lanes
//!
//! Command-line interface for test classification and lane planning.
//!
//! ## Usage
//! ```bash
//! # Plan lanes for a changed-file list, using measured durations
//! suite-lanes plan --files rspec_files.txt --report knapsack_report.json --output lanes.json
//!
//! # Show which category each file falls into
//! suite-lanes classify --files rspec_files.txt
//!
//! # Show the per-category durations the plan would use
//! suite-lanes estimate --files rspec_files.txt --report knapsack_report.json
//! ```
//!
//! `--files -` reads the file list from stdin.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "suite-lanes",
    about = "Classify test files by category and size parallel CI lanes",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan lanes and write the pipeline document.
    Plan {
        /// Whitespace-separated test file list ("-" for stdin).
        #[arg(short, long)]
        files: PathBuf,

        /// JSON report of measured per-file durations in seconds.
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Where to write the document (stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Job budget override (e.g. "600", "10m", "1h30m").
        #[arg(long)]
        job_budget: Option<String>,

        /// Lane cap override.
        #[arg(long)]
        max_lanes: Option<usize>,

        /// Emit compact JSON on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Classify files and print the category buckets.
    Classify {
        /// Whitespace-separated test file list ("-" for stdin).
        #[arg(short, long)]
        files: PathBuf,

        /// Also list the files in each bucket.
        #[arg(long)]
        list: bool,
    },

    /// Print the representative per-file duration of each category.
    Estimate {
        /// Whitespace-separated test file list ("-" for stdin).
        #[arg(short, long)]
        files: PathBuf,

        /// JSON report of measured per-file durations in seconds.
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Plan {
            files,
            report,
            output,
            job_budget,
            max_lanes,
            compact,
        } => commands::plan::execute(
            config,
            commands::plan::PlanArgs {
                files,
                report,
                output,
                job_budget,
                max_lanes,
                compact,
            },
        ),
        Commands::Classify { files, list } => commands::classify::execute(config, files, list),
        Commands::Estimate { files, report } => commands::estimate::execute(config, files, report),
        Commands::Config => commands::print_config(&config),
    }
}
