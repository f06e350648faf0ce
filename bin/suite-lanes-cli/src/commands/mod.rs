// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommands and the input loading they share.

pub mod classify;
pub mod estimate;
pub mod plan;

use anyhow::Context;
use scheduler::SchedulerConfig;
use std::io::Read;
use std::path::Path;
use test_catalog::FileList;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `-v` when set. Logs go to stderr so stdout stays
/// clean for the emitted document.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration file, or the stock configuration without one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let config = SchedulerConfig::from_file(path)?;
            tracing::info!("loaded configuration from '{}'", path.display());
            Ok(config)
        }
        None => Ok(SchedulerConfig::default()),
    }
}

/// Reads the test file list from `path`, or stdin for `-`.
pub fn load_files(path: &Path) -> anyhow::Result<FileList> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read file list from stdin")?;
        return Ok(FileList::parse(&text));
    }

    FileList::from_file(path)
        .map_err(|e| anyhow::anyhow!("failed to read file list '{}': {e}", path.display()))
}

/// `suite-lanes config`: prints the effective configuration.
pub fn print_config(config: &SchedulerConfig) -> anyhow::Result<()> {
    // Fail on an invalid config the same way planning would.
    config.clone().validate()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Truncates a string with ellipsis.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
