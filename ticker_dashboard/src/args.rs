//! Command-line arguments for the ticker dashboard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use ticker_common::Timeframe;
use ticker_common::source::{DEFAULT_REFRESH_SECS, DEFAULT_SOURCE};

/// How each refreshed snapshot is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Three ranked tables for a terminal.
    #[default]
    Text,
    /// One JSON document per refresh.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Ticker snapshot to load: a file path or an http(s):// URL.
    #[clap(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Timeframe selected at startup.
    #[clap(long, value_enum, default_value_t = Timeframe::Day)]
    pub timeframe: Timeframe,

    /// Seconds between two scheduled reloads.
    #[clap(long, default_value_t = DEFAULT_REFRESH_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Load and print a single snapshot, then exit.
    #[clap(long)]
    pub once: bool,
}

impl Args {
    /// Snapshot location with surrounding whitespace and matching quotes removed.
    ///
    /// This allows passing Windows paths in quotes without breaking parsing.
    pub fn normalized_source(&self) -> String {
        let trimmed = self.source.trim();
        trimmed
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(trimmed)
            .to_string()
    }
}
