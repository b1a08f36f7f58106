//! Ticker Dashboard — a terminal view of the hottest, best, and worst performing
//! USDT pairs in a ticker snapshot. It loads the snapshot from a file or URL,
//! ranks it for the selected timeframe, and reprints three tables on every
//! refresh (on start, every `--interval-secs`, and whenever the timeframe is
//! switched from stdin).
//!
//! Usage example (CLI):
//! ```bash
//! ticker_dashboard --source ./public/tickers.json --timeframe 4h
//! ticker_dashboard --source https://example.com/tickers.json --once --format json
//! ```
//!
//! While running, type `1h`, `4h`, or `24h` and press Enter to switch timeframe,
//! `r` to reload, or `q` to quit. See `selector` for details.
#![warn(missing_docs)]
mod args;
mod selector;
mod view;

use crate::args::{Args, OutputFormat};
use crate::selector::TimeframeSelector;
use crate::view::table::{render_dashboard, render_json};
use clap::Parser;
use log::{error, info, warn};
use std::io::{IsTerminal, Write};
use std::time::Duration;
use ticker_common::{Result, TrackerError};
use ticker_engine::source::source_for;
use ticker_engine::{DashboardSnapshot, DriverCommand, RefreshDriver, SnapshotEvent};

/// ANSI sequence clearing the screen and homing the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes one snapshot to stdout in the requested format.
fn print_snapshot(snapshot: &DashboardSnapshot, format: OutputFormat, clear: bool) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => {
            if clear {
                write!(stdout, "{CLEAR_SCREEN}")?;
            }
            write!(stdout, "{}", render_dashboard(snapshot))?;
        }
        OutputFormat::Json => writeln!(stdout, "{}", render_json(snapshot)?)?,
    }
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<(), TrackerError> {
    init_logger();
    let args = Args::parse();
    let location = args.normalized_source();
    let source = source_for(&location)?;

    let mut driver = RefreshDriver::new(source, args.timeframe)
        .with_interval(Duration::from_secs(args.interval_secs));

    if args.once {
        let snapshot = driver.refresh_once()?;
        print_snapshot(&snapshot, args.format, false)?;
        if let Some(e) = &snapshot.error {
            return Err(TrackerError::from(e));
        }
        return Ok(());
    }

    let updates = driver.subscribe();
    let handle = driver.start();
    {
        let commands = handle.commands();
        if let Err(e) = ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down dashboard...");
            let _ = commands.send(DriverCommand::Shutdown);
        }) {
            warn!("Ctrl+C handler not installed: {}", e);
        }
    }
    TimeframeSelector::start_stdin_thread(handle.commands());

    let clear = std::io::stdout().is_terminal();
    info!("Dashboard is running. Press Ctrl+C or type q to exit.");
    for event in updates.iter() {
        match event {
            SnapshotEvent::Updated(snapshot) => {
                if let Err(e) = print_snapshot(&snapshot, args.format, clear) {
                    error!("Failed to print dashboard: {}", e);
                    break;
                }
            }
            SnapshotEvent::Shutdown => break,
        }
    }

    handle.shutdown()
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
