//! Timeframe selector reading commands from stdin.
//!
//! Each non-empty line is one command:
//! - a timeframe tag or alias (`24hrMiniTicker`/`24h`, `4hTicker`/`4h`, `1hTicker`/`1h`),
//! - `r` or `refresh` to reload now,
//! - `q` or `quit` to stop the dashboard,
//! - `?` or `help` to list the commands.
use std::io::BufRead;
use std::thread;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use strum::IntoEnumIterator;
use ticker_common::{Result, Timeframe};
use ticker_engine::DriverCommand;

/// One parsed selector line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorInput {
    /// Switch to a timeframe.
    Select(Timeframe),
    /// Reload immediately.
    Refresh,
    /// Stop the dashboard.
    Quit,
    /// Print the available commands.
    Help,
}

impl SelectorInput {
    /// Parses a single line; blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let trimmed = line.trim();
        let input = match trimmed.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "r" | "refresh" => SelectorInput::Refresh,
            "q" | "quit" | "exit" => SelectorInput::Quit,
            "?" | "h" | "help" => SelectorInput::Help,
            _ => SelectorInput::Select(Timeframe::parse_selector(trimmed)?),
        };
        Ok(Some(input))
    }
}

/// Usage text listing every accepted command.
pub fn help_text() -> String {
    let timeframes: Vec<String> = Timeframe::iter()
        .map(|t| format!("{} ({})", t.label(), t.tag()))
        .collect();
    format!(
        "Commands: {} | r = refresh | q = quit",
        timeframes.join(", ")
    )
}

/// Helper type that forwards selector input to the refresh driver.
pub struct TimeframeSelector;

impl TimeframeSelector {
    /// Reads `reader` line by line and forwards commands until quit, EOF, or a closed driver.
    pub fn forward<R: BufRead>(reader: R, commands: &Sender<DriverCommand>) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            let command = match SelectorInput::parse(&line) {
                Ok(Some(SelectorInput::Select(timeframe))) => {
                    DriverCommand::SelectTimeframe(timeframe)
                }
                Ok(Some(SelectorInput::Refresh)) => DriverCommand::Refresh,
                Ok(Some(SelectorInput::Quit)) => DriverCommand::Shutdown,
                Ok(Some(SelectorInput::Help)) => {
                    info!("{}", help_text());
                    continue;
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!("{}. {}", e, help_text());
                    continue;
                }
            };
            let quit = matches!(command, DriverCommand::Shutdown);
            if commands.send(command).is_err() {
                debug!("Refresh driver is gone, selector stopping");
                break;
            }
            if quit {
                break;
            }
        }
        Ok(())
    }

    /// Spawns a background thread forwarding stdin to `commands`.
    pub fn start_stdin_thread(commands: Sender<DriverCommand>) {
        info!("Selector ready. {}", help_text());
        thread::spawn(move || {
            let stdin = std::io::stdin();
            if let Err(e) = Self::forward(stdin.lock(), &commands) {
                warn!("Selector stopped: {}", e);
            }
            debug!("Selector thread stopping...");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::Cursor;
    use ticker_common::TrackerError;

    #[test]
    fn parses_commands() {
        assert_eq!(SelectorInput::parse("   ").unwrap(), None);
        assert_eq!(
            SelectorInput::parse("4h").unwrap(),
            Some(SelectorInput::Select(Timeframe::FourHours))
        );
        assert_eq!(
            SelectorInput::parse("1hTicker\n").unwrap(),
            Some(SelectorInput::Select(Timeframe::OneHour))
        );
        assert_eq!(SelectorInput::parse("R").unwrap(), Some(SelectorInput::Refresh));
        assert_eq!(SelectorInput::parse("quit").unwrap(), Some(SelectorInput::Quit));
        assert_eq!(SelectorInput::parse("?").unwrap(), Some(SelectorInput::Help));
        assert!(matches!(
            SelectorInput::parse("weekly"),
            Err(TrackerError::InvalidTimeframe(_))
        ));
    }

    #[test]
    fn forwards_until_quit() {
        let (tx, rx) = unbounded();
        let input = Cursor::new("24h\nbogus\n\nr\n?\nq\n1h\n");
        TimeframeSelector::forward(input, &tx).unwrap();

        let received: Vec<DriverCommand> = rx.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert!(matches!(received[0], DriverCommand::SelectTimeframe(Timeframe::Day)));
        assert!(matches!(received[1], DriverCommand::Refresh));
        assert!(matches!(received[2], DriverCommand::Shutdown));
    }

    #[test]
    fn stops_when_driver_is_gone() {
        let (tx, rx) = unbounded();
        drop(rx);
        let input = Cursor::new("4h\n1h\n");
        assert!(TimeframeSelector::forward(input, &tx).is_ok());
    }

    #[test]
    fn help_lists_every_timeframe() {
        let help = help_text();
        for timeframe in Timeframe::iter() {
            assert!(help.contains(timeframe.tag()));
        }
    }
}
