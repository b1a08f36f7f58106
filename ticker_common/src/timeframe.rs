//! Aggregation windows shared between the engine and the dashboard.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::TrackerError;

/// Aggregation window a ticker snapshot represents.
///
/// The string form of each variant is the event-type tag carried in the `e`
/// field of a raw ticker record. Short aliases (`1h`, `4h`, `24h`) are
/// accepted when parsing selector input.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum Timeframe {
    /// Rolling 1 hour window.
    #[serde(rename = "1hTicker")]
    #[strum(to_string = "1hTicker", serialize = "1h")]
    #[value(name = "1hTicker", alias = "1h")]
    OneHour,
    /// Rolling 4 hour window.
    #[serde(rename = "4hTicker")]
    #[strum(to_string = "4hTicker", serialize = "4h")]
    #[value(name = "4hTicker", alias = "4h")]
    FourHours,
    /// Rolling 24 hour window, the dashboard default.
    #[default]
    #[serde(rename = "24hrMiniTicker")]
    #[strum(to_string = "24hrMiniTicker", serialize = "24h")]
    #[value(name = "24hrMiniTicker", alias = "24h")]
    Day,
}

impl Timeframe {
    /// Event-type tag matched exactly against the `e` field of raw records.
    pub fn tag(self) -> &'static str {
        match self {
            Timeframe::OneHour => "1hTicker",
            Timeframe::FourHours => "4hTicker",
            Timeframe::Day => "24hrMiniTicker",
        }
    }

    /// Short human label (`1h`, `4h`, `24h`).
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::FourHours => "4h",
            Timeframe::Day => "24h",
        }
    }

    /// Length of the window in hours.
    pub fn hours(self) -> u32 {
        match self {
            Timeframe::OneHour => 1,
            Timeframe::FourHours => 4,
            Timeframe::Day => 24,
        }
    }

    /// Label for an arbitrary event-type tag; unrecognized tags read as `24h`.
    pub fn label_for(tag: &str) -> &'static str {
        Timeframe::iter()
            .find(|t| t.tag() == tag)
            .unwrap_or(Timeframe::Day)
            .label()
    }

    /// Parses selector input (a tag or a short alias, case-insensitive).
    pub fn parse_selector(input: &str) -> Result<Self, TrackerError> {
        let trimmed = input.trim();
        trimmed
            .parse::<Self>()
            .map_err(|_| TrackerError::InvalidTimeframe(trimmed.to_string()))
    }
}
