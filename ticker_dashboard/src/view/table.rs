//! Renders a `DashboardSnapshot` for the terminal.
//!
//! Layout, top to bottom: a header with the selected timeframe and connection
//! status, a summary line (only once a load has succeeded), then the Hot Coins,
//! Top Gainers, and Top Losers sections.
use std::fmt::Write;

use ticker_common::{Result, Timeframe};
use ticker_engine::{ConnectionStatus, DashboardSnapshot, NormalizedCoin, RankedList};

use crate::view::format::{format_change, format_price, format_price_change, format_volume};
use crate::view::icons::coin_icon;

const TITLE: &str = "Binance Live Tracker";
const RULE_WIDTH: usize = 96;

/// Selector caption for a timeframe.
pub fn timeframe_caption(timeframe: Timeframe) -> String {
    format!("{} Hour", timeframe.hours())
}

/// Full text rendering of `snapshot`.
pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_dashboard(&mut out, snapshot);
    out
}

/// Pretty JSON rendering of `snapshot`.
pub fn render_json(snapshot: &DashboardSnapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

fn write_dashboard(out: &mut String, snapshot: &DashboardSnapshot) -> std::fmt::Result {
    let indicator = match snapshot.status {
        ConnectionStatus::Connected => "●",
        ConnectionStatus::Disconnected => "○",
    };
    writeln!(
        out,
        "{TITLE}  |  {}  |  {indicator} {}",
        timeframe_caption(snapshot.timeframe),
        snapshot.status.label()
    )?;

    if let Some(at) = snapshot.last_update {
        let stats = snapshot.ranking.stats;
        writeln!(
            out,
            "Last updated: {}   Total tickers: {}   USDT pairs: {}   Displayed: {}",
            at.format("%Y-%m-%d %H:%M:%S"),
            stats.total,
            stats.usdt,
            stats.filtered
        )?;
    }

    for list in snapshot.ranking.lists() {
        writeln!(out)?;
        write_section(out, snapshot, list)?;
    }
    Ok(())
}

fn write_section(out: &mut String, snapshot: &DashboardSnapshot, list: &RankedList) -> std::fmt::Result {
    let label = list
        .coins
        .first()
        .map(|c| Timeframe::label_for(&c.event_type))
        .unwrap_or(snapshot.timeframe.label());
    let title = format!("{} ({label})", list.criterion.title());
    writeln!(out, "{title:<80}{:>16}", format!("{} coins", list.len()))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    if let Some(error) = &snapshot.error {
        return writeln!(out, "    {}", error.user_message());
    }
    if list.is_empty() {
        let message = match snapshot.status {
            ConnectionStatus::Connected => "No data available",
            ConnectionStatus::Disconnected => "Loading data...",
        };
        return writeln!(out, "    {message}");
    }

    for (index, coin) in list.coins.iter().enumerate() {
        write_row(out, index + 1, coin)?;
    }
    Ok(())
}

fn write_row(out: &mut String, rank: usize, coin: &NormalizedCoin) -> std::fmt::Result {
    let trend = if coin.change_percent >= 0.0 { "▲" } else { "▼" };
    writeln!(
        out,
        "{rank:>3}  {:<6} {:<10} Vol: {:<10} {:>16}  H: {:<14} L: {:<14} {trend} {:>9}",
        coin_icon(&coin.symbol),
        coin.symbol,
        format_volume(coin.quote_volume),
        format_price(coin.price),
        format_price(coin.high),
        format_price(coin.low),
        format_change(coin.change_percent),
    )?;
    writeln!(out, "{:>96}", format_price_change(coin.change_absolute))
}
