//! Normalized coin derived from a raw ticker record.
//!
//! Derivation never fails on a bad numeric field: unparsable values degrade to
//! `0` (volumes) or to the close price (high/low), and the qualification
//! filter later drops records that ended up meaningless (non-positive price,
//! NaN change, zero volume). Numeric strings are read with a leading-prefix
//! rule: `"12.5abc"` reads as `12.5`, `"abc"` as NaN.

use serde::Serialize;
use ticker_common::RawTicker;
use ticker_common::source::QUOTE_ASSET;

/// Substrings marking leveraged or wrapped tokens that never qualify.
pub const EXCLUDED_MARKERS: [&str; 5] = ["UP", "DOWN", "BULL", "BEAR", "1000"];
/// Longest base-asset symbol that still qualifies.
pub const MAX_SYMBOL_LEN: usize = 10;

/// One display-ready coin for the selected timeframe.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedCoin {
    /// Base-asset symbol, quote suffix stripped (`BTCUSDT` -> `BTC`).
    pub symbol: String,
    /// Close price.
    pub price: f64,
    /// Change over the window, in percent.
    pub change_percent: f64,
    /// Change over the window, in quote-asset units.
    pub change_absolute: f64,
    /// Base-asset volume.
    pub volume: f64,
    /// Quote-asset (USD-equivalent) volume.
    pub quote_volume: f64,
    /// Window high.
    pub high: f64,
    /// Window low.
    pub low: f64,
    /// Event type tag of the source record.
    pub event_type: String,
    /// Event time of the source record, epoch milliseconds.
    pub event_time: Option<i64>,
}

impl NormalizedCoin {
    /// Returns `true` when `raw` is a quote-asset pair with a non-empty close price.
    pub fn is_quote_pair(raw: &RawTicker) -> bool {
        let priced = raw.close.as_deref().is_some_and(|c| !c.is_empty());
        priced
            && raw
                .symbol
                .as_deref()
                .is_some_and(|s| s.ends_with(QUOTE_ASSET))
    }

    /// Derives a coin from a quote-asset pair; `None` if `raw` is not one.
    pub fn from_raw(raw: &RawTicker) -> Option<Self> {
        if !Self::is_quote_pair(raw) {
            return None;
        }
        let pair = raw.symbol.as_deref()?;
        let symbol = pair.strip_suffix(QUOTE_ASSET).unwrap_or(pair).to_string();

        let price = parse_number(raw.close.as_deref());
        let open = parse_number(raw.open.as_deref());

        let change_percent = match non_empty(raw.change_percent.as_deref()) {
            Some(p) => parse_number(Some(p)),
            None if open > 0.0 => (price - open) / open * 100.0,
            None => 0.0,
        };
        let change_absolute = match non_empty(raw.change_absolute.as_deref()) {
            Some(p) => parse_number(Some(p)),
            None => price - open,
        };

        Some(Self {
            symbol,
            price,
            change_percent,
            change_absolute,
            volume: parse_or(raw.volume.as_deref(), 0.0),
            quote_volume: parse_or(raw.quote_volume.as_deref(), 0.0),
            high: parse_or(raw.high.as_deref(), price),
            low: parse_or(raw.low.as_deref(), price),
            event_type: raw.event_type.clone().unwrap_or_default(),
            event_time: raw.event_time,
        })
    }

    /// Qualification filter: only coins passing every rule are ranked.
    pub fn qualifies(&self) -> bool {
        self.price > 0.0
            && !self.change_percent.is_nan()
            && self.volume > 0.0
            && symbol_qualifies(&self.symbol)
    }
}

/// NaN fields compare equal to NaN, so identical derivations are always equal.
impl PartialEq for NormalizedCoin {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && same_number(self.price, other.price)
            && same_number(self.change_percent, other.change_percent)
            && same_number(self.change_absolute, other.change_absolute)
            && same_number(self.volume, other.volume)
            && same_number(self.quote_volume, other.quote_volume)
            && same_number(self.high, other.high)
            && same_number(self.low, other.low)
            && self.event_type == other.event_type
            && self.event_time == other.event_time
    }
}

fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Symbol rules: no leveraged/wrapped markers, no leading digit, at most 10 chars.
pub fn symbol_qualifies(symbol: &str) -> bool {
    !EXCLUDED_MARKERS.iter().any(|m| symbol.contains(m))
        && !symbol.chars().next().is_some_and(|c| c.is_ascii_digit())
        && symbol.chars().count() <= MAX_SYMBOL_LEN
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parses `value`, substituting `fallback` for absent, unparsable, or zero values.
fn parse_or(value: Option<&str>, fallback: f64) -> f64 {
    let parsed = parse_number(value);
    if parsed.is_nan() || parsed == 0.0 {
        fallback
    } else {
        parsed
    }
}

/// Reads the longest leading decimal number of `value`; NaN when there is none.
pub fn parse_number(value: Option<&str>) -> f64 {
    let Some(text) = value else {
        return f64::NAN;
    };
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let sign = if bytes.first() == Some(&b'-') { -1.0 } else { 1.0 };
        return sign * f64::INFINITY;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
