//! Raw ticker record as it appears in the snapshot document.
//!
//! The snapshot is a JSON array of objects using the exchange's single-letter
//! keys. Records are untrusted: every field is optional, and numeric fields are
//! kept as strings so that parsing (and degrading to defaults) happens in the
//! ranking pipeline instead of failing the whole document. Values that arrive
//! as JSON numbers are accepted and converted to their string form.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single untrusted ticker snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTicker {
    /// Event type, i.e. the timeframe tag (`24hrMiniTicker`, `4hTicker`, `1hTicker`).
    #[serde(rename = "e", default, deserialize_with = "lenient_string")]
    pub event_type: Option<String>,
    /// Event time in milliseconds since the Unix epoch.
    #[serde(rename = "E", default, deserialize_with = "lenient_millis")]
    pub event_time: Option<i64>,
    /// Trading pair symbol, e.g. `BTCUSDT`.
    #[serde(rename = "s", default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    /// Close (current) price.
    #[serde(rename = "c", default, deserialize_with = "lenient_string")]
    pub close: Option<String>,
    /// Open price of the window.
    #[serde(rename = "o", default, deserialize_with = "lenient_string")]
    pub open: Option<String>,
    /// Highest price of the window.
    #[serde(rename = "h", default, deserialize_with = "lenient_string")]
    pub high: Option<String>,
    /// Lowest price of the window.
    #[serde(rename = "l", default, deserialize_with = "lenient_string")]
    pub low: Option<String>,
    /// Traded volume in base-asset units.
    #[serde(rename = "v", default, deserialize_with = "lenient_string")]
    pub volume: Option<String>,
    /// Traded volume in quote-asset units.
    #[serde(rename = "q", default, deserialize_with = "lenient_string")]
    pub quote_volume: Option<String>,
    /// Precomputed percent change, when the feed provides it.
    #[serde(rename = "P", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<String>,
    /// Precomputed absolute change, when the feed provides it.
    #[serde(rename = "p", default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub change_absolute: Option<String>,
}

impl RawTicker {
    /// Decodes a snapshot document (a JSON array of ticker objects).
    ///
    /// Only a document that is not a JSON array fails. Elements that are not
    /// objects decode as an empty record, which no timeframe matches.
    pub fn parse_snapshot(bytes: &[u8]) -> Result<Vec<RawTicker>, serde_json::Error> {
        let values: Vec<Value> = serde_json::from_slice(bytes)?;
        Ok(values
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect())
    }
}

/// Accepts strings and numbers; anything else (null, bool, object) reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
