//! Snapshot source constants shared by the engine and the dashboard.

/// Quote asset every tracked pair must be priced in.
pub const QUOTE_ASSET: &str = "USDT";
/// Maximum number of coins kept in each ranked list.
pub const RANKED_LIST_LEN: usize = 10;
/// Interval between two scheduled snapshot loads, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;
/// Snapshot location used when none is given on the command line.
pub const DEFAULT_SOURCE: &str = "public/tickers.json";

/// Returns `true` when `location` should be fetched over HTTP rather than read from disk.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_remote_locations() {
        assert!(is_remote("https://example.com/tickers.json"));
        assert!(is_remote("  HTTP://localhost:8000/t.json"));
        assert!(!is_remote("public/tickers.json"));
        assert!(!is_remote("/tmp/https.json"));
    }
}
