//! Static glyph table for well-known coins.
//!
//! Symbols missing from the table fall back to their first four characters.

/// Glyph shown next to a coin symbol.
const COIN_ICONS: &[(&str, &str)] = &[
    ("BTC", "₿"),
    ("ETH", "Ξ"),
    ("BNB", "BNB"),
    ("XRP", "XRP"),
    ("ADA", "ADA"),
    ("DOGE", "DOGE"),
    ("SOL", "SOL"),
    ("DOT", "DOT"),
    ("MATIC", "MATIC"),
    ("SHIB", "SHIB"),
    ("TRX", "TRX"),
    ("AVAX", "AVAX"),
    ("LINK", "LINK"),
    ("ATOM", "ATOM"),
    ("LTC", "LTC"),
    ("UNI", "UNI"),
    ("NEAR", "NEAR"),
    ("BCH", "BCH"),
    ("XLM", "XLM"),
    ("ALGO", "ALGO"),
    ("VET", "VET"),
    ("HBAR", "HBAR"),
    ("FIL", "FIL"),
    ("SAND", "SAND"),
    ("MANA", "MANA"),
    ("AXS", "AXS"),
    ("THETA", "THETA"),
    ("EGLD", "EGLD"),
    ("XTZ", "XTZ"),
    ("EOS", "EOS"),
    ("AAVE", "AAVE"),
    ("MKR", "MKR"),
    ("COMP", "COMP"),
    ("SNX", "SNX"),
    ("RUNE", "RUNE"),
    ("YFI", "YFI"),
    ("SUSHI", "SUSHI"),
    ("ZEC", "ZEC"),
    ("WAVES", "WAVE"),
    ("DASH", "DASH"),
    ("ZIL", "ZIL"),
    ("BAT", "BAT"),
    ("ENJ", "ENJ"),
    ("QTUM", "QTUM"),
    ("OMG", "OMG"),
    ("IOTA", "IOTA"),
    ("NEO", "NEO"),
];

/// Number of characters kept for symbols without a glyph.
const FALLBACK_LEN: usize = 4;

/// Glyph for `symbol`, or its first four characters when it has none.
pub fn coin_icon(symbol: &str) -> String {
    COIN_ICONS
        .iter()
        .find(|(known, _)| *known == symbol)
        .map(|(_, icon)| (*icon).to_string())
        .unwrap_or_else(|| symbol.chars().take(FALLBACK_LEN).collect())
}
