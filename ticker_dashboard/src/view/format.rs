//! Display formatting for prices, volumes, and changes.

/// Formats a price with precision scaled to its magnitude.
///
/// Eight decimals below 0.00001, six below 0.01, four below 1, two below 100,
/// and thousands-grouped with two decimals from 100 up.
pub fn format_price(price: f64) -> String {
    if price < 0.00001 {
        format!("${:.8}", price)
    } else if price < 0.01 {
        format!("${:.6}", price)
    } else if price < 1.0 {
        format!("${:.4}", price)
    } else if price < 100.0 {
        format!("${:.2}", price)
    } else {
        format!("${}", group_thousands(&format!("{:.2}", price)))
    }
}

/// Formats a volume with a B/M/K suffix.
pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000.0 {
        format!("${:.2}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("${:.2}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("${:.2}K", volume / 1_000.0)
    } else {
        format!("${:.2}", volume)
    }
}

/// Formats a percent change with an explicit `+` for non-negative values.
pub fn format_change(change: f64) -> String {
    // -0.0 prints as "-0.00"
    let change = if change == 0.0 { 0.0 } else { change };
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change:.2}%")
}

/// Formats the magnitude of an absolute change, prefixed with `+` when non-negative.
///
/// Negative and NaN changes carry no sign; the trend arrow shows the direction.
pub fn format_price_change(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{}", format_price(change.abs()))
}

/// Inserts `,` between groups of three digits in the integer part of `number`.
fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
