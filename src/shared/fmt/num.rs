//! Number formatting utilities for human-readable display.
//!
//! Very small prices render with a subscripted zero count instead of
//! scientific notation; large values abbreviate with K/M/B suffixes.

/// Format a price for display.
///
/// Values below 0.01 use subscript notation: `0.0000001234` → `"0.0₆1234"`,
/// where the subscript counts the zeros between the decimal point and the
/// first significant digit. Large values abbreviate: `2.50B`, `1.23M`,
/// `45.60K`. Everything else gets three fixed decimals.
pub fn format_number(value: f64) -> String {
    if value > 0.0 && value < 0.01 {
        if let Some(s) = format_subscript(value) {
            return s;
        }
    }
    if value >= 1e9 {
        return format!("{:.2}B", value / 1e9);
    }
    if value >= 1e6 {
        return format!("{:.2}M", value / 1e6);
    }
    if value >= 1e3 {
        return format!("{:.2}K", value / 1e3);
    }
    format!("{:.3}", value)
}

/// Subscript rendering of a sub-0.01 value, using ten fractional digits of
/// input precision. Returns `None` when no significant digit survives
/// (value below 1e-10), in which case the caller falls back to fixed decimals.
fn format_subscript(value: f64) -> Option<String> {
    let fixed = format!("{:.10}", value);
    let frac = fixed.strip_prefix("0.")?;
    let zeros = frac.chars().take_while(|c| *c == '0').count();
    let rest = frac[zeros..].trim_end_matches('0');
    if rest.is_empty() {
        return None;
    }

    let count: String = zeros
        .to_string()
        .chars()
        .filter_map(subscript_digit)
        .collect();
    Some(format!("0.0{}{}", count, rest))
}

fn subscript_digit(d: char) -> Option<char> {
    Some(match d {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        _ => return None,
    })
}

/// Abbreviate an amount with K/M/B suffixes, trimming trailing zeros.
///
/// Used for token amounts where the subscript branch of [`format_number`]
/// would be noise.
pub fn format_number_with_suffix(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if abs >= 1e9 {
        format!("{}{}B", sign, trim_fixed(abs / 1e9))
    } else if abs >= 1e6 {
        format!("{}{}M", sign, trim_fixed(abs / 1e6))
    } else if abs >= 1e3 {
        format!("{}{}K", sign, trim_fixed(abs / 1e3))
    } else {
        format!("{}{}", sign, trim_fixed(abs))
    }
}

fn trim_fixed(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Round up to two decimal places (leaderboard PnL display rule).
pub fn round_up_2dp(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}
