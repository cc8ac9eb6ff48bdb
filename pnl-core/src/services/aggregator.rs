//! Aggregator - totals and profit/loss classification
//!
//! Stateless functions over the entries currently shown in the calendar.
//! Every mutation recomputes the whole month; there is no incremental state.

use rust_decimal::prelude::*;

use crate::domain::{PnlClass, Summary};

/// Parse an entry the way a browser number field is read back: leading
/// whitespace is skipped and the longest numeric prefix wins, so
/// `"12.5abc"` reads as 12.5 and `"abc"` as nothing.
///
/// Non-finite results (`"Infinity"`, overflowing exponents) are rejected.
pub fn parse_amount(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an entry, substituting 0 for anything that is not a number
///
/// Negative zero is stored as plain 0.
pub fn coerce_amount(input: &str) -> f64 {
    match parse_amount(input) {
        Some(v) if v != 0.0 => v,
        _ => 0.0,
    }
}

/// Sum of all entries; missing or unparsable entries count as 0
pub fn compute_total<I>(entries: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    entries.into_iter().map(|e| e.unwrap_or(0.0)).sum()
}

/// Fixed two-decimal rendering, rounding half away from zero on the
/// exact binary value of the amount (`2.675` is stored just below the
/// midpoint and renders as `2.67`; `0.125` is exact and renders as `0.13`)
///
/// Very large amounts print every integer digit, never exponent notation.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    match Decimal::from_f64_retain(amount) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            // Avoid "-0.00" for tiny negative amounts
            let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
            format!("{:.2}", rounded)
        }
        // Beyond Decimal's range there is no fractional part left to round
        None => format!("{:.2}", amount),
    }
}

/// Profit if positive, Loss if negative, Neutral for zero or no value
pub fn classify_entry(amount: Option<f64>) -> PnlClass {
    match amount {
        Some(a) if a > 0.0 => PnlClass::Profit,
        Some(a) if a < 0.0 => PnlClass::Loss,
        _ => PnlClass::Neutral,
    }
}

/// Classify a total by its displayed value, so a total that rounds to
/// "0.00" is Neutral
pub fn classify_total(total: f64) -> PnlClass {
    classify_entry(format_amount(total).parse::<f64>().ok())
}

/// Total, display string and classification in one pass
pub fn summarize<I>(entries: I) -> Summary
where
    I: IntoIterator<Item = Option<f64>>,
{
    let total = compute_total(entries);
    Summary {
        total,
        display: format_amount(total),
        class: classify_total(total),
    }
}

/// Summarize raw cell texts, parsing each the same way as an edit
pub fn summarize_inputs<'a, I>(inputs: I) -> Summary
where
    I: IntoIterator<Item = &'a str>,
{
    summarize(inputs.into_iter().map(parse_amount))
}
