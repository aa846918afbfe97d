use std::sync::LazyLock;

use regex::Regex;

use crate::model::{AmountSide, Side};

static AMOUNT_WITH_SIDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(-?\d+(?:\.\d+)?)\s*(dr|cr)?$").expect("amount pattern is valid")
});

/// Parses a balance cell such as `"1,234.50 Dr"` into an amount and side.
///
/// Anything that is not a number, with or without a trailing `Dr`/`Cr`
/// marker, yields an empty [`AmountSide`].
pub fn parse_amount_side(text: &str) -> AmountSide {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AmountSide::default();
    }

    let cleaned = strip_thousands(trimmed);
    if let Some(captures) = AMOUNT_WITH_SIDE.captures(&cleaned) {
        let amount = captures
            .get(1)
            .and_then(|digits| digits.as_str().parse::<f64>().ok());
        let side = captures.get(2).and_then(|marker| parse_side(marker.as_str()));
        if amount.is_some() {
            return AmountSide { amount, side };
        }
    }

    AmountSide {
        amount: parse_number(&cleaned),
        side: None,
    }
}

/// Parses a transaction cell as a bare number; side markers are not expected.
pub fn parse_plain_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_number(&strip_thousands(trimmed))
}

/// Renders a balance the way it is written on export: `"<amount> <side>"`,
/// the amount alone, or an empty string.
pub fn format_amount_side(value: &AmountSide) -> String {
    match (value.amount, value.side) {
        (Some(amount), Some(side)) => format!("{amount} {side}"),
        (Some(amount), None) => amount.to_string(),
        (None, _) => String::new(),
    }
}

fn strip_thousands(text: &str) -> String {
    text.chars().filter(|ch| *ch != ',').collect()
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn parse_side(marker: &str) -> Option<Side> {
    match marker.to_ascii_lowercase().as_str() {
        "dr" => Some(Side::Dr),
        "cr" => Some(Side::Cr),
        _ => None,
    }
}
