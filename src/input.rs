//! Parsing of human-formatted amounts and rates
//!
//! Accepts what people type at a prompt: `$1.2M`, `850K`, `$10,000`, `20%`,
//! `[6, 5.5, 5]`, `3-5`. Independent of the engines; the CLI uses these as
//! argument value parsers.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Step between rates in a swept range, in percentage points
pub const RATE_RANGE_STEP: f64 = 0.25;

/// Most rates a range may expand to (0% to 100%)
pub const MAX_RANGE_RATES: usize = 401;

/// Characters stripped around a number
const NUMBER_DECORATIONS: &[char] = &[' ', 'k', 'K', '$', '%', 'M', 'm', ','];

/// Strip decorations and read the bare number
fn parse_number(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let bare: String = trimmed
        .trim_matches(NUMBER_DECORATIONS)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    bare.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(trimmed.to_string()))
}

fn multiplier(input: &str) -> Option<f64> {
    if input.contains(&['k', 'K'][..]) {
        Some(1_000.0)
    } else if input.contains(&['m', 'M'][..]) {
        Some(1_000_000.0)
    } else {
        None
    }
}

/// Parse a dollar amount such as `100000`, `$10,000`, `$100K` or `1.2M`
pub fn parse_amount(input: &str) -> Result<f64, ParseError> {
    let value = parse_number(input)?;
    Ok(value * multiplier(input).unwrap_or(1.0))
}

/// Parse a percentage such as `6.5` or `6.5%`
pub fn parse_percent(input: &str) -> Result<f64, ParseError> {
    let trimmed = input.trim();
    let bare = trimmed.trim_end_matches('%').trim();
    if bare.is_empty() {
        return Err(ParseError::Empty);
    }
    bare.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber(trimmed.to_string()))
}

/// Down payment as typed: a dollar amount or a share of the price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DownPayment {
    Amount(f64),
    /// Percent of the home value
    Percent(f64),
}

impl DownPayment {
    /// Dollar down payment for a given home value
    pub fn resolve(self, home_value: f64) -> f64 {
        match self {
            DownPayment::Amount(amount) => amount,
            DownPayment::Percent(pct) => home_value * pct / 100.0,
        }
    }
}

/// Parse a down payment: `K`/`M` suffixes are amounts, `%` or a bare value
/// up to 100 is a percentage, anything larger is an amount
pub fn parse_down_payment(input: &str) -> Result<DownPayment, ParseError> {
    let value = parse_number(input)?;

    if let Some(scale) = multiplier(input) {
        Ok(DownPayment::Amount(value * scale))
    } else if input.contains('%') || value <= 100.0 {
        Ok(DownPayment::Percent(value))
    } else {
        Ok(DownPayment::Amount(value))
    }
}

/// Parse a comma-separated list of annual rates: `6`, `[6, 5.5, 5]`, `(3%,4%)`
pub fn parse_rate_list(input: &str) -> Result<Vec<f64>, ParseError> {
    let inner = input.trim().trim_matches(&[' ', '[', ']', '(', ')'][..]);
    if inner.is_empty() {
        return Err(ParseError::Empty);
    }
    inner.split(',').map(parse_percent).collect()
}

/// Parse a rate list that must hold one value or one value per year
pub fn parse_rate_series(input: &str, years: u32) -> Result<Vec<f64>, ParseError> {
    let rates = parse_rate_list(input)?;
    if rates.len() == 1 || rates.len() == years as usize {
        Ok(rates)
    } else {
        Err(ParseError::SeriesLength {
            expected: years as usize,
            found: rates.len(),
        })
    }
}

/// Parse a rate range `3-5` into 3.00, 3.25, ..., 5.00
///
/// A single value yields just that rate. The upper bound is included when it
/// falls on the 0.25 grid from the lower bound.
pub fn parse_rate_range(input: &str) -> Result<Vec<f64>, ParseError> {
    let trimmed = input.trim().trim_matches(&['%', ' '][..]);
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let bounds: Vec<&str> = trimmed.split('-').collect();
    let (low, high) = match bounds.as_slice() {
        [single] => {
            let rate = parse_percent(single).map_err(|_| ParseError::InvalidRange(input.to_string()))?;
            (rate, rate)
        }
        [low, high] => {
            let low = parse_percent(low).map_err(|_| ParseError::InvalidRange(input.to_string()))?;
            let high = parse_percent(high).map_err(|_| ParseError::InvalidRange(input.to_string()))?;
            (low, high)
        }
        _ => return Err(ParseError::InvalidRange(input.to_string())),
    };

    if high < low {
        return Err(ParseError::InvalidRange(input.to_string()));
    }

    // Small tolerance keeps the upper bound despite float steps
    let steps = ((high - low + 0.01) / RATE_RANGE_STEP).floor();
    if steps >= MAX_RANGE_RATES as f64 {
        return Err(ParseError::InvalidRange(input.to_string()));
    }
    let steps = steps as usize;
    Ok((0..=steps).map(|i| low + i as f64 * RATE_RANGE_STEP).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_formats() {
        assert_eq!(parse_amount("100000").unwrap(), 100_000.0);
        assert_eq!(parse_amount("$10,000").unwrap(), 10_000.0);
        assert_eq!(parse_amount("$100K").unwrap(), 100_000.0);
        assert_eq!(parse_amount("100k").unwrap(), 100_000.0);
        assert_eq!(parse_amount(" 1.2M ").unwrap(), 1_200_000.0);
        assert_eq!(parse_amount("$1,250").unwrap(), 1_250.0);
    }

    #[test]
    fn test_parse_amount_errors() {
        assert_eq!(parse_amount("   "), Err(ParseError::Empty));
        assert!(matches!(parse_amount("abc"), Err(ParseError::InvalidNumber(_))));
        assert!(matches!(parse_amount("$"), Err(ParseError::InvalidNumber(_))));
    }

    #[test]
    fn test_parse_down_payment() {
        assert_eq!(parse_down_payment("20%").unwrap(), DownPayment::Percent(20.0));
        assert_eq!(parse_down_payment("20").unwrap(), DownPayment::Percent(20.0));
        assert_eq!(parse_down_payment("$150K").unwrap(), DownPayment::Amount(150_000.0));
        assert_eq!(parse_down_payment("150000").unwrap(), DownPayment::Amount(150_000.0));

        assert_eq!(DownPayment::Percent(20.0).resolve(750_000.0), 150_000.0);
        assert_eq!(DownPayment::Amount(90_000.0).resolve(750_000.0), 90_000.0);
    }

    #[test]
    fn test_parse_rate_series() {
        assert_eq!(parse_rate_series("6.5", 5).unwrap(), vec![6.5]);
        assert_eq!(parse_rate_series("[6, 5.5, 5]", 3).unwrap(), vec![6.0, 5.5, 5.0]);
        assert_eq!(parse_rate_series("(3%,4%)", 2).unwrap(), vec![3.0, 4.0]);
        assert_eq!(
            parse_rate_series("3,4", 5),
            Err(ParseError::SeriesLength { expected: 5, found: 2 })
        );
        assert!(matches!(parse_rate_series("3,x", 2), Err(ParseError::InvalidNumber(_))));
    }

    #[test]
    fn test_parse_rate_range() {
        let rates = parse_rate_range("3-5").unwrap();
        assert_eq!(rates.len(), 9);
        assert_eq!(rates[0], 3.0);
        assert_eq!(rates[1], 3.25);
        assert_eq!(rates[8], 5.0);

        assert_eq!(parse_rate_range("6.5%").unwrap(), vec![6.5]);
        assert_eq!(parse_rate_range("4% - 4.5%").unwrap(), vec![4.0, 4.25, 4.5]);
        assert!(matches!(parse_rate_range("5-3"), Err(ParseError::InvalidRange(_))));
        assert!(matches!(parse_rate_range("3-4-5"), Err(ParseError::InvalidRange(_))));
    }

    #[test]
    fn test_parse_rate_range_is_bounded() {
        assert_eq!(parse_rate_range("0-100").unwrap().len(), MAX_RANGE_RATES);
        assert!(matches!(parse_rate_range("0-100.25"), Err(ParseError::InvalidRange(_))));
        assert!(matches!(parse_rate_range("0-1e12"), Err(ParseError::InvalidRange(_))));
    }
}
