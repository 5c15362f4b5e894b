//! Amount type for handling sponsorship values such as `"$100"` or `"$1,250.50"`.
//!
//! GitHub exports encode money as strings with a leading dollar sign. This module parses those
//! strings into `Decimal` values and formats them back for display.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a dollar amount parsed from an export.
///
/// # Examples
///
/// ```
/// # use sponsor_tiers::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,000").unwrap();
/// assert_eq!(amount.to_string(), "$1,000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount using `symbol` after converting it with `rate`, e.g. `€1,234.50`. The
    /// conversion saturates at `Decimal::MAX`.
    pub fn format_with(&self, symbol: &str, rate: Decimal) -> String {
        format_money(symbol, self.0.saturating_mul(rate))
    }
}

/// Parses a currency string like `"$100"`, `"-$5.25"` or `"1,000.00"` into a `Decimal`.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountError> {
    Amount::from_str(s).map(|a| a.value())
}

/// An error that occurs when a string cannot be parsed as an amount.
pub struct AmountError {
    input: String,
    source: rust_decimal::Error,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "AmountError({:?}, {:?})", self.input, self.source)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid amount '{}': {}", self.input, self.source)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::ZERO);
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let digits = unsigned.strip_prefix('$').unwrap_or(unsigned).replace(',', "");

        // JSON numbers such as 1.5e-7 arrive in exponent notation.
        let value = Decimal::from_str(&digits)
            .or_else(|e| Decimal::from_scientific(&digits).map_err(|_| e))
            .map_err(|source| AmountError {
                input: s.to_string(),
                source,
            })?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&format_money("$", self.0))
    }
}

/// Writes `value` with a sign, currency symbol, thousands separators and two decimals.
fn format_money(symbol: &str, value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let num = value.abs().round_dp(2).to_f64().unwrap_or_default();
    format!("{sign}{symbol}{}", format_num::format_num!(",.2", num))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_whole_dollars() {
        assert_eq!(parse_amount("$100").unwrap(), dec("100"));
    }

    #[test]
    fn test_parse_without_dollar_sign() {
        assert_eq!(parse_amount("42.50").unwrap(), dec("42.50"));
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        assert_eq!(parse_amount("-$5.25").unwrap(), dec("-5.25"));
    }

    #[test]
    fn test_parse_commas_and_whitespace() {
        assert_eq!(parse_amount("  $1,234,567.89 ").unwrap(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_amount("$12abc").unwrap_err();
        assert!(err.to_string().contains("$12abc"), "{err}");
        assert!(parse_amount("five dollars").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec("1234.5")).to_string(), "$1,234.50");
        assert_eq!(Amount::new(dec("-50")).to_string(), "-$50.00");
        assert_eq!(Amount::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_parse_exponent_notation() {
        assert_eq!(parse_amount("1.5e-7").unwrap(), dec("0.00000015"));
        assert_eq!(parse_amount("2E3").unwrap(), dec("2000"));
        assert!(parse_amount("1e").is_err());
    }

    #[test]
    fn test_format_with_saturates() {
        let formatted = Amount::new(Decimal::MAX).format_with("$", Decimal::from(2));
        assert!(formatted.starts_with('$'), "{formatted}");
    }

    #[test]
    fn test_format_with_rate() {
        let rate = Decimal::from_f64(0.5).unwrap();
        assert_eq!(Amount::new(dec("2000")).format_with("€", rate), "€1,000.00");
    }
}
