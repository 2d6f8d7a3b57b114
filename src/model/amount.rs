//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal`, parses values that may or may not
//! include a currency symbol and thousands separators, and stores itself as a plain JSON number.
//!
//! An `Amount` parsed from text has at most two decimal places and at most 15 significant digits,
//! so its JSON number form reads back as the same value.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Represents an amount of money in an unspecified currency.
///
/// `Display` writes the plain decimal value with trailing zeros removed, which is the form used in
/// storage and in CSV exports. Use `Amount::formatted` for human-readable output.
///
/// # Examples
///
/// Parsing with a currency symbol and commas:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("₹1,200.50").unwrap();
/// assert_eq!(amount.to_string(), "1200.5");
/// assert_eq!(amount.formatted("₹"), "₹1,200.50");
/// ```
///
/// Parsing a plain number:
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("100").unwrap();
/// assert!(amount.is_positive());
/// assert_eq!(amount.formatted("$"), "$100.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// The largest magnitude an `Amount` can have, `9999999999999.99`.
    pub const MAX: Amount = Amount(Decimal::from_parts(0xA4C6_7FFF, 0x0003_8D7E, 0, false, 2));

    /// The number of decimal places kept when parsing.
    pub const SCALE: u32 = 2;

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.0.is_sign_negative()
    }

    /// True if the amount has at most `SCALE` decimal places and its magnitude does not exceed
    /// `MAX`. Only such amounts survive storage as a JSON number unchanged.
    pub fn is_storable(&self) -> bool {
        self.0.normalize().scale() <= Self::SCALE && self.0.abs() <= Self::MAX.0
    }

    /// Formats the amount with `symbol` as a prefix, thousands separators and two decimal places,
    /// e.g. `₹1,234.50` or `-$60,000.00`.
    pub fn formatted(&self, symbol: &str) -> String {
        let (sign, num) = if self.is_negative() {
            ("-", self.0.abs())
        } else {
            ("", self.0)
        };
        format!(
            "{sign}{symbol}{}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug)]
pub enum AmountError {
    /// The text is not a number.
    Invalid(rust_decimal::Error),
    /// The number is larger than `Amount::MAX`.
    OutOfRange(String),
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::Invalid(e) => Display::fmt(e, f),
            AmountError::OutOfRange(s) => {
                write!(f, "Amount {s} is out of range, the largest is {}", Amount::MAX)
            }
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AmountError::Invalid(e) => Some(e),
            AmountError::OutOfRange(_) => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Amount::default());
        }

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, trimmed),
        };

        // Drop a leading currency symbol such as "$", "₹" or "Rs."
        let start = unsigned
            .char_indices()
            .find(|&(ix, c)| {
                c.is_ascii_digit()
                    || (c == '.' && unsigned[ix + 1..].starts_with(|n: char| n.is_ascii_digit()))
            })
            .map(|(ix, _)| ix)
            .unwrap_or(unsigned.len());
        let digits = unsigned[start..].replace(',', "");

        let value = Decimal::from_str(&digits)
            .map_err(AmountError::Invalid)?
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        if value > Self::MAX.0 {
            return Err(AmountError::OutOfRange(trimmed.to_string()));
        }
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.0.normalize();
        if value.scale() == 0 {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        let float = f64::from_str(&value.to_string()).map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(float)
    }
}

/// Stored amounts are numbers, but hand-edited or legacy data may hold strings like `"₹50"`.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string holding an amount")
    }

    fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount(Decimal::from(v)))
    }

    // f64 Display is the shortest text that reads back as the same float, which for a storable
    // amount is the amount itself.
    fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Amount, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("Invalid amount {v}")));
        }
        Decimal::from_str(&v.to_string())
            .map(Amount)
            .map_err(|e| E::custom(format!("Invalid amount {v}: {e}")))
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), dec("50"));
    }

    #[test]
    fn test_parse_with_symbol() {
        assert_eq!(Amount::from_str("$50.00").unwrap().value(), dec("50"));
        assert_eq!(Amount::from_str("₹50").unwrap().value(), dec("50"));
        assert_eq!(Amount::from_str("Rs. 50").unwrap().value(), dec("50"));
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-$50.25").unwrap();
        assert_eq!(amount.value(), dec("-50.25"));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_empty_string_is_zero() {
        let amount = Amount::from_str("   ").unwrap();
        assert!(amount.is_zero());
        assert!(!amount.is_positive());
    }

    #[test]
    fn test_parse_commas() {
        let amount = Amount::from_str("1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("lots").is_err());
        assert!(Amount::from_str("12abc").is_err());
    }

    #[test]
    fn test_display_is_normalized() {
        assert_eq!(Amount::from_str("100.00").unwrap().to_string(), "100");
        assert_eq!(Amount::from_str("12.50").unwrap().to_string(), "12.5");
    }

    #[test]
    fn test_formatted() {
        assert_eq!(Amount::from_str("1234.5").unwrap().formatted("₹"), "₹1,234.50");
        assert_eq!(Amount::from_str("-60000").unwrap().formatted("$"), "-$60,000.00");
        assert_eq!(Amount::ZERO.formatted(""), "0.00");
    }

    #[test]
    fn test_serialize_as_number() {
        let whole = Amount::from_str("100.00").unwrap();
        assert_eq!(serde_json::to_string(&whole).unwrap(), "100");
        let fraction = Amount::from_str("12.5").unwrap();
        assert_eq!(serde_json::to_string(&fraction).unwrap(), "12.5");
    }

    #[test]
    fn test_deserialize_number() {
        let amount: Amount = serde_json::from_str("0.1").unwrap();
        assert_eq!(amount.value(), dec("0.1"));
        let amount: Amount = serde_json::from_str("250").unwrap();
        assert_eq!(amount.value(), dec("250"));
    }

    #[test]
    fn test_deserialize_string() {
        let amount: Amount = serde_json::from_str(r#""₹1,200.50""#).unwrap();
        assert_eq!(amount.value(), dec("1200.5"));
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Amount::from_str("0.1").unwrap(),
            Amount::from_str("0.2").unwrap(),
        ];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.value(), dec("0.3"));

        let empty: Vec<Amount> = Vec::new();
        assert_eq!(empty.into_iter().sum::<Amount>(), Amount::ZERO);
    }

    #[test]
    fn test_parse_rounds_to_two_places() {
        let amount = Amount::from_str("1234567890.123456789").unwrap();
        assert_eq!(amount.value(), dec("1234567890.12"));
        assert_eq!(Amount::from_str("0.005").unwrap().value(), dec("0.01"));
        assert!(amount.is_storable());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(
            Amount::from_str("99999999999999999999"),
            Err(AmountError::OutOfRange(_))
        ));
        assert!(Amount::from_str("12345678901234567.5").is_err());
        assert_eq!(
            Amount::from_str("9,999,999,999,999.99").unwrap(),
            Amount::MAX
        );
    }

    #[test]
    fn test_is_storable() {
        assert!(Amount::MAX.is_storable());
        assert!(Amount::from_str("12.50").unwrap().is_storable());
        assert!(!Amount::from(dec("0.001")).is_storable());
        assert!(!Amount::from(dec("10000000000000")).is_storable());
    }

    #[test]
    fn test_storable_amounts_survive_json() {
        for raw in ["9999999999999.99", "1234567890.12", "0.1", "0.07", "123.45", "-42.1"] {
            let amount = Amount::from_str(raw).unwrap();
            let json = serde_json::to_string(&amount).unwrap();
            let read: Amount = serde_json::from_str(&json).unwrap();
            assert_eq!(read, amount, "{raw} was stored as {json}");
        }
    }

    #[test]
    fn test_ordering() {
        let a1 = Amount::from_str("30").unwrap();
        let a2 = Amount::from_str("50").unwrap();
        assert!(a1 < a2);
    }
}
