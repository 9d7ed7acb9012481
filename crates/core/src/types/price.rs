//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in the store's single currency.
///
/// Backed by [`Decimal`] so that amounts like `999.99` are exact. On the wire
/// it is a plain JSON number.
///
/// ```
/// use minimart_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(99_999, 2)).unwrap();
/// assert_eq!(price.to_string(), "999.99");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        let err = Price::new(Decimal::new(-1, 2)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-1, 2)));
    }

    #[test]
    fn test_price_allows_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_price_from_cents() {
        let price = Price::from_cents(7_999).unwrap();
        assert_eq!(price.amount(), Decimal::new(7_999, 2));
        assert_eq!(price.to_string(), "79.99");
    }

    #[test]
    fn test_price_serializes_as_json_number() {
        let value = serde_json::to_value(Price::from_cents(59_999).unwrap()).unwrap();
        let number = value.as_f64().unwrap();
        assert!((number - 599.99).abs() < 1e-9);
    }

    #[test]
    fn test_price_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("999.99").unwrap();
        assert_eq!(price, Price::from_cents(99_999).unwrap());
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("-5");
        assert!(result.is_err());
    }
}
