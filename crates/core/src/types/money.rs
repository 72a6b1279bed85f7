//! Fixed-point money amounts.
//!
//! All prices exchanged with the backend are plain numbers in a single
//! currency (rupees). They are carried as [`Decimal`] so tax arithmetic is
//! exact and only rounded when displayed.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Money`] amount from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// Not a decimal number.
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    /// Amounts entered by users must not be negative.
    #[error("amount cannot be negative")]
    Negative,
}

/// A monetary amount.
///
/// Serializes transparently, so a backend `"price": 1299.5` deserializes
/// directly into a `Money`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The exact, unrounded amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Multiply by a rate such as `0.09`. Saturates at the decimal range.
    #[must_use]
    pub fn scale(self, rate: Decimal) -> Self {
        Self(self.0.saturating_mul(rate))
    }

    /// Multiply by a line-item quantity. Saturates at the decimal range.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// The amount rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Parse a non-negative amount typed into a form.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Invalid`] if the input is not a decimal number
    /// and [`MoneyError::Negative`] if it is below zero.
    pub fn parse_non_negative(s: &str) -> Result<Self, MoneyError> {
        let amount: Self = s.parse()?;
        if amount.0.is_sign_negative() && !amount.0.is_zero() {
            return Err(MoneyError::Negative);
        }
        Ok(amount)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|_| MoneyError::Invalid(trimmed.to_owned()))
    }
}

/// Saturates at the decimal range.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Always renders exactly two decimal places, e.g. `1180.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{:.2}", self.rounded()))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}
