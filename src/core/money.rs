//! Fixed-point money with two decimal places.
//!
//! Amounts are held as a signed count of minor units (cents) so that repeated discharges
//! never accumulate rounding drift. Caller-facing values are `rust_decimal::Decimal`;
//! conversion rejects anything that is not exactly representable in cents.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in minor units.
///
/// ```
/// use std::str::FromStr;
/// use debt_ledger::core::money::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.minor_units(), 1050);
/// assert_eq!(amount.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Number of decimal places carried by every amount.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw count of minor units.
    #[must_use]
    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Converts a decimal into minor units.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] when the value has more than two fractional
    /// digits or does not fit in 64-bit minor units.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        let mut scaled = value.normalize();
        if scaled.scale() > Self::SCALE {
            return Err(Error::validation(format!(
                "amount {value} has more than {} decimal places",
                Self::SCALE
            )));
        }
        scaled.rescale(Self::SCALE);
        i64::try_from(scaled.mantissa())
            .map(Self)
            .map_err(|_| Error::validation(format!("amount {value} is out of range")))
    }

    /// Converts back to a decimal with exactly two decimal places.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, Self::SCALE)
    }

    /// The raw count of minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is strictly less than zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|e| Error::validation(format!("'{trimmed}' is not a valid amount: {e}")))?;
        Self::from_decimal(decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
