//! A currency amount with exactly two decimal places.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// An amount of money stored as a whole number of cents.
///
/// Amounts are rounded to the nearest cent when they are created, so an
/// amount never carries more than two decimal places. On the wire an amount is
/// a string with exactly two decimal places, e.g. `"49.90"`. When
/// deserializing, both JSON numbers and numeric strings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    /// Create an amount from a number of cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount as a whole number of cents.
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Create an amount from a floating point value, rounding to the nearest cent.
    ///
    /// # Errors
    /// Returns an [Error::Validation] if `value` is not finite or is too large
    /// to be represented in cents.
    pub fn from_f64(value: f64) -> Result<Self, Error> {
        let cents = (value * 100.0).round();

        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(Error::Validation(format!("{value} is not a valid amount")));
        }

        Ok(Self(cents as i64))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();

        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::Validation(format!("\"{s}\" is not a valid amount")))?;

        Self::from_f64(value)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAmount {
            Number(f64),
            Text(String),
        }

        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(value) => Amount::from_f64(value),
            RawAmount::Text(text) => text.parse(),
        }
        .map_err(de::Error::custom)
    }
}
