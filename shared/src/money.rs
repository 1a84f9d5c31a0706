//! Money - 价格解析与格式化
//!
//! Prices travel as display strings (`"R$ 18,90"`) but are held as integer
//! centavos. Parsing happens once at the boundary (remote decode, admin
//! input) and fails loudly on anything that is not `R$ D+,DD`.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency prefix carried by every display price
pub const CURRENCY_PREFIX: &str = "R$";

/// Price parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("Price is empty")]
    Empty,

    #[error("Price must start with 'R$': {0}")]
    MissingPrefix(String),

    #[error("Price must look like 'R$ 0,00': {0}")]
    InvalidFormat(String),

    #[error("Price out of range: {0}")]
    OutOfRange(String),
}

/// Monetary amount in centavos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Parse a full display price (`"R$ 18,90"`)
    ///
    /// Whitespace between the prefix and the amount is optional.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }
        let amount = trimmed
            .strip_prefix(CURRENCY_PREFIX)
            .ok_or_else(|| MoneyError::MissingPrefix(input.to_string()))?;
        Self::parse_amount(amount.trim_start())
            .map_err(|e| match e {
                MoneyError::Empty => MoneyError::InvalidFormat(input.to_string()),
                other => other,
            })
    }

    /// Parse a bare amount with a decimal comma (`"18,90"`)
    pub fn parse_amount(amount: &str) -> Result<Self, MoneyError> {
        if amount.is_empty() {
            return Err(MoneyError::Empty);
        }
        let invalid = || MoneyError::InvalidFormat(amount.to_string());

        let (units, fraction) = amount.split_once(',').ok_or_else(invalid)?;
        if units.is_empty()
            || fraction.len() != 2
            || !units.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let out_of_range = || MoneyError::OutOfRange(amount.to_string());
        let units: i64 = units.parse().map_err(|_| out_of_range())?;
        let fraction: i64 = fraction.parse().map_err(|_| out_of_range())?;
        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(out_of_range)?;

        Ok(Self { cents })
    }

    /// Multiply by a line quantity
    pub fn times(self, quantity: u32) -> Self {
        Self {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    /// Amount without the currency prefix, comma as decimal separator (`"100,70"`)
    pub fn format_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{},{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", CURRENCY_PREFIX, self.format_amount())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Money {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Money> for String {
    fn from(money: Money) -> Self {
        money.to_string()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            cents: self.cents.saturating_add(rhs.cents),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}
