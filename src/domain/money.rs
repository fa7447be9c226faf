use crate::error::{LedgerError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places money values are rounded to when they are derived
/// (rather than supplied by a caller), e.g. a credit's rate amount.
pub const MONEY_SCALE: u32 = 4;

/// A signed account balance.
///
/// Wraps `rust_decimal::Decimal` so balances cannot be mixed up with plain
/// numbers. A balance may be negative while a client uses an overdraft.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(pub Decimal);

/// A strictly positive monetary amount moved by an operation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::invalid("amount", "amount must be positive"))
        }
    }

    /// Parses a caller-supplied argument, naming it in the error.
    pub fn parse(name: &'static str, raw: &str) -> Result<Self> {
        let value = parse_decimal(name, raw)?;
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::invalid(name, format!("{raw} must be positive")))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_add(amount.0)
            .map(Self)
            .ok_or_else(|| LedgerError::invalid("amount", "balance overflow"))
    }

    pub fn checked_sub(self, amount: Amount) -> Result<Self> {
        self.0
            .checked_sub(amount.0)
            .map(Self)
            .ok_or_else(|| LedgerError::invalid("amount", "balance overflow"))
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parses a finite decimal argument.
pub fn parse_decimal(name: &'static str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::invalid(name, format!("{raw} is not a decimal number")))
}

/// Arithmetic mean of a list of amounts, zero for an empty list.
pub fn average(values: &[Decimal]) -> Result<Decimal> {
    if values.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let sum = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v)
            .ok_or_else(|| LedgerError::invalid("amount", "transfer history overflow"))
    })?;
    sum.checked_div(Decimal::from(values.len()))
        .ok_or_else(|| LedgerError::invalid("amount", "transfer history overflow"))
}

/// Rounds a derived money value to `scale` places, midpoint away from zero.
pub fn round_money(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}
