use crate::domain::money::MONEY_SCALE;
use crate::error::{LedgerError, Result};
use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Tunables of the credit and id rules.
///
/// Loaded from a JSON file with `--config`; every field falls back to its
/// default when missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Credit limit as a multiple of the average received transfer.
    pub credit_multiplier: Decimal,
    /// Time from approval to maturity of a new credit.
    pub credit_term_hours: i64,
    /// Decimal places of a derived rate amount.
    pub money_scale: u32,
    /// First sequence number handed out for each entity kind.
    pub first_id: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credit_multiplier: Decimal::from(5),
            credit_term_hours: 8766,
            money_scale: MONEY_SCALE,
            first_id: 5,
        }
    }
}

impl EngineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(LedgerError::storage)?;
        let config: Self =
            serde_json::from_slice(&bytes).map_err(|source| LedgerError::Serialization {
                key: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.credit_multiplier < Decimal::ZERO {
            return Err(LedgerError::invalid("credit_multiplier", "must not be negative"));
        }
        if self.credit_term_hours <= 0 {
            return Err(LedgerError::invalid("credit_term_hours", "must be positive"));
        }
        if self.money_scale > 28 {
            return Err(LedgerError::invalid("money_scale", "must be at most 28"));
        }
        Ok(())
    }

    pub fn credit_term(&self) -> Duration {
        Duration::hours(self.credit_term_hours)
    }
}
