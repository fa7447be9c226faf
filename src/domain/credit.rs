use crate::domain::money::{Amount, round_money};
use crate::error::{LedgerError, PolicyViolation, Result};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Terms of a credit at the moment it is issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditTerms {
    pub principal: Amount,
    pub num_of_rates: u32,
    pub interest: Decimal,
}

impl CreditTerms {
    /// Fixed per-period payment: the principal split evenly across the rates,
    /// with the interest applied once as a flat multiplier.
    pub fn rate_amount(&self, scale: u32) -> Result<Decimal> {
        if self.num_of_rates == 0 {
            return Err(LedgerError::invalid("numRates", "number of rates must be positive"));
        }
        let per_rate = self
            .principal
            .value()
            .checked_div(Decimal::from(self.num_of_rates))
            .and_then(|v| v.checked_mul(Decimal::ONE + self.interest))
            .ok_or_else(|| LedgerError::invalid("amount", "rate amount overflow"))?;
        Ok(round_money(per_rate, scale))
    }
}

/// A credit (loan) contract.
///
/// `num_of_payed_rates` only ever grows and never exceeds `num_of_rates`; the
/// credit is fully repaid once the two are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    #[serde(rename = "IDCredit")]
    pub id: String,
    #[serde(rename = "ApprovalDate")]
    pub approval_date: DateTime<Utc>,
    #[serde(rename = "EndDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "RateAmount")]
    pub rate_amount: Decimal,
    #[serde(rename = "Interest")]
    pub interest: Decimal,
    #[serde(rename = "NumOfRates")]
    pub num_of_rates: u32,
    #[serde(rename = "NumOfPayedRates")]
    pub num_of_payed_rates: u32,
    #[serde(rename = "AmountOfCredit")]
    pub amount_of_credit: Decimal,
}

impl Credit {
    pub fn issue(
        id: String,
        terms: CreditTerms,
        approved_at: DateTime<Utc>,
        term: Duration,
        scale: u32,
    ) -> Result<Self> {
        let rate_amount = terms.rate_amount(scale)?;
        let end_date = approved_at
            .checked_add_signed(term)
            .ok_or_else(|| LedgerError::invalid("term", "credit maturity out of range"))?;
        Ok(Self {
            id,
            approval_date: approved_at,
            end_date,
            rate_amount,
            interest: terms.interest,
            num_of_rates: terms.num_of_rates,
            num_of_payed_rates: 0,
            amount_of_credit: terms.principal.value(),
        })
    }

    /// Not yet settled. A record counting more paid rates than it has is
    /// never settled either; [`Credit::ensure_rate_due`] rejects it.
    pub fn is_outstanding(&self) -> bool {
        self.num_of_payed_rates != self.num_of_rates
    }

    pub fn is_repaid(&self) -> bool {
        !self.is_outstanding()
    }

    pub fn remaining_rates(&self) -> u32 {
        self.num_of_rates.saturating_sub(self.num_of_payed_rates)
    }

    /// Fails unless at least one rate is still due.
    pub fn ensure_rate_due(&self) -> Result<()> {
        if self.num_of_payed_rates < self.num_of_rates {
            return Ok(());
        }
        Err(PolicyViolation::NoRateDue {
            credit: self.id.clone(),
            payed: self.num_of_payed_rates,
            rates: self.num_of_rates,
        }
        .into())
    }

    /// Books one installment. Returns `true` when it was the last one.
    pub fn record_payment(&mut self) -> Result<bool> {
        self.ensure_rate_due()?;
        self.num_of_payed_rates += 1;
        Ok(self.is_repaid())
    }
}
