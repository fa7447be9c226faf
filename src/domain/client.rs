use crate::domain::credit::Credit;
use crate::domain::money::{Amount, Balance, average};
use crate::error::{LedgerError, PolicyViolation, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bank client as stored in the ledger.
///
/// `received_transfers` is an append-only history of incoming amounts. It is
/// only ever used as a statistical input for the overdraft and credit limits.
///
/// `credits` holds every credit the client was ever granted, keyed by credit
/// id. At most one of them is outstanding, and `allow_credit` is `false`
/// exactly while one is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "IDClient")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Surname")]
    pub surname: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "MoneyOnAccount")]
    pub money_on_account: Balance,
    #[serde(rename = "ReceivedTransfers", default)]
    pub received_transfers: Vec<Decimal>,
    #[serde(rename = "AllowCredit")]
    pub allow_credit: bool,
    #[serde(rename = "Credits", default)]
    pub credits: BTreeMap<String, Credit>,
}

impl Client {
    /// A fresh client with no history and no credits.
    pub fn new(id: String, name: String, surname: String, email: String, balance: Balance) -> Self {
        Self {
            id,
            name,
            surname,
            email,
            money_on_account: balance,
            received_transfers: Vec::new(),
            allow_credit: true,
            credits: BTreeMap::new(),
        }
    }

    pub fn average_received_transfer(&self) -> Result<Decimal> {
        average(&self.received_transfers)
    }

    /// The deepest negative balance an overdraft transfer may leave behind.
    pub fn allowed_minus(&self) -> Result<Decimal> {
        self.average_received_transfer()
    }

    /// The largest principal this client may borrow.
    pub fn credit_limit(&self, multiplier: Decimal) -> Result<Decimal> {
        let avg = self.average_received_transfer()?;
        avg.checked_mul(multiplier)
            .ok_or_else(|| LedgerError::invalid("amount", "credit limit overflow"))
    }

    pub fn record_incoming(&mut self, amount: Amount) -> Result<()> {
        self.money_on_account = self.money_on_account.checked_add(amount)?;
        self.received_transfers.push(amount.value());
        Ok(())
    }

    pub fn record_outgoing(&mut self, amount: Amount) -> Result<()> {
        self.money_on_account = self.money_on_account.checked_sub(amount)?;
        Ok(())
    }

    /// The single credit still being repaid.
    ///
    /// More than one outstanding credit breaks the issuance invariant and is
    /// reported instead of picking one of them.
    pub fn outstanding_credit(&self) -> Result<&Credit> {
        let mut outstanding = self.credits.values().filter(|c| c.is_outstanding());
        match (outstanding.next(), outstanding.next()) {
            (None, _) => Err(PolicyViolation::NoOutstandingCredit {
                client: self.id.clone(),
            }
            .into()),
            (Some(credit), None) => Ok(credit),
            (Some(first), Some(second)) => {
                let mut credits = vec![first.id.clone(), second.id.clone()];
                credits.extend(outstanding.map(|c| c.id.clone()));
                Err(PolicyViolation::MultipleOutstandingCredits {
                    client: self.id.clone(),
                    credits,
                }
                .into())
            }
        }
    }

    /// Inserts or replaces a credit by id.
    pub fn upsert_credit(&mut self, credit: Credit) {
        self.credits.insert(credit.id.clone(), credit);
    }
}
