use crate::domain::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Write-once audit record of a completed transfer.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    #[serde(rename = "IDTransaction")]
    pub id: String,
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "IDSender")]
    pub sender: String,
    #[serde(rename = "IDReceiver")]
    pub receiver: String,
    #[serde(rename = "Amount")]
    pub amount: Amount,
}
