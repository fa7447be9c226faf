use crate::domain::bank::Bank;
use crate::domain::client::Client;
use crate::domain::credit::Credit;
use crate::domain::ports::LedgerRef;
use crate::domain::transaction::Transaction;
use crate::error::{LedgerError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed access to entities stored in the ledger as JSON records.
#[derive(Clone)]
pub struct Repository {
    ledger: LedgerRef,
}

impl Repository {
    pub fn new(ledger: LedgerRef) -> Self {
        Self { ledger }
    }

    /// Raw record bytes, `None` when the key was never written.
    pub async fn raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let bytes = self.ledger.get(key).await?;
        debug!(key, found = bytes.is_some(), "ledger read");
        Ok(bytes.filter(|b| !b.is_empty()))
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.raw(key).await? {
            Some(bytes) => decode(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub async fn save<T: Serialize>(&self, key: &str, entity: &T) -> Result<()> {
        let bytes = encode(key, entity)?;
        self.ledger.put(key, bytes).await?;
        debug!(key, "ledger write");
        Ok(())
    }

    pub async fn client(&self, id: &str) -> Result<Client> {
        self.load(id)
            .await?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    pub async fn credit(&self, id: &str) -> Result<Option<Credit>> {
        self.load(id).await
    }

    pub async fn transaction(&self, id: &str) -> Result<Option<Transaction>> {
        self.load(id).await
    }

    pub async fn bank(&self, id: &str) -> Result<Option<Bank>> {
        self.load(id).await
    }

    pub async fn save_bank(&self, bank: &Bank) -> Result<()> {
        self.save(&bank.id, bank).await
    }

    pub async fn save_client(&self, client: &Client) -> Result<()> {
        self.save(&client.id, client).await
    }

    pub async fn save_credit(&self, credit: &Credit) -> Result<()> {
        self.save(&credit.id, credit).await
    }

    pub async fn save_transaction(&self, tx: &Transaction) -> Result<()> {
        self.save(&tx.id, tx).await
    }
}

fn encode<T: Serialize>(key: &str, entity: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(entity).map_err(|source| LedgerError::Serialization {
        key: key.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| LedgerError::Serialization {
        key: key.to_string(),
        source,
    })
}
