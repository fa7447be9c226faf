use crate::application::repository::Repository;
use crate::domain::client::Client;
use crate::domain::ids::EntityKind;
use crate::domain::money::Balance;
use crate::domain::ports::IdAllocatorRef;
use crate::error::{LedgerError, Result};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub initial_balance: Balance,
}

/// Client registration and raw record lookup.
pub struct ClientRegistry {
    repo: Repository,
    ids: IdAllocatorRef,
}

impl ClientRegistry {
    pub fn new(repo: Repository, ids: IdAllocatorRef) -> Self {
        Self { repo, ids }
    }

    pub async fn add_client(&self, new: NewClient) -> Result<Client> {
        let id = self.ids.next_id(EntityKind::Client).await?;
        let client = Client::new(id, new.name, new.surname, new.email, new.initial_balance);
        self.repo.save_client(&client).await?;
        info!(client = %client.id, balance = %client.money_on_account, "client added");
        Ok(client)
    }

    /// The stored bytes under `key`, exactly as written.
    pub async fn query(&self, key: &str) -> Result<Vec<u8>> {
        self.repo
            .raw(key)
            .await?
            .ok_or_else(|| LedgerError::NotFound(key.to_string()))
    }
}
