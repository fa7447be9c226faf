use crate::domain::ports::Ledger;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<HashMap<String, Vec<u8>>>>` so clones share the same key
/// space. Ideal for tests and for one-shot batch runs where nothing needs to
/// survive the process.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryLedger {
    /// Creates a new, empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record, ordered by key.
    pub async fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        let state = self.state.read().await;
        state.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let state = self.state.read().await;
        Ok(state.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut state = self.state.write().await;
        state.insert(key.to_string(), value);
        Ok(())
    }
}
