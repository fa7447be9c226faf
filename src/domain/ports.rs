use super::ids::EntityKind;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The key-value ledger the engines read from and write to.
///
/// Keys are entity ids, values the entity's encoded record. Each `put` is
/// atomic on its own; isolation across invocations is the caller's concern.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
}

/// Hands out fresh entity ids (`cli5`, `cre5`, `trans5`, ...).
#[async_trait]
pub trait IdAllocator: Send + Sync {
    async fn next_id(&self, kind: EntityKind) -> Result<String>;
}

pub type LedgerRef = Arc<dyn Ledger>;
pub type IdAllocatorRef = Arc<dyn IdAllocator>;
