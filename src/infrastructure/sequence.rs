use crate::domain::ids::EntityKind;
use crate::domain::ports::{IdAllocator, LedgerRef};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use tracing::debug;

/// Key under which the next sequence number of `kind` is stored.
pub fn sequence_key(kind: EntityKind) -> String {
    format!("seq:{}", kind.prefix())
}

/// Id allocator that keeps one counter per entity kind in the ledger itself,
/// so ids stay unique across processes sharing the same ledger.
///
/// A counter that was never written starts at `first`.
#[derive(Clone)]
pub struct LedgerSequence {
    ledger: LedgerRef,
    first: u64,
}

impl LedgerSequence {
    pub fn new(ledger: LedgerRef, first: u64) -> Self {
        Self { ledger, first }
    }

    /// The number the next call to `next_id` will use.
    pub async fn peek(&self, kind: EntityKind) -> Result<u64> {
        let key = sequence_key(kind);
        match self.ledger.get(&key).await? {
            Some(bytes) => {
                serde_json::from_slice(&bytes).map_err(|source| LedgerError::Serialization {
                    key,
                    source,
                })
            }
            None => Ok(self.first),
        }
    }

    /// Overwrites the counter of `kind`.
    pub async fn set(&self, kind: EntityKind, next: u64) -> Result<()> {
        let key = sequence_key(kind);
        let bytes = serde_json::to_vec(&next)
            .map_err(|source| LedgerError::Serialization { key: key.clone(), source })?;
        self.ledger.put(&key, bytes).await
    }
}

#[async_trait]
impl IdAllocator for LedgerSequence {
    async fn next_id(&self, kind: EntityKind) -> Result<String> {
        let n = self.peek(kind).await?;
        let next = n
            .checked_add(1)
            .ok_or_else(|| LedgerError::storage(format!("{kind} id sequence exhausted")))?;
        self.set(kind, next).await?;
        let id = kind.format_id(n);
        debug!(%kind, id = %id, "allocated id");
        Ok(id)
    }
}
