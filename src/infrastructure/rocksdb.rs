use crate::domain::ports::Ledger;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding every ledger record (clients, credits, transactions
/// and id sequences).
pub const CF_STATE: &str = "state";

/// A persistent ledger backed by RocksDB.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "state" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_state = ColumnFamilyDescriptor::new(CF_STATE, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_state])
            .map_err(LedgerError::storage)?;

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl Ledger for RocksDbLedger {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self
            .db
            .cf_handle(CF_STATE)
            .ok_or_else(|| LedgerError::storage("State column family not found"))?;
        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(LedgerError::storage)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let cf = self
            .db
            .cf_handle(CF_STATE)
            .ok_or_else(|| LedgerError::storage("State column family not found"))?;
        self.db
            .put_cf(&cf, key.as_bytes(), value)
            .map_err(LedgerError::storage)
    }
}
