//! Ledger backends, the id sequence and demo seeding.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod seed;
pub mod sequence;
