//! Application layer containing the state transitions.
//!
//! Every operation follows the same shape: load the affected entities
//! through the [`repository::Repository`], validate everything, then write.
//! [`engine::LedgerEngine`] routes a parsed [`engine::Request`] to the one
//! engine responsible for it.

pub mod clients;
pub mod credit;
pub mod engine;
pub mod payment;
pub mod repository;
pub mod transfer;
