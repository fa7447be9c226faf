//! Entity model and the ports the engines depend on.
//!
//! Nothing in here touches storage directly; the engines in
//! [`crate::application`] load entities through [`ports::Ledger`].

pub mod bank;
pub mod client;
pub mod credit;
pub mod ids;
pub mod money;
pub mod ports;
pub mod transaction;
