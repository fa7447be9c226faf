#![allow(dead_code)]

use creditledger::application::engine::LedgerEngine;
use creditledger::application::repository::Repository;
use creditledger::config::EngineConfig;
use creditledger::domain::client::Client;
use creditledger::infrastructure::in_memory::InMemoryLedger;
use creditledger::infrastructure::seed::seed_demo_ledger;
use creditledger::infrastructure::sequence::LedgerSequence;
use creditledger::interfaces::dispatch::Dispatcher;
use rand::Rng;
use std::fs::File;
use std::io::{Error, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// A dispatcher over a fresh in-memory ledger holding the demo records.
pub async fn seeded() -> (Dispatcher, InMemoryLedger) {
    let ledger = InMemoryLedger::new();
    let shared = Arc::new(ledger.clone());
    let repo = Repository::new(shared.clone());
    let sequence = LedgerSequence::new(shared.clone(), 5);
    seed_demo_ledger(&repo, &sequence)
        .await
        .expect("Failed to seed ledger");

    let engine = LedgerEngine::with_ledger(shared, EngineConfig::default());
    (Dispatcher::new(engine), ledger)
}

/// A dispatcher over an empty in-memory ledger.
pub fn empty() -> (Dispatcher, InMemoryLedger) {
    let ledger = InMemoryLedger::new();
    let engine = LedgerEngine::with_ledger(Arc::new(ledger.clone()), EngineConfig::default());
    (Dispatcher::new(engine), ledger)
}

pub async fn client(ledger: &InMemoryLedger, id: &str) -> Client {
    Repository::new(Arc::new(ledger.clone()))
        .client(id)
        .await
        .expect("Failed to load client")
}

pub async fn record(ledger: &InMemoryLedger, key: &str) -> serde_json::Value {
    let bytes = ledger
        .snapshot()
        .await
        .remove(key)
        .unwrap_or_else(|| panic!("{key} not in ledger"));
    serde_json::from_slice(&bytes).expect("Record is not JSON")
}

pub fn payload_str(payload: Option<Vec<u8>>) -> String {
    String::from_utf8(payload.expect("Expected a payload")).expect("Payload is not UTF-8")
}

/// Writes `lines` into a temporary CSV script.
pub fn script(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create script");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write script");
    }
    file
}

/// Writes a script that registers `clients` clients with 1000 each and then
/// moves random amounts between them.
pub fn generate_script(path: &Path, clients: u64, transfers: usize) -> Result<(), Error> {
    let mut rng = rand::thread_rng();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(File::create(path)?);

    for i in 0..clients {
        wtr.write_record([
            "addClient".to_string(),
            format!("Name{i}"),
            format!("Surname{i}"),
            format!("client{i}@example.com"),
            "1000".to_string(),
        ])?;
    }
    for _ in 0..transfers {
        let sender = rng.gen_range(5..5 + clients);
        let receiver = rng.gen_range(5..5 + clients);
        let amount = rng.gen_range(1..=500);
        let overdraft = rng.gen_bool(0.5);
        wtr.write_record([
            "transfer".to_string(),
            format!("cli{sender}"),
            format!("cli{receiver}"),
            amount.to_string(),
            overdraft.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
