use clap::{Parser, Subcommand};
use creditledger::application::engine::LedgerEngine;
use creditledger::application::repository::Repository;
use creditledger::config::EngineConfig;
use creditledger::domain::ports::LedgerRef;
use creditledger::infrastructure::in_memory::InMemoryLedger;
use creditledger::infrastructure::seed::seed_demo_ledger;
use creditledger::infrastructure::sequence::LedgerSequence;
use creditledger::interfaces::csv::command_reader::CommandReader;
use creditledger::interfaces::dispatch::Dispatcher;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// JSON file overriding the engine defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single operation, e.g. `invoke transfer cli1 cli2 100 false`.
    Invoke {
        operation: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Run every operation of a CSV script in order.
    Run {
        script: PathBuf,
        /// Write the demo records before running the script.
        #[arg(long)]
        seed: bool,
    },
    /// Write the demo records.
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let ledger = open_ledger(cli.db_path.as_ref())?;
    let sequence = LedgerSequence::new(ledger.clone(), config.first_id);
    let repo = Repository::new(ledger.clone());
    let dispatcher = Dispatcher::new(LedgerEngine::with_ledger(ledger, config));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Invoke { operation, args } => {
            let payload = dispatcher.invoke(&operation, &args).await?;
            write_payload(&mut out, payload).into_diagnostic()?;
        }
        Command::Run { script, seed } => {
            if seed {
                seed_demo_ledger(&repo, &sequence).await?;
            }
            let file = File::open(script).into_diagnostic()?;
            let reader = CommandReader::new(file);
            for cmd_result in reader.commands() {
                match cmd_result {
                    Ok(cmd) => match dispatcher.invoke(&cmd.operation, &cmd.args).await {
                        Ok(payload) => write_payload(&mut out, payload).into_diagnostic()?,
                        Err(e) => eprintln!("Error processing command {}: {}", cmd.line, e),
                    },
                    Err(e) => eprintln!("Error reading command: {}", e),
                }
            }
        }
        Command::Seed => seed_demo_ledger(&repo, &sequence).await?,
    }

    out.flush().into_diagnostic()?;
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_payload(out: &mut impl Write, payload: Option<Vec<u8>>) -> io::Result<()> {
    if let Some(bytes) = payload {
        out.write_all(&bytes)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_ledger(db_path: Option<&PathBuf>) -> Result<LedgerRef> {
    use creditledger::infrastructure::rocksdb::RocksDbLedger;

    match db_path {
        Some(path) => Ok(Arc::new(RocksDbLedger::open(path)?)),
        None => Ok(Arc::new(InMemoryLedger::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_ledger(db_path: Option<&PathBuf>) -> Result<LedgerRef> {
    if db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Arc::new(InMemoryLedger::new()))
}
