use crate::application::clients::{ClientRegistry, NewClient};
use crate::application::credit::{CreditEngine, CreditRequest};
use crate::application::payment::{PaymentEngine, RateRequest};
use crate::application::repository::Repository;
use crate::application::transfer::{TransferEngine, TransferRequest};
use crate::config::EngineConfig;
use crate::domain::ports::{IdAllocatorRef, LedgerRef};
use crate::error::Result;
use crate::infrastructure::sequence::LedgerSequence;
use std::sync::Arc;

/// One parsed operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Transfer(TransferRequest),
    IssueCredit(CreditRequest),
    PayRate(RateRequest),
    AddClient(NewClient),
    Query(String),
}

/// The main entry point for applying operations to the ledger.
///
/// `LedgerEngine` owns one instance of each engine, all sharing the same
/// ledger and id allocator. Each request is handled by exactly one of them;
/// engines never call each other and keep no state between requests.
pub struct LedgerEngine {
    transfers: TransferEngine,
    credits: CreditEngine,
    payments: PaymentEngine,
    clients: ClientRegistry,
}

impl LedgerEngine {
    /// Creates a new `LedgerEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The key-value ledger holding every record.
    /// * `ids` - The allocator for new client, credit and transaction ids.
    /// * `config` - Credit sizing and id tunables.
    pub fn new(ledger: LedgerRef, ids: IdAllocatorRef, config: EngineConfig) -> Self {
        let repo = Repository::new(ledger);
        Self {
            transfers: TransferEngine::new(repo.clone(), ids.clone()),
            credits: CreditEngine::new(repo.clone(), ids.clone(), config),
            payments: PaymentEngine::new(repo.clone()),
            clients: ClientRegistry::new(repo, ids),
        }
    }

    /// Uses id sequences stored in `ledger` itself, starting at
    /// `config.first_id`.
    pub fn with_ledger(ledger: LedgerRef, config: EngineConfig) -> Self {
        let ids = Arc::new(LedgerSequence::new(ledger.clone(), config.first_id));
        Self::new(ledger, ids, config)
    }

    /// Applies one request and returns its payload: the id of the created
    /// entity, the raw record for a query, or nothing.
    pub async fn handle(&self, request: Request) -> Result<Option<Vec<u8>>> {
        match request {
            Request::Transfer(req) => {
                let tx = self.transfers.transfer(req).await?;
                Ok(Some(tx.id.into_bytes()))
            }
            Request::IssueCredit(req) => {
                let credit = self.credits.issue_credit(req).await?;
                Ok(Some(credit.id.into_bytes()))
            }
            Request::PayRate(req) => {
                self.payments.pay_rate(req).await?;
                Ok(None)
            }
            Request::AddClient(new) => {
                let client = self.clients.add_client(new).await?;
                Ok(Some(client.id.into_bytes()))
            }
            Request::Query(key) => self.clients.query(&key).await.map(Some),
        }
    }

    pub fn clients(&self) -> &ClientRegistry {
        &self.clients
    }
}
