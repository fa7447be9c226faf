use crate::application::repository::Repository;
use crate::domain::ids::EntityKind;
use crate::domain::money::Amount;
use crate::domain::ports::IdAllocatorRef;
use crate::domain::transaction::Transaction;
use crate::error::{LedgerError, PolicyViolation, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub sender: String,
    pub receiver: String,
    pub amount: Amount,
    /// Lets the sender go negative down to the average of their received
    /// transfers.
    pub allow_overdraft: bool,
}

/// Moves funds between two clients and records the audit transaction.
pub struct TransferEngine {
    repo: Repository,
    ids: IdAllocatorRef,
}

impl TransferEngine {
    pub fn new(repo: Repository, ids: IdAllocatorRef) -> Self {
        Self { repo, ids }
    }

    /// Validates the transfer completely, then writes sender, receiver and
    /// the new transaction in that order.
    ///
    /// A failing write is not undone: records written before it stay updated.
    pub async fn transfer(&self, req: TransferRequest) -> Result<Transaction> {
        if req.sender == req.receiver {
            return Err(LedgerError::invalid(
                "receiverId",
                format!("{} cannot transfer to itself", req.sender),
            ));
        }

        let mut sender = self.repo.client(&req.sender).await?;
        let mut receiver = self.repo.client(&req.receiver).await?;

        sender.record_outgoing(req.amount)?;
        receiver.record_incoming(req.amount)?;
        let new_balance = sender.money_on_account.value();

        if !req.allow_overdraft && new_balance < Decimal::ZERO {
            let violation = PolicyViolation::InsufficientFunds {
                client: req.sender.clone(),
                balance: new_balance + req.amount.value(),
                amount: req.amount.value(),
            };
            warn!(sender = %req.sender, amount = %req.amount, "transfer rejected: insufficient funds");
            return Err(violation.into());
        }

        if req.allow_overdraft {
            let allowed_minus = sender.allowed_minus()?;
            if -new_balance > allowed_minus {
                warn!(
                    sender = %req.sender,
                    amount = %req.amount,
                    %allowed_minus,
                    "transfer rejected: overdraft exceeded"
                );
                return Err(PolicyViolation::OverdraftExceeded {
                    client: req.sender.clone(),
                    allowed_minus,
                    resulting_balance: new_balance,
                }
                .into());
            }
        }

        let tx_id = self.ids.next_id(EntityKind::Transaction).await?;

        self.repo.save_client(&sender).await?;
        self.repo.save_client(&receiver).await?;

        let tx = Transaction {
            id: tx_id,
            date: Utc::now(),
            sender: sender.id,
            receiver: receiver.id,
            amount: req.amount,
        };
        self.repo.save_transaction(&tx).await?;

        info!(
            tx = %tx.id,
            sender = %tx.sender,
            receiver = %tx.receiver,
            amount = %tx.amount,
            "transfer committed"
        );
        Ok(tx)
    }
}
