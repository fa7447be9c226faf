use crate::application::repository::Repository;
use crate::config::EngineConfig;
use crate::domain::credit::{Credit, CreditTerms};
use crate::domain::ids::EntityKind;
use crate::domain::ports::IdAllocatorRef;
use crate::error::{PolicyViolation, Result};
use chrono::Utc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct CreditRequest {
    pub client: String,
    pub terms: CreditTerms,
}

/// Sizes and issues credits.
///
/// A client may borrow at most `credit_multiplier` times the average of the
/// transfers they received, and only while no other credit is outstanding.
pub struct CreditEngine {
    repo: Repository,
    ids: IdAllocatorRef,
    config: EngineConfig,
}

impl CreditEngine {
    pub fn new(repo: Repository, ids: IdAllocatorRef, config: EngineConfig) -> Self {
        Self { repo, ids, config }
    }

    pub async fn issue_credit(&self, req: CreditRequest) -> Result<Credit> {
        let mut client = self.repo.client(&req.client).await?;

        if !client.allow_credit {
            warn!(client = %client.id, "credit rejected: unpaid loan");
            let client = client.id;
            return Err(PolicyViolation::CreditAlreadyOutstanding { client }.into());
        }

        let allowed = client.credit_limit(self.config.credit_multiplier)?;
        let requested = req.terms.principal.value();
        if requested > allowed {
            warn!(client = %client.id, %requested, %allowed, "credit rejected: loan too large");
            return Err(PolicyViolation::LoanTooLarge {
                client: client.id,
                requested,
                allowed,
            }
            .into());
        }

        // Terms must be valid before an id is taken.
        req.terms.rate_amount(self.config.money_scale)?;
        let id = self.ids.next_id(EntityKind::Credit).await?;
        let credit = Credit::issue(
            id,
            req.terms,
            Utc::now(),
            self.config.credit_term(),
            self.config.money_scale,
        )?;

        client.upsert_credit(credit.clone());
        client.allow_credit = false;
        self.repo.save_client(&client).await?;
        self.repo.save_credit(&credit).await?;

        info!(
            client = %client.id,
            credit = %credit.id,
            amount = %credit.amount_of_credit,
            rate = %credit.rate_amount,
            rates = credit.num_of_rates,
            "credit issued"
        );
        Ok(credit)
    }
}
