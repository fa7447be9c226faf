use crate::application::repository::Repository;
use crate::domain::credit::Credit;
use crate::domain::money::Amount;
use crate::error::{PolicyViolation, Result};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub client: String,
    pub amount: Amount,
}

/// Books installments against a client's outstanding credit.
pub struct PaymentEngine {
    repo: Repository,
}

impl PaymentEngine {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Pays exactly one rate. Partial or over-payments are rejected.
    ///
    /// The client's embedded copy only identifies the credit; the standalone
    /// credit record is authoritative for the payment count.
    pub async fn pay_rate(&self, req: RateRequest) -> Result<Credit> {
        let mut client = self.repo.client(&req.client).await?;
        let credit_id = client.outstanding_credit()?.id.clone();

        let mut credit = match self.repo.credit(&credit_id).await? {
            Some(credit) if credit.is_outstanding() => credit,
            _ => {
                warn!(
                    client = %client.id,
                    credit = %credit_id,
                    "rate rejected: credit record missing or repaid"
                );
                let client = client.id;
                return Err(PolicyViolation::NoOutstandingCredit { client }.into());
            }
        };

        if let Err(e) = credit.ensure_rate_due() {
            warn!(
                client = %client.id,
                credit = %credit.id,
                payed = credit.num_of_payed_rates,
                rates = credit.num_of_rates,
                "rate rejected: no rate due"
            );
            return Err(e);
        }

        if req.amount.value() != credit.rate_amount {
            warn!(
                client = %client.id,
                credit = %credit.id,
                expected = %credit.rate_amount,
                offered = %req.amount,
                "rate rejected: wrong amount"
            );
            return Err(PolicyViolation::WrongRateAmount {
                credit: credit.id,
                expected: credit.rate_amount,
                offered: req.amount.value(),
            }
            .into());
        }

        let repaid = credit.record_payment()?;
        if repaid {
            client.allow_credit = true;
        }

        self.repo.save_credit(&credit).await?;
        client.upsert_credit(credit.clone());
        self.repo.save_client(&client).await?;

        info!(
            client = %client.id,
            credit = %credit.id,
            payed = credit.num_of_payed_rates,
            rates = credit.num_of_rates,
            repaid,
            "rate paid"
        );
        Ok(credit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::Client;
    use crate::domain::credit::CreditTerms;
    use crate::domain::money::Balance;
    use crate::error::LedgerError;
    use crate::infrastructure::in_memory::InMemoryLedger;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn credit(id: &str, rates: u32, payed: u32, rate: Decimal) -> Credit {
        let mut credit = Credit::issue(
            id.into(),
            CreditTerms {
                principal: Amount::new(rate * Decimal::from(rates)).unwrap(),
                num_of_rates: rates,
                interest: dec!(0),
            },
            Utc::now(),
            Duration::hours(8766),
            4,
        )
        .unwrap();
        credit.num_of_payed_rates = payed;
        credit
    }

    async fn setup(credits: &[Credit]) -> (PaymentEngine, Repository, InMemoryLedger) {
        let ledger = InMemoryLedger::new();
        let repo = Repository::new(Arc::new(ledger.clone()));
        let mut client = Client::new(
            "cli4".into(),
            "Ivan".into(),
            "Snobista".into(),
            "smarac@gmail.com".into(),
            Balance::ZERO,
        );
        for c in credits {
            client.upsert_credit(c.clone());
            repo.save_credit(c).await.unwrap();
        }
        client.allow_credit = credits.iter().all(Credit::is_repaid);
        repo.save_client(&client).await.unwrap();
        (PaymentEngine::new(repo.clone()), repo, ledger)
    }

    fn request(amount: Decimal) -> RateRequest {
        RateRequest {
            client: "cli4".into(),
            amount: Amount::new(amount).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_last_rate_reenables_credit() {
        let (engine, repo, _) = setup(&[credit("cre4", 10, 9, dec!(11000))]).await;

        let paid = engine.pay_rate(request(dec!(11000))).await.unwrap();
        assert_eq!(paid.num_of_payed_rates, 10);

        let client = repo.client("cli4").await.unwrap();
        assert!(client.allow_credit);
        assert_eq!(client.credits["cre4"], paid);
        assert_eq!(client.credits.len(), 1);
        assert_eq!(repo.credit("cre4").await.unwrap().unwrap(), paid);

        let err = engine.pay_rate(request(dec!(11000))).await.unwrap_err();
        assert!(matches!(
            err.policy(),
            Some(PolicyViolation::NoOutstandingCredit { .. })
        ));
    }

    #[tokio::test]
    async fn test_intermediate_rate_keeps_gate_closed() {
        let (engine, repo, _) = setup(&[credit("cre3", 10, 5, dec!(9900))]).await;
        engine.pay_rate(request(dec!(9900.0000))).await.unwrap();

        let client = repo.client("cli4").await.unwrap();
        assert!(!client.allow_credit);
        assert_eq!(client.credits["cre3"].num_of_payed_rates, 6);
    }

    #[tokio::test]
    async fn test_wrong_amount_names_expected_rate() {
        let (engine, _, ledger) = setup(&[credit("cre4", 10, 9, dec!(11000))]).await;
        let before = ledger.snapshot().await;

        let err = engine.pay_rate(request(dec!(10999.99))).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("cre4"), "{message}");
        assert!(message.contains("11000"), "{message}");
        assert!(matches!(
            err.policy(),
            Some(PolicyViolation::WrongRateAmount { expected, .. }) if *expected == dec!(11000)
        ));
        assert_eq!(ledger.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_canonical_record_wins_over_embedded_copy() {
        let (engine, repo, _) = setup(&[credit("cre4", 10, 9, dec!(11000))]).await;
        repo.save_credit(&credit("cre4", 10, 10, dec!(11000)))
            .await
            .unwrap();

        let err = engine.pay_rate(request(dec!(11000))).await.unwrap_err();
        assert!(matches!(
            err.policy(),
            Some(PolicyViolation::NoOutstandingCredit { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_credit_record() {
        let (engine, repo, _) = setup(&[]).await;
        let mut client = repo.client("cli4").await.unwrap();
        client.upsert_credit(credit("cre9", 2, 0, dec!(10)));
        repo.save_client(&client).await.unwrap();

        let err = engine.pay_rate(request(dec!(10))).await.unwrap_err();
        assert!(matches!(
            err.policy(),
            Some(PolicyViolation::NoOutstandingCredit { .. })
        ));
    }

    #[tokio::test]
    async fn test_overpaid_credit_is_not_booked() {
        let (engine, repo, ledger) = setup(&[credit("cre4", 10, 11, dec!(11000))]).await;
        let before = ledger.snapshot().await;

        for _ in 0..3 {
            let err = engine.pay_rate(request(dec!(11000))).await.unwrap_err();
            assert!(matches!(
                err.policy(),
                Some(PolicyViolation::NoRateDue { credit, payed: 11, .. }) if credit == "cre4"
            ));
        }
        assert_eq!(ledger.snapshot().await, before);
        let stored = repo.credit("cre4").await.unwrap().unwrap();
        assert_eq!(stored.num_of_payed_rates, 11);
    }

    #[tokio::test]
    async fn test_multiple_outstanding_credits_rejected() {
        let (engine, _, ledger) = setup(&[
            credit("cre5", 2, 0, dec!(10)),
            credit("cre6", 2, 1, dec!(10)),
        ])
        .await;
        let before = ledger.snapshot().await;

        let err = engine.pay_rate(request(dec!(10))).await.unwrap_err();
        assert!(matches!(
            err.policy(),
            Some(PolicyViolation::MultipleOutstandingCredits { .. })
        ));
        assert_eq!(ledger.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_unknown_client() {
        let (engine, _, _) = setup(&[]).await;
        let req = RateRequest {
            client: "cli77".into(),
            amount: Amount::new(dec!(1)).unwrap(),
        };
        assert!(matches!(
            engine.pay_rate(req).await,
            Err(LedgerError::NotFound(id)) if id == "cli77"
        ));
    }
}
