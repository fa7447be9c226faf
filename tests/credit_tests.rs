use creditledger::error::{LedgerError, PolicyViolation};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod common;

#[tokio::test]
async fn test_loan_above_five_times_average_is_denied() {
    let (dispatcher, ledger) = common::seeded().await;
    let before = ledger.snapshot().await;

    // 5 x 21,666.67 is about 108,333
    let err = dispatcher
        .invoke("getCredit", &["cli1", "200000", "10", "0.1"])
        .await
        .unwrap_err();
    assert!(matches!(
        err.policy(),
        Some(PolicyViolation::LoanTooLarge { client, .. }) if client == "cli1"
    ));
    assert_eq!(ledger.snapshot().await, before);
}

#[tokio::test]
async fn test_credit_limit_boundary() {
    let (dispatcher, ledger) = common::seeded().await;

    // cli2 received [20000, 30000, 7000]: average 19000, limit 95000
    let err = dispatcher
        .invoke("getCredit", &["cli2", "95000.0001", "10", "0.1"])
        .await
        .unwrap_err();
    assert!(matches!(
        err.policy(),
        Some(PolicyViolation::LoanTooLarge { allowed, .. }) if *allowed == dec!(95000)
    ));

    let payload = dispatcher
        .invoke("getCredit", &["cli2", "95000", "10", "0.1"])
        .await
        .unwrap();
    assert_eq!(common::payload_str(payload), "cre5");

    let client = common::client(&ledger, "cli2").await;
    assert!(!client.allow_credit);
    let credit = &client.credits["cre5"];
    assert_eq!(credit.rate_amount, dec!(10450));
    assert_eq!(credit.amount_of_credit, dec!(95000));
    assert_eq!(credit.num_of_payed_rates, 0);

    let standalone = common::record(&ledger, "cre5").await;
    let rate: Decimal = standalone["RateAmount"].as_str().unwrap().parse().unwrap();
    assert_eq!(rate, dec!(10450));
    assert_eq!(standalone["NumOfRates"], 10);
}

#[tokio::test]
async fn test_outstanding_credit_blocks_issuance() {
    let (dispatcher, ledger) = common::seeded().await;
    let before = ledger.snapshot().await;

    // cli3 is still repaying cre3
    let err = dispatcher
        .invoke("getCredit", &["cli3", "1", "1", "0"])
        .await
        .unwrap_err();
    assert!(matches!(
        err.policy(),
        Some(PolicyViolation::CreditAlreadyOutstanding { .. })
    ));
    assert!(err.to_string().contains("unpaid loan"));
    assert_eq!(ledger.snapshot().await, before);
}

#[tokio::test]
async fn test_new_client_has_no_credit_limit() {
    let (dispatcher, _) = common::seeded().await;
    let id = common::payload_str(
        dispatcher
            .invoke("addClient", &["Pera", "Peric", "pera@example.com", "1000000"])
            .await
            .unwrap(),
    );
    assert_eq!(id, "cli5");

    let err = dispatcher
        .invoke("getCredit", &[id.as_str(), "1", "1", "0"])
        .await
        .unwrap_err();
    assert!(matches!(
        err.policy(),
        Some(PolicyViolation::LoanTooLarge { .. })
    ));
}

#[tokio::test]
async fn test_credit_argument_errors() {
    let (dispatcher, ledger) = common::seeded().await;
    let before = ledger.snapshot().await;

    for args in [
        vec!["cli1", "1000", "10"],
        vec!["cli1", "abc", "10", "0.1"],
        vec!["cli1", "1000", "ten", "0.1"],
        vec!["cli1", "1000", "10", "x"],
    ] {
        let err = dispatcher.invoke("getCredit", &args).await.unwrap_err();
        assert_eq!(
            err.kind(),
            creditledger::error::ErrorKind::Argument,
            "{args:?}"
        );
    }
    assert!(matches!(
        dispatcher
            .invoke("getCredit", &["cli99", "1", "1", "0"])
            .await,
        Err(LedgerError::NotFound(_))
    ));
    assert_eq!(ledger.snapshot().await, before);
}
