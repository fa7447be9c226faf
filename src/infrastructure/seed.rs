//! Demo ledger state: four clients, three banks, four credits and four past
//! transfers.

use crate::application::repository::Repository;
use crate::domain::bank::Bank;
use crate::domain::client::Client;
use crate::domain::credit::Credit;
use crate::domain::ids::EntityKind;
use crate::domain::money::{Amount, Balance};
use crate::domain::transaction::Transaction;
use crate::error::{LedgerError, Result};
use crate::infrastructure::sequence::LedgerSequence;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

/// Writes the demo records and points every id sequence at 5.
pub async fn seed_demo_ledger(repo: &Repository, sequence: &LedgerSequence) -> Result<()> {
    #[rustfmt::skip]
    let credits = [
        credit("cre1", at(2009, 11, 10, 23)?, at(2010, 11, 10, 23)?, dec!(7700), dec!(0.1), 10, 10, dec!(70000)),
        credit("cre2", at(2019, 8, 5, 2)?, at(2020, 8, 5, 2)?, dec!(11000), dec!(0.2), 15, 4, dec!(160500)),
        credit("cre3", at(2020, 1, 17, 12)?, at(2021, 1, 17, 12)?, dec!(9900), dec!(0.1), 10, 5, dec!(90000)),
        credit("cre4", at(2018, 6, 7, 7)?, at(2019, 6, 7, 7)?, dec!(11000), dec!(0.1), 10, 9, dec!(100000)),
    ];

    #[rustfmt::skip]
    let clients = [
        client("cli1", "Nikolina", "Tomic", "tomicN@gmail.com", dec!(3200000),
            &[dec!(20000), dec!(40000), dec!(5000)], true, &credits[0..1]),
        client("cli2", "Nadia", "Radic", "nadia.ra@gmail.com", dec!(54200),
            &[dec!(20000), dec!(30000), dec!(7000)], true, &[]),
        client("cli3", "Mirko", "Ivic", "mirza96@gmail.com", dec!(450000),
            &[dec!(20000)], false, &credits[2..3]),
        client("cli4", "Ivan", "Snobista", "smarac@gmail.com", dec!(0),
            &[dec!(20000)], false, &credits[3..4]),
    ];

    let banks = [
        bank(
            "bank1",
            "National bank",
            1934,
            "Germany",
            &["Germany", "Serbia", "Italy"],
            &[&clients[0], &clients[2]],
        ),
        bank(
            "bank2",
            "Opportunity bank",
            1957,
            "Serbia",
            &["Bosnia", "Serbia", "France", "Israel"],
            &[&clients[1], &clients[3]],
        ),
        bank(
            "bank3",
            "Sberbank",
            2003,
            "Japan",
            &["Japan", "China", "Rusia", "Montenegro"],
            &[&clients[1], &clients[2], &clients[3]],
        ),
    ];

    let transactions = [
        transaction("trans1", at(2009, 11, 10, 23)?, "cli1", "cli3", dec!(20000))?,
        transaction("trans2", at(2019, 8, 5, 2)?, "cli1", "cli2", dec!(30000))?,
        transaction("trans3", at(2020, 1, 17, 12)?, "cli4", "cli2", dec!(7000))?,
        transaction("trans4", at(2018, 6, 7, 7)?, "cli1", "cli4", dec!(20000))?,
    ];

    for c in &clients {
        repo.save_client(c).await?;
    }
    for b in &banks {
        repo.save_bank(b).await?;
    }
    for tx in &transactions {
        repo.save_transaction(tx).await?;
    }
    for c in &credits {
        repo.save_credit(c).await?;
    }
    for kind in EntityKind::ALL {
        sequence.set(kind, 5).await?;
    }

    info!(
        clients = clients.len(),
        banks = banks.len(),
        credits = credits.len(),
        transactions = transactions.len(),
        "seeded demo ledger"
    );
    Ok(())
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| LedgerError::invalid("date", format!("{year}-{month}-{day} {hour}h")))
}

#[allow(clippy::too_many_arguments)]
fn credit(
    id: &str,
    approval_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    rate_amount: Decimal,
    interest: Decimal,
    num_of_rates: u32,
    num_of_payed_rates: u32,
    amount_of_credit: Decimal,
) -> Credit {
    Credit {
        id: id.to_string(),
        approval_date,
        end_date,
        rate_amount,
        interest,
        num_of_rates,
        num_of_payed_rates,
        amount_of_credit,
    }
}

#[allow(clippy::too_many_arguments)]
fn client(
    id: &str,
    name: &str,
    surname: &str,
    email: &str,
    balance: Decimal,
    received: &[Decimal],
    allow_credit: bool,
    credits: &[Credit],
) -> Client {
    let mut client = Client::new(
        id.to_string(),
        name.to_string(),
        surname.to_string(),
        email.to_string(),
        Balance::new(balance),
    );
    client.received_transfers = received.to_vec();
    client.allow_credit = allow_credit;
    for c in credits {
        client.upsert_credit(c.clone());
    }
    client
}

fn bank(
    id: &str,
    name: &str,
    establishment_year: i32,
    origin_country: &str,
    business_countries: &[&str],
    clients: &[&Client],
) -> Bank {
    Bank {
        id: id.to_string(),
        name: name.to_string(),
        establishment_year,
        origin_country: origin_country.to_string(),
        business_countries: business_countries.iter().map(|c| c.to_string()).collect(),
        client_list: clients.iter().map(|c| (*c).clone()).collect(),
    }
}

fn transaction(
    id: &str,
    date: DateTime<Utc>,
    sender: &str,
    receiver: &str,
    amount: Decimal,
) -> Result<Transaction> {
    Ok(Transaction {
        id: id.to_string(),
        date,
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        amount: Amount::new(amount)?,
    })
}
