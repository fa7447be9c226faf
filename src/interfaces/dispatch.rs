use crate::application::clients::NewClient;
use crate::application::credit::CreditRequest;
use crate::application::engine::{LedgerEngine, Request};
use crate::application::payment::RateRequest;
use crate::application::transfer::TransferRequest;
use crate::domain::credit::CreditTerms;
use crate::domain::money::{Amount, Balance, parse_decimal};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Operation names accepted by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Transfer,
    GetCredit,
    PayRate,
    AddClient,
    Query,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transfer => "transfer",
            Operation::GetCredit => "getCredit",
            Operation::PayRate => "payRate",
            Operation::AddClient => "addClient",
            Operation::Query => "query",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operation::Transfer | Operation::GetCredit | Operation::AddClient => 4,
            Operation::PayRate => 2,
            Operation::Query => 1,
        }
    }

    /// Checks the argument count and parses every argument. Runs before any
    /// ledger access.
    pub fn parse_args<S: AsRef<str>>(&self, args: &[S]) -> Result<Request> {
        if args.len() != self.arity() {
            return Err(LedgerError::ArgumentCount {
                operation: self.name(),
                expected: self.arity(),
                actual: args.len(),
            });
        }
        let request = match self {
            Operation::Transfer => Request::Transfer(TransferRequest {
                sender: args[0].as_ref().to_string(),
                receiver: args[1].as_ref().to_string(),
                amount: Amount::parse("amount", args[2].as_ref())?,
                allow_overdraft: args[3].as_ref() == "true",
            }),
            Operation::GetCredit => Request::IssueCredit(CreditRequest {
                client: args[0].as_ref().to_string(),
                terms: CreditTerms {
                    principal: Amount::parse("amount", args[1].as_ref())?,
                    num_of_rates: parse_rates(args[2].as_ref())?,
                    interest: parse_interest(args[3].as_ref())?,
                },
            }),
            Operation::PayRate => Request::PayRate(RateRequest {
                client: args[0].as_ref().to_string(),
                amount: Amount::parse("amount", args[1].as_ref())?,
            }),
            Operation::AddClient => Request::AddClient(NewClient {
                name: args[0].as_ref().to_string(),
                surname: args[1].as_ref().to_string(),
                email: args[2].as_ref().to_string(),
                initial_balance: Balance::new(parse_decimal("initialBalance", args[3].as_ref())?),
            }),
            Operation::Query => Request::Query(args[0].as_ref().to_string()),
        };
        Ok(request)
    }
}

impl FromStr for Operation {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "transfer" => Ok(Operation::Transfer),
            "getCredit" => Ok(Operation::GetCredit),
            "payRate" => Ok(Operation::PayRate),
            "addClient" => Ok(Operation::AddClient),
            "query" => Ok(Operation::Query),
            other => Err(LedgerError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of rates: a positive whole number. `"12.0"` is accepted as 12.
fn parse_rates(raw: &str) -> Result<u32> {
    let value = parse_decimal("numRates", raw)?;
    if !value.fract().is_zero() || value <= Decimal::ZERO {
        return Err(LedgerError::invalid(
            "numRates",
            format!("{raw} is not a positive whole number"),
        ));
    }
    value
        .to_u32()
        .ok_or_else(|| LedgerError::invalid("numRates", format!("{raw} is too large")))
}

fn parse_interest(raw: &str) -> Result<Decimal> {
    let value = parse_decimal("interest", raw)?;
    if value < Decimal::ZERO {
        return Err(LedgerError::invalid("interest", format!("{raw} must not be negative")));
    }
    Ok(value)
}

/// Maps an operation name and its ordered string arguments onto the engine.
pub struct Dispatcher {
    engine: LedgerEngine,
}

impl Dispatcher {
    pub fn new(engine: LedgerEngine) -> Self {
        Self { engine }
    }

    pub async fn invoke<S: AsRef<str>>(
        &self,
        operation: &str,
        args: &[S],
    ) -> Result<Option<Vec<u8>>> {
        let op: Operation = operation.parse()?;
        let request = op.parse_args(args)?;
        debug!(%op, ?request, "dispatching");
        self.engine.handle(request).await
    }
}
