use miette::Diagnostic;
use rust_decimal::Decimal;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Business-rule rejections. Each one is raised before the first write of an
/// operation, so a rejected call never changes the ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyViolation {
    #[error(
        "{client} does not have enough money on the account: balance {balance}, requested {amount}"
    )]
    InsufficientFunds {
        client: String,
        balance: Decimal,
        amount: Decimal,
    },
    #[error(
        "{client} overstepped the allowed minus of {allowed_minus}: resulting balance {resulting_balance}"
    )]
    OverdraftExceeded {
        client: String,
        allowed_minus: Decimal,
        resulting_balance: Decimal,
    },
    #[error(
        "Requested loan of {requested} for {client} is too high, limit is {allowed}"
    )]
    LoanTooLarge {
        client: String,
        requested: Decimal,
        allowed: Decimal,
    },
    #[error("{client} already has an unpaid loan")]
    CreditAlreadyOutstanding { client: String },
    #[error("Rate for {credit} is {expected}, got {offered}")]
    WrongRateAmount {
        credit: String,
        expected: Decimal,
        offered: Decimal,
    },
    #[error("{credit} has no rate left to pay: {payed} of {rates} rates paid")]
    NoRateDue {
        credit: String,
        payed: u32,
        rates: u32,
    },
    #[error("There is no unpaid credit for {client}")]
    NoOutstandingCredit { client: String },
    #[error("{client} has more than one unpaid credit: {}", credits.join(", "))]
    MultipleOutstandingCredits {
        client: String,
        credits: Vec<String>,
    },
}

#[derive(Error, Debug, Diagnostic)]
pub enum LedgerError {
    #[error(
        "Incorrect number of arguments for {operation}. Expected {expected}, got {actual}"
    )]
    #[diagnostic(code(creditledger::argument::count))]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid {name}: {reason}")]
    #[diagnostic(code(creditledger::argument::invalid))]
    InvalidArgument { name: &'static str, reason: String },

    #[error("{0} does not exist")]
    #[diagnostic(code(creditledger::not_found))]
    NotFound(String),

    #[error(transparent)]
    #[diagnostic(code(creditledger::policy))]
    Policy(#[from] PolicyViolation),

    #[error("Cannot encode or decode record {key}: {source}")]
    #[diagnostic(code(creditledger::serialization))]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    #[diagnostic(code(creditledger::storage))]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(
        "Unknown operation {0}, expected one of transfer, getCredit, payRate, addClient, query"
    )]
    #[diagnostic(code(creditledger::unknown_operation))]
    UnknownOperation(String),
}

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    NotFound,
    Policy,
    Serialization,
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Argument => "argument",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Policy => "policy",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Storage => "storage",
        };
        f.write_str(name)
    }
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::ArgumentCount { .. }
            | LedgerError::InvalidArgument { .. }
            | LedgerError::UnknownOperation(_) => ErrorKind::Argument,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::Policy(_) => ErrorKind::Policy,
            LedgerError::Serialization { .. } => ErrorKind::Serialization,
            LedgerError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Wraps any backend failure as a storage error.
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LedgerError::Storage(err.into())
    }

    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub fn policy(&self) -> Option<&PolicyViolation> {
        match self {
            LedgerError::Policy(violation) => Some(violation),
            _ => None,
        }
    }
}
