//! Borrow/return transaction model and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{book::Book, borrower::Borrower};

/// Kind of lending event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Borrow,
    Return,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Borrow => "borrow",
            TransactionType::Return => "return",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "borrow" => Ok(TransactionType::Borrow),
            "return" => Ok(TransactionType::Return),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// Transaction with book (and its author) and borrower resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Transaction {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub borrower: Borrower,
    pub book_id: Uuid,
    pub book: Book,
    pub transaction_type: TransactionType,
    pub transaction_date: DateTime<Utc>,
    pub due_date: NaiveDate,
    /// Set by the caller on return transactions
    pub return_date: Option<DateTime<Utc>>,
}

/// Create transaction request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTransaction {
    pub book_id: Uuid,
    pub borrower_id: Uuid,
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// Defaults to the insertion time
    pub transaction_date: Option<DateTime<Utc>>,
    pub due_date: NaiveDate,
    pub return_date: Option<DateTime<Utc>>,
}
