//! Borrow/return transaction service
//!
//! Creating a transaction checks that the book and the borrower exist, then
//! inserts the row exactly as given. Book availability is neither checked
//! nor adjusted: `available_copies` keeps the value recorded when the book
//! was created, and concurrent borrows of a single remaining copy all
//! succeed.

use uuid::Uuid;

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
    models::transaction::{CreateTransaction, Transaction},
    repository::Repository,
};

pub const NO_BORROWER_TRANSACTIONS: &str = "No transactions found for this borrower.";

#[derive(Clone)]
pub struct TransactionsService {
    repository: Repository,
    config: LibraryConfig,
}

impl TransactionsService {
    pub fn new(repository: Repository, config: LibraryConfig) -> Self {
        Self { repository, config }
    }

    /// Record a borrow or return event
    pub async fn create(&self, data: CreateTransaction) -> AppResult<Transaction> {
        // Lookups are read-only, so a failure here leaves nothing to undo.
        self.repository.books.get_by_id(data.book_id).await?;
        self.repository.borrowers.get_by_id(data.borrower_id).await?;

        let transaction = self.repository.transactions.create(&data).await?;
        tracing::info!(
            transaction_id = %transaction.id,
            book_id = %transaction.book_id,
            borrower_id = %transaction.borrower_id,
            transaction_type = %transaction.transaction_type,
            "Transaction recorded"
        );
        Ok(transaction)
    }

    pub async fn list(&self) -> AppResult<Vec<Transaction>> {
        self.repository.transactions.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Transaction> {
        self.repository.transactions.get_by_id(id).await
    }

    /// Transactions of one borrower.
    ///
    /// With `empty_relation_is_not_found` set, an empty result is reported as
    /// `NotFound` rather than an empty list.
    pub async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Transaction>> {
        let transactions = self.repository.transactions.list_by_borrower(borrower_id).await?;

        if transactions.is_empty() && self.config.empty_relation_is_not_found {
            return Err(AppError::NotFound(NO_BORROWER_TRANSACTIONS.to_string()));
        }
        Ok(transactions)
    }
}
