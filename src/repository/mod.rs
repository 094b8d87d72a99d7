//! Repository layer for database operations
//!
//! Each entity has a storage trait; `Repository` bundles one implementation
//! of each behind `Arc<dyn ...>` so services never see the backend.

pub mod authors;
pub mod books;
pub mod borrowers;
pub mod memory;
pub mod transactions;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, Borrower, CreateAuthor, CreateBook, CreateBorrower, CreateTransaction,
        Transaction,
    },
};

pub const AUTHOR_NOT_FOUND: &str = "Author not found";
pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const BORROWER_NOT_FOUND: &str = "Borrower not found";
pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";
pub const DUPLICATE_EMAIL: &str = "Email already exists";
pub const DUPLICATE_ISBN: &str = "ISBN already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn create(&self, data: &CreateAuthor) -> AppResult<Author>;
    async fn list(&self) -> AppResult<Vec<Author>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Author>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, data: &CreateBook) -> AppResult<Book>;
    async fn list(&self) -> AppResult<Vec<Book>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Book>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowerStore: Send + Sync {
    async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower>;
    async fn list(&self) -> AppResult<Vec<Borrower>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Borrower>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn create(&self, data: &CreateTransaction) -> AppResult<Transaction>;
    async fn list(&self) -> AppResult<Vec<Transaction>>;
    async fn get_by_id(&self, id: Uuid) -> AppResult<Transaction>;
    async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Transaction>>;
}

/// Main repository struct holding one store per entity
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
    pub borrowers: Arc<dyn BorrowerStore>,
    pub transactions: Arc<dyn TransactionStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            borrowers: Arc::new(borrowers::BorrowersRepository::new(pool.clone())),
            transactions: Arc::new(transactions::TransactionsRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository backed by a fresh in-process store
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            pool: None,
            authors: store.clone(),
            books: store.clone(),
            borrowers: store.clone(),
            transactions: store,
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_stores(
        authors: Arc<dyn AuthorStore>,
        books: Arc<dyn BookStore>,
        borrowers: Arc<dyn BorrowerStore>,
        transactions: Arc<dyn TransactionStore>,
    ) -> Self {
        Self {
            pool: None,
            authors,
            books,
            borrowers,
            transactions,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }

    /// Close the connection pool, waiting for checked-out connections
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

/// Translate constraint violations raised by an INSERT into domain errors
pub(crate) fn map_insert_error(
    err: sqlx::Error,
    on_unique: &str,
    on_foreign_key: impl FnOnce(Option<&str>) -> &'static str,
) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            // unique_violation
            Some("23505") => return AppError::Conflict(on_unique.to_string()),
            // foreign_key_violation
            Some("23503") => return AppError::NotFound(on_foreign_key(db.constraint()).to_string()),
            _ => {}
        }
    }
    AppError::Database(err)
}

/// Column name with an alias prefix, e.g. `book_` + `title`
pub(crate) fn column(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name)
}
