//! In-process store with the same constraints as the database schema
//!
//! Rows are kept flat in insertion order and hydrated on read. A single
//! lock guards all four tables, so every operation is atomic.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AuthorStore, BookStore, BorrowerStore, TransactionStore, AUTHOR_NOT_FOUND, BOOK_NOT_FOUND,
    BORROWER_NOT_FOUND, DUPLICATE_EMAIL, DUPLICATE_ISBN, TRANSACTION_NOT_FOUND,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, Book, Borrower, CreateAuthor, CreateBook, CreateBorrower, CreateTransaction,
        Transaction, TransactionType,
    },
};

struct BookRow {
    id: Uuid,
    title: String,
    author_id: Uuid,
    published_date: NaiveDate,
    isbn: String,
    quantity: i32,
    available_copies: i32,
    created_at: DateTime<Utc>,
}

struct TransactionRow {
    id: Uuid,
    book_id: Uuid,
    borrower_id: Uuid,
    transaction_type: TransactionType,
    transaction_date: DateTime<Utc>,
    due_date: NaiveDate,
    return_date: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Tables {
    authors: IndexMap<Uuid, Author>,
    books: IndexMap<Uuid, BookRow>,
    borrowers: IndexMap<Uuid, Borrower>,
    transactions: IndexMap<Uuid, TransactionRow>,
}

impl Tables {
    fn author(&self, id: Uuid) -> AppResult<Author> {
        self.authors
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(AUTHOR_NOT_FOUND.to_string()))
    }

    fn book(&self, id: Uuid) -> AppResult<Book> {
        let row = self
            .books
            .get(&id)
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;
        self.hydrate_book(row)
    }

    fn borrower(&self, id: Uuid) -> AppResult<Borrower> {
        self.borrowers
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(BORROWER_NOT_FOUND.to_string()))
    }

    fn hydrate_book(&self, row: &BookRow) -> AppResult<Book> {
        Ok(Book {
            id: row.id,
            title: row.title.clone(),
            author_id: row.author_id,
            author: self.author(row.author_id)?,
            published_date: row.published_date,
            isbn: row.isbn.clone(),
            quantity: row.quantity,
            available_copies: row.available_copies,
            created_at: row.created_at,
        })
    }

    fn hydrate_transaction(&self, row: &TransactionRow) -> AppResult<Transaction> {
        Ok(Transaction {
            id: row.id,
            borrower_id: row.borrower_id,
            borrower: self.borrower(row.borrower_id)?,
            book_id: row.book_id,
            book: self.book(row.book_id)?,
            transaction_type: row.transaction_type,
            transaction_date: row.transaction_date,
            due_date: row.due_date,
            return_date: row.return_date,
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        if tables.authors.values().any(|a| a.email == data.email) {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let author = Author {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            date_of_birth: data.date_of_birth,
            created_at: data.created_at.unwrap_or_else(Utc::now),
        };
        tables.authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn list(&self) -> AppResult<Vec<Author>> {
        Ok(self.tables.read().await.authors.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.tables.read().await.author(id)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        if tables.books.values().any(|b| b.isbn == data.isbn) {
            return Err(AppError::Conflict(DUPLICATE_ISBN.to_string()));
        }
        if !tables.authors.contains_key(&data.author_id) {
            return Err(AppError::NotFound(AUTHOR_NOT_FOUND.to_string()));
        }

        let row = BookRow {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author_id: data.author_id,
            published_date: data.published_date,
            isbn: data.isbn.clone(),
            quantity: data.quantity,
            available_copies: data.available_copies,
            created_at: data.created_at.unwrap_or_else(Utc::now),
        };
        let book = tables.hydrate_book(&row)?;
        tables.books.insert(row.id, row);
        Ok(book)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        tables.books.values().map(|row| tables.hydrate_book(row)).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.tables.read().await.book(id)
    }
}

#[async_trait]
impl BorrowerStore for MemoryStore {
    async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower> {
        let mut tables = self.tables.write().await;
        if tables.borrowers.values().any(|b| b.email == data.email) {
            return Err(AppError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let now = Utc::now();
        let borrower = Borrower {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            email: data.email.clone(),
            membership_date: data.membership_date.unwrap_or_else(|| now.date_naive()),
            phone_number: data.phone_number.clone(),
            created_at: data.created_at.unwrap_or(now),
        };
        tables.borrowers.insert(borrower.id, borrower.clone());
        Ok(borrower)
    }

    async fn list(&self) -> AppResult<Vec<Borrower>> {
        Ok(self.tables.read().await.borrowers.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Borrower> {
        self.tables.read().await.borrower(id)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn create(&self, data: &CreateTransaction) -> AppResult<Transaction> {
        let mut tables = self.tables.write().await;

        let row = TransactionRow {
            id: Uuid::new_v4(),
            book_id: data.book_id,
            borrower_id: data.borrower_id,
            transaction_type: data.transaction_type,
            transaction_date: data.transaction_date.unwrap_or_else(Utc::now),
            due_date: data.due_date,
            return_date: data.return_date,
        };
        // Fails on dangling references before anything is stored.
        let transaction = tables.hydrate_transaction(&row)?;
        tables.transactions.insert(row.id, row);
        Ok(transaction)
    }

    async fn list(&self) -> AppResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        tables
            .transactions
            .values()
            .map(|row| tables.hydrate_transaction(row))
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Transaction> {
        let tables = self.tables.read().await;
        let row = tables
            .transactions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(TRANSACTION_NOT_FOUND.to_string()))?;
        tables.hydrate_transaction(row)
    }

    async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        tables
            .transactions
            .values()
            .filter(|row| row.borrower_id == borrower_id)
            .map(|row| tables.hydrate_transaction(row))
            .collect()
    }
}
