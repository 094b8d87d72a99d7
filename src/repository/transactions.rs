//! Transactions repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::{
    books::book_from_row, borrowers::borrower_from_row, map_insert_error, TransactionStore,
    BOOK_NOT_FOUND, BORROWER_NOT_FOUND, TRANSACTION_NOT_FOUND,
};
use crate::{
    error::{AppError, AppResult},
    models::transaction::{CreateTransaction, Transaction, TransactionType},
};

/// Transactions joined with book, book author and borrower.
/// Related columns are prefixed `book_`, `book_author_` and `borrower_`.
const SELECT_TRANSACTIONS: &str = r#"
    SELECT t.id, t.transaction_type, t.transaction_date, t.due_date, t.return_date,
           t.book_id, t.borrower_id,
           b.title AS book_title, b.author_id AS book_author_id,
           b.published_date AS book_published_date, b.isbn AS book_isbn,
           b.quantity AS book_quantity, b.available_copies AS book_available_copies,
           b.created_at AS book_created_at,
           a.name AS book_author_name, a.email AS book_author_email,
           a.date_of_birth AS book_author_date_of_birth, a.created_at AS book_author_created_at,
           r.name AS borrower_name, r.email AS borrower_email,
           r.phone_number AS borrower_phone_number, r.membership_date AS borrower_membership_date,
           r.created_at AS borrower_created_at
    FROM transactions t
    JOIN books b ON b.id = t.book_id
    JOIN authors a ON a.id = b.author_id
    JOIN borrowers r ON r.id = t.borrower_id
"#;

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn transaction_from_row(row: &PgRow) -> AppResult<Transaction> {
    let transaction_type: String = row.try_get("transaction_type")?;
    let transaction_type = transaction_type
        .parse::<TransactionType>()
        .map_err(AppError::Internal)?;

    Ok(Transaction {
        id: row.try_get("id")?,
        borrower_id: row.try_get("borrower_id")?,
        borrower: borrower_from_row(row, "borrower_")?,
        book_id: row.try_get("book_id")?,
        book: book_from_row(row, "book_")?,
        transaction_type,
        transaction_date: row.try_get("transaction_date")?,
        due_date: row.try_get("due_date")?,
        return_date: row.try_get("return_date")?,
    })
}

#[async_trait]
impl TransactionStore for TransactionsRepository {
    /// Insert a transaction row as given and return it hydrated
    async fn create(&self, data: &CreateTransaction) -> AppResult<Transaction> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (id, book_id, borrower_id, transaction_type, transaction_date, due_date, return_date)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()), $6, $7)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book_id)
        .bind(data.borrower_id)
        .bind(data.transaction_type.as_str())
        .bind(data.transaction_date)
        .bind(data.due_date)
        .bind(data.return_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_insert_error(e, "Transaction already exists", |constraint| match constraint {
                Some("transactions_book_id_fkey") => BOOK_NOT_FOUND,
                _ => BORROWER_NOT_FOUND,
            })
        })?;

        let row = sqlx::query(&format!("{} WHERE t.id = $1", SELECT_TRANSACTIONS))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let transaction = transaction_from_row(&row)?;

        tx.commit().await?;
        Ok(transaction)
    }

    async fn list(&self) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY t.transaction_date, t.id",
            SELECT_TRANSACTIONS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }

    /// Get transaction by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Transaction> {
        let row = sqlx::query(&format!("{} WHERE t.id = $1", SELECT_TRANSACTIONS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(TRANSACTION_NOT_FOUND.to_string()))?;

        transaction_from_row(&row)
    }

    /// Transactions of one borrower; empty when there are none
    async fn list_by_borrower(&self, borrower_id: Uuid) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query(&format!(
            "{} WHERE t.borrower_id = $1 ORDER BY t.transaction_date, t.id",
            SELECT_TRANSACTIONS
        ))
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }
}
