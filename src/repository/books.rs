//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::{
    authors::author_from_row, column, map_insert_error, BookStore, AUTHOR_NOT_FOUND,
    BOOK_NOT_FOUND, DUPLICATE_ISBN,
};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook},
};

/// Books joined with their author; author columns are prefixed `author_`
const SELECT_BOOKS: &str = r#"
    SELECT b.id, b.title, b.author_id, b.published_date, b.isbn,
           b.quantity, b.available_copies, b.created_at,
           a.name AS author_name, a.email AS author_email,
           a.date_of_birth AS author_date_of_birth, a.created_at AS author_created_at
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Read a book and its author from a row whose book columns carry `prefix`
pub(crate) fn book_from_row(row: &PgRow, prefix: &str) -> Result<Book, sqlx::Error> {
    let author_prefix = column(prefix, "author_");
    Ok(Book {
        id: row.try_get(column(prefix, "id").as_str())?,
        title: row.try_get(column(prefix, "title").as_str())?,
        author_id: row.try_get(column(prefix, "author_id").as_str())?,
        author: author_from_row(row, &author_prefix)?,
        published_date: row.try_get(column(prefix, "published_date").as_str())?,
        isbn: row.try_get(column(prefix, "isbn").as_str())?,
        quantity: row.try_get(column(prefix, "quantity").as_str())?,
        available_copies: row.try_get(column(prefix, "available_copies").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
    })
}

#[async_trait]
impl BookStore for BooksRepository {
    /// Insert a new book and return it with its author
    async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO books (id, title, author_id, published_date, isbn, quantity, available_copies, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(data.author_id)
        .bind(data.published_date)
        .bind(&data.isbn)
        .bind(data.quantity)
        .bind(data.available_copies)
        .bind(data.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, DUPLICATE_ISBN, |_| AUTHOR_NOT_FOUND))?;

        let row = sqlx::query(&format!("{} WHERE b.id = $1", SELECT_BOOKS))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        let book = book_from_row(&row, "")?;

        tx.commit().await?;
        Ok(book)
    }

    /// List all books with their authors
    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!("{} ORDER BY b.created_at, b.id", SELECT_BOOKS))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| book_from_row(row, "").map_err(AppError::from))
            .collect()
    }

    /// Get book by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", SELECT_BOOKS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        Ok(book_from_row(&row, "")?)
    }
}
