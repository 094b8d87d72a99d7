//! Borrowers repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::{column, map_insert_error, BorrowerStore, BORROWER_NOT_FOUND, DUPLICATE_EMAIL};
use crate::{
    error::{AppError, AppResult},
    models::borrower::{Borrower, CreateBorrower},
};

#[derive(Clone)]
pub struct BorrowersRepository {
    pool: Pool<Postgres>,
}

impl BorrowersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub(crate) fn borrower_from_row(row: &PgRow, prefix: &str) -> Result<Borrower, sqlx::Error> {
    Ok(Borrower {
        id: row.try_get(column(prefix, "id").as_str())?,
        name: row.try_get(column(prefix, "name").as_str())?,
        email: row.try_get(column(prefix, "email").as_str())?,
        membership_date: row.try_get(column(prefix, "membership_date").as_str())?,
        phone_number: row.try_get(column(prefix, "phone_number").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
    })
}

#[async_trait]
impl BorrowerStore for BorrowersRepository {
    /// Insert a new borrower; membership starts today unless given
    async fn create(&self, data: &CreateBorrower) -> AppResult<Borrower> {
        let borrower = sqlx::query_as::<_, Borrower>(
            r#"
            INSERT INTO borrowers (id, name, email, membership_date, phone_number, created_at)
            VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5, COALESCE($6, NOW()))
            RETURNING id, name, email, membership_date, phone_number, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.membership_date)
        .bind(&data.phone_number)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, DUPLICATE_EMAIL, |_| BORROWER_NOT_FOUND))?;

        Ok(borrower)
    }

    async fn list(&self) -> AppResult<Vec<Borrower>> {
        let rows = sqlx::query_as::<_, Borrower>(
            r#"
            SELECT id, name, email, membership_date, phone_number, created_at
            FROM borrowers
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get borrower by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            r#"
            SELECT id, name, email, membership_date, phone_number, created_at
            FROM borrowers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(BORROWER_NOT_FOUND.to_string()))
    }
}
