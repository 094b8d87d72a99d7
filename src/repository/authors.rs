//! Authors repository for database operations

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::{column, map_insert_error, AuthorStore, AUTHOR_NOT_FOUND, DUPLICATE_EMAIL};
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, CreateAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Read an author from a row whose author columns carry `prefix`
pub(crate) fn author_from_row(row: &PgRow, prefix: &str) -> Result<Author, sqlx::Error> {
    Ok(Author {
        id: row.try_get(column(prefix, "id").as_str())?,
        name: row.try_get(column(prefix, "name").as_str())?,
        email: row.try_get(column(prefix, "email").as_str())?,
        date_of_birth: row.try_get(column(prefix, "date_of_birth").as_str())?,
        created_at: row.try_get(column(prefix, "created_at").as_str())?,
    })
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    /// Insert a new author
    async fn create(&self, data: &CreateAuthor) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, email, date_of_birth, created_at)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING id, name, email, date_of_birth, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.date_of_birth)
        .bind(data.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, DUPLICATE_EMAIL, |_| AUTHOR_NOT_FOUND))?;

        Ok(author)
    }

    /// List all authors in creation order
    async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, email, date_of_birth, created_at FROM authors ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            "SELECT id, name, email, date_of_birth, created_at FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(AUTHOR_NOT_FOUND.to_string()))
    }
}
