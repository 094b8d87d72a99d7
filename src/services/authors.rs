//! Author service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::author::{Author, CreateAuthor},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, data: CreateAuthor) -> AppResult<Author> {
        data.validate()?;
        let author = self.repository.authors.create(&data).await?;
        tracing::info!(author_id = %author.id, "Author created");
        Ok(author)
    }

    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.repository.authors.get_by_id(id).await
    }
}
