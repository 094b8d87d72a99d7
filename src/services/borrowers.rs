//! Borrower service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::borrower::{Borrower, CreateBorrower},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowersService {
    repository: Repository,
}

impl BorrowersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, data: CreateBorrower) -> AppResult<Borrower> {
        data.validate()?;
        let borrower = self.repository.borrowers.create(&data).await?;
        tracing::info!(borrower_id = %borrower.id, "Borrower created");
        Ok(borrower)
    }

    pub async fn list(&self) -> AppResult<Vec<Borrower>> {
        self.repository.borrowers.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Borrower> {
        self.repository.borrowers.get_by_id(id).await
    }
}
