//! Business logic services

pub mod authors;
pub mod books;
pub mod borrowers;
pub mod transactions;

use crate::{config::LibraryConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub borrowers: borrowers::BorrowersService,
    pub transactions: transactions::TransactionsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, library_config: LibraryConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            borrowers: borrowers::BorrowersService::new(repository.clone()),
            transactions: transactions::TransactionsService::new(repository.clone(), library_config),
            repository,
        }
    }

    /// Check the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
