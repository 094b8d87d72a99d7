//! Book catalog service

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::book::{Book, CreateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog. The author must already exist.
    pub async fn create(&self, data: CreateBook) -> AppResult<Book> {
        data.validate()?;
        self.repository.authors.get_by_id(data.author_id).await?;

        let book = self.repository.books.create(&data).await?;
        tracing::info!(book_id = %book.id, isbn = %book.isbn, "Book created");
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }
}
