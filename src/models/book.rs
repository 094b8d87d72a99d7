//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::author::Author;

/// Book with its author resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub author: Author,
    pub published_date: NaiveDate,
    /// Unique across all books
    pub isbn: String,
    /// Total owned copies
    pub quantity: i32,
    /// Copies currently lendable, as recorded at creation
    pub available_copies: i32,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_copies"))]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author_id: Uuid,
    pub published_date: NaiveDate,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "Available copies cannot be negative"))]
    pub available_copies: i32,
    pub created_at: Option<DateTime<Utc>>,
}

fn validate_copies(book: &CreateBook) -> Result<(), ValidationError> {
    if book.available_copies > book.quantity {
        let mut error = ValidationError::new("available_copies");
        error.message = Some("Available copies cannot exceed quantity".into());
        return Err(error);
    }
    Ok(())
}
