//! Book endpoints

use axum::{
    extract::{Path, State},
    Form, Json,
};
use maud::Markup;
use uuid::Uuid;

use super::{forms::BookForm, pages};
use crate::{error::AppResult, models::book::Book};

/// Render the book form with the author dropdown
pub async fn book_form(State(state): State<crate::AppState>) -> AppResult<Markup> {
    let authors = state.services.authors.list().await?;
    Ok(pages::books_page(&authors, None))
}

/// Create a book from the form and re-render it
pub async fn create_book(
    State(state): State<crate::AppState>,
    Form(form): Form<BookForm>,
) -> AppResult<Markup> {
    let book = state.services.books.create(form.try_into()?).await?;
    let authors = state.services.authors.list().await?;
    Ok(pages::books_page(&authors, Some(&format!("Book {} added", book.title))))
}

/// List all books with their authors
#[utoipa::path(
    get,
    path = "/get_books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/get_book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}
