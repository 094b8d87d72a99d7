//! Author endpoints

use axum::{
    extract::{Path, State},
    Form, Json,
};
use maud::Markup;
use uuid::Uuid;

use super::{forms::AuthorForm, pages};
use crate::{error::AppResult, models::author::Author};

/// Render the author form
pub async fn author_form() -> Markup {
    pages::authors_page(None)
}

/// Create an author from the form and re-render it
pub async fn create_author(
    State(state): State<crate::AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Markup> {
    let author = state.services.authors.create(form.try_into()?).await?;
    Ok(pages::authors_page(Some(&format!("Author {} added", author.name))))
}

/// List all authors
#[utoipa::path(
    get,
    path = "/get_authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/get_author/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}
