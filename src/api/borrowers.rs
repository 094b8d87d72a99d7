//! Borrower endpoints

use axum::{
    extract::{Path, State},
    Form, Json,
};
use maud::Markup;
use uuid::Uuid;

use super::{forms::BorrowerForm, pages};
use crate::{
    error::AppResult,
    models::{borrower::Borrower, transaction::Transaction},
};

pub async fn borrower_form() -> Markup {
    pages::borrowers_page(None)
}

/// Create a borrower from the form and re-render it
pub async fn create_borrower(
    State(state): State<crate::AppState>,
    Form(form): Form<BorrowerForm>,
) -> AppResult<Markup> {
    let borrower = state.services.borrowers.create(form.try_into()?).await?;
    Ok(pages::borrowers_page(Some(&format!("Borrower {} added", borrower.name))))
}

/// List all borrowers
#[utoipa::path(
    get,
    path = "/get_borrowers",
    tag = "borrowers",
    responses(
        (status = 200, description = "All borrowers", body = Vec<Borrower>)
    )
)]
pub async fn list_borrowers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Borrower>>> {
    let borrowers = state.services.borrowers.list().await?;
    Ok(Json(borrowers))
}

/// Get borrower by ID
#[utoipa::path(
    get,
    path = "/get_borrower/{id}",
    tag = "borrowers",
    params(("id" = String, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower details", body = Borrower),
        (status = 404, description = "Borrower not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_borrower(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Borrower>> {
    let borrower = state.services.borrowers.get_by_id(id).await?;
    Ok(Json(borrower))
}

/// Get the transactions of a borrower
#[utoipa::path(
    get,
    path = "/borrowers/{id}/transactions",
    tag = "borrowers",
    params(("id" = String, Path, description = "Borrower ID")),
    responses(
        (status = 200, description = "Borrower's transactions", body = Vec<Transaction>),
        (status = 404, description = "No transactions found for this borrower", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_borrower_transactions(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = state.services.transactions.list_by_borrower(id).await?;
    Ok(Json(transactions))
}
