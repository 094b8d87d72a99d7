//! Borrow/return transaction endpoints

use axum::{
    extract::{Path, State},
    Form, Json,
};
use maud::Markup;
use uuid::Uuid;

use super::{forms::TransactionForm, pages};
use crate::{error::AppResult, models::transaction::Transaction, AppState};

async fn render(state: &AppState, notice: Option<&str>) -> AppResult<Markup> {
    let books = state.services.books.list().await?;
    let borrowers = state.services.borrowers.list().await?;
    Ok(pages::transactions_page(&books, &borrowers, notice))
}

/// Render the transaction form with book and borrower dropdowns
pub async fn transaction_form(State(state): State<AppState>) -> AppResult<Markup> {
    render(&state, None).await
}

/// Record a transaction from the form and re-render it
pub async fn create_transaction(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> AppResult<Markup> {
    let transaction = state.services.transactions.create(form.try_into()?).await?;
    let notice = format!(
        "{} of {} recorded for {}",
        transaction.transaction_type, transaction.book.title, transaction.borrower.name
    );
    render(&state, Some(&notice)).await
}

/// List all transactions
#[utoipa::path(
    get,
    path = "/get_transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions", body = Vec<Transaction>)
    )
)]
pub async fn list_transactions(State(state): State<AppState>) -> AppResult<Json<Vec<Transaction>>> {
    let transactions = state.services.transactions.list().await?;
    Ok(Json(transactions))
}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/get_transaction/{id}",
    tag = "transactions",
    params(("id" = String, Path, description = "Transaction ID")),
    responses(
        (status = 200, description = "Transaction details", body = Transaction),
        (status = 404, description = "Transaction not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Transaction>> {
    let transaction = state.services.transactions.get_by_id(id).await?;
    Ok(Json(transaction))
}
