//! OpenAPI documentation for the JSON endpoints

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, borrowers, health, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Lending API",
        version = "0.1.0",
        description = "Authors, books, borrowers and borrow/return transactions"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        // Books
        books::list_books,
        books::get_book,
        // Borrowers
        borrowers::list_borrowers,
        borrowers::get_borrower,
        borrowers::get_borrower_transactions,
        // Transactions
        transactions::list_transactions,
        transactions::get_transaction,
    ),
    components(
        schemas(
            crate::models::author::Author,
            crate::models::book::Book,
            crate::models::borrower::Borrower,
            crate::models::transaction::Transaction,
            crate::models::transaction::TransactionType,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Authors"),
        (name = "books", description = "Book catalog"),
        (name = "borrowers", description = "Library members"),
        (name = "transactions", description = "Borrow/return transactions")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
