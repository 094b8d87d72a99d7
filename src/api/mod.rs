//! HTTP surface: HTML form pages and JSON endpoints

pub mod authors;
pub mod books;
pub mod borrowers;
pub mod forms;
pub mod health;
pub mod openapi;
pub mod pages;
pub mod transactions;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/", get(authors::author_form))
        .route("/authors", get(authors::author_form).post(authors::create_author))
        .route("/get_authors", get(authors::list_authors))
        .route("/get_author/:id", get(authors::get_author))
        // Books
        .route("/books", get(books::book_form).post(books::create_book))
        .route("/get_books", get(books::list_books))
        .route("/get_book/:id", get(books::get_book))
        // Borrowers
        .route("/borrowers", get(borrowers::borrower_form).post(borrowers::create_borrower))
        .route("/get_borrowers", get(borrowers::list_borrowers))
        .route("/get_borrower/:id", get(borrowers::get_borrower))
        .route("/borrowers/:id/transactions", get(borrowers::get_borrower_transactions))
        // Transactions
        .route(
            "/transactions",
            get(transactions::transaction_form).post(transactions::create_transaction),
        )
        .route("/get_transactions", get(transactions::list_transactions))
        .route("/get_transaction/:id", get(transactions::get_transaction))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
