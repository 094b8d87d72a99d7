//! Router tests against the in-process store

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use library_lending_server::{api, config::AppConfig, repository::Repository, AppState};

fn app() -> Router {
    app_with(AppConfig::default())
}

fn app_with(config: AppConfig) -> Router {
    api::create_router(AppState::new(config, Repository::in_memory()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("Router failed");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).expect("Response is not JSON"))
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Create an author and return its id
async fn create_author(app: &Router, email: &str) -> String {
    let (status, _) = post_form(
        app,
        "/authors",
        &format!("name=Jane+Doe&email={}&date_of_birth=1970-01-01", email),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    find_id(app, "/get_authors", "email", email).await
}

async fn create_book(app: &Router, author_id: &str, isbn: &str, copies: u32) -> String {
    let (status, _) = post_form(
        app,
        "/books",
        &format!(
            "title=Go&author_id={}&published_date=2015-10-26&isbn={}&quantity={}&available_copies={}",
            author_id, isbn, copies, copies
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    find_id(app, "/get_books", "isbn", isbn).await
}

async fn create_borrower(app: &Router, email: &str) -> String {
    let (status, _) = post_form(
        app,
        "/borrowers",
        &format!("name=C&email={}&phone_number=555-0100", email),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    find_id(app, "/get_borrowers", "email", email).await
}

fn borrow_form(book_id: &str, borrower_id: &str) -> String {
    let due = (Utc::now() + Duration::days(14)).date_naive();
    format!(
        "book_id={}&borrower_id={}&transaction_type=borrow&due_date={}&return_date=",
        book_id, borrower_id, due
    )
}

async fn find_id(app: &Router, uri: &str, field: &str, value: &str) -> String {
    let decoded = value.replace("%40", "@");
    let (_, body) = get_json(app, uri).await;
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .find(|entry| entry[field] == decoded.as_str())
        .and_then(|entry| entry["id"].as_str())
        .expect("Created entity not listed")
        .to_string()
}

#[tokio::test]
async fn test_forms_render() {
    let app = app();
    for uri in ["/", "/authors", "/books", "/borrowers", "/transactions"] {
        let (status, body) = send(&app, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body.contains("<form"), "{}", uri);
    }
}

#[tokio::test]
async fn test_end_to_end_lending() {
    let app = app();
    let author_id = create_author(&app, "jane%40x.com").await;
    let book_id = create_book(&app, &author_id, "123", 2).await;
    let borrower_id = create_borrower(&app, "c%40x.com").await;

    let (status, page) = post_form(&app, "/transactions", &borrow_form(&book_id, &borrower_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("borrow of Go recorded for C"));

    let (_, transactions) = get_json(&app, "/get_transactions").await;
    let transaction_id = transactions[0]["id"].as_str().unwrap().to_string();

    let (status, transaction) = get_json(&app, &format!("/get_transaction/{}", transaction_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(transaction["book"]["author"]["id"], author_id.as_str());
    assert_eq!(transaction["book_id"], book_id.as_str());
    assert_eq!(transaction["borrower"]["id"], borrower_id.as_str());
    assert_eq!(transaction["transaction_type"], "borrow");
    assert!(transaction["return_date"].is_null());

    let (status, author) = get_json(&app, &format!("/get_author/{}", author_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["name"], "Jane Doe");
    assert_eq!(author["date_of_birth"], "1970-01-01");

    let (status, listed) = get_json(&app, &format!("/borrowers/{}/transactions", borrower_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_keys_are_rejected() {
    let app = app();
    let author_id = create_author(&app, "jane%40x.com").await;

    let (status, body) = post_form(
        &app,
        "/authors",
        "name=Other&email=jane%40x.com&date_of_birth=1980-05-05",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["message"], "Email already exists");

    create_author(&app, "john%40x.com").await;

    create_book(&app, &author_id, "123", 1).await;
    let (status, body) = post_form(
        &app,
        "/books",
        &format!(
            "title=Again&author_id={}&published_date=2020-01-01&isbn=123&quantity=1&available_copies=1",
            author_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("ISBN already exists"));

    create_borrower(&app, "c%40x.com").await;
    let (status, _) = post_form(&app, "/borrowers", "name=D&email=c%40x.com&phone_number=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_with_unknown_author() {
    let app = app();
    let (status, body) = post_form(
        &app,
        "/books",
        &format!(
            "title=Go&author_id={}&published_date=2015-10-26&isbn=1&quantity=1&available_copies=1",
            uuid::Uuid::new_v4()
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Author not found"));
}

#[tokio::test]
async fn test_transaction_with_missing_references() {
    let app = app();
    let author_id = create_author(&app, "jane%40x.com").await;
    let book_id = create_book(&app, &author_id, "123", 1).await;
    let borrower_id = create_borrower(&app, "c%40x.com").await;
    let unknown = uuid::Uuid::new_v4().to_string();

    let (status, body) = post_form(&app, "/transactions", &borrow_form(&unknown, &borrower_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Book not found"));

    let (status, body) = post_form(&app, "/transactions", &borrow_form(&book_id, &unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Borrower not found"));

    let (_, transactions) = get_json(&app, "/get_transactions").await;
    assert!(transactions.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_lookups_of_unknown_ids() {
    let app = app();
    let unknown = uuid::Uuid::new_v4();
    for (uri, message) in [
        (format!("/get_author/{}", unknown), "Author not found"),
        (format!("/get_book/{}", unknown), "Book not found"),
        (format!("/get_borrower/{}", unknown), "Borrower not found"),
        (format!("/get_transaction/{}", unknown), "Transaction not found"),
    ] {
        let (status, body) = get_json(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], message);
    }

    let (status, _) = send(&app, Request::get("/get_author/not-a-uuid").body(Body::empty()).unwrap()).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_borrower_without_transactions_is_not_found() {
    let app = app();
    let borrower_id = create_borrower(&app, "c%40x.com").await;

    let (status, body) = get_json(&app, &format!("/borrowers/{}/transactions", borrower_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No transactions found for this borrower.");
}

#[tokio::test]
async fn test_borrower_without_transactions_when_policy_disabled() {
    let mut config = AppConfig::default();
    config.library.empty_relation_is_not_found = false;
    let app = app_with(config);
    let borrower_id = create_borrower(&app, "c%40x.com").await;

    let (status, body) = get_json(&app, &format!("/borrowers/{}/transactions", borrower_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Array(Vec::new()));
}

/// Availability is never checked or decremented, so two concurrent borrows of
/// the last copy both succeed.
#[tokio::test]
async fn test_concurrent_borrows_of_last_copy_both_succeed() {
    let app = app();
    let author_id = create_author(&app, "jane%40x.com").await;
    let book_id = create_book(&app, &author_id, "123", 1).await;
    let first = create_borrower(&app, "a%40x.com").await;
    let second = create_borrower(&app, "b%40x.com").await;

    let first_form = borrow_form(&book_id, &first);
    let second_form = borrow_form(&book_id, &second);
    let (a, b) = tokio::join!(
        post_form(&app, "/transactions", &first_form),
        post_form(&app, "/transactions", &second_form),
    );
    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);

    let (_, transactions) = get_json(&app, "/get_transactions").await;
    assert_eq!(transactions.as_array().unwrap().len(), 2);

    let (_, book) = get_json(&app, &format!("/get_book/{}", book_id)).await;
    assert_eq!(book["available_copies"], 1);
    assert_eq!(book["quantity"], 1);
}

#[tokio::test]
async fn test_return_transaction_keeps_return_date() {
    let app = app();
    let author_id = create_author(&app, "jane%40x.com").await;
    let book_id = create_book(&app, &author_id, "123", 1).await;
    let borrower_id = create_borrower(&app, "c%40x.com").await;

    let (status, _) = post_form(
        &app,
        "/transactions",
        &format!(
            "book_id={}&borrower_id={}&transaction_type=RETURN&transaction_date=2024-03-01T09:00&due_date=2024-03-10&return_date=2024-03-05T10:30",
            book_id, borrower_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, transactions) = get_json(&app, "/get_transactions").await;
    let transaction = &transactions[0];
    assert_eq!(transaction["transaction_type"], "return");
    assert_eq!(transaction["due_date"], "2024-03-10");
    assert_eq!(transaction["return_date"], "2024-03-05T10:30:00Z");
    assert_eq!(transaction["transaction_date"], "2024-03-01T09:00:00Z");
}

#[tokio::test]
async fn test_invalid_form_values_answer_bad_request() {
    let app = app();
    let (status, _) = post_form(&app, "/authors", "name=X&email=x%40x.com&date_of_birth=someday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let author_id = create_author(&app, "jane%40x.com").await;
    let (status, body) = post_form(
        &app,
        "/books",
        &format!(
            "title=Go&author_id={}&published_date=2015-10-26&isbn=9&quantity=1&available_copies=5",
            author_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Available copies cannot exceed quantity"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let (status, body) = get_json(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/get_transactions"].is_object());
}
