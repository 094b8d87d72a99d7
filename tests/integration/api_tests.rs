//! API tests against a running server
//!
//! Start the server (any store) and run with: cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::Value;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8000";

/// Create an author with a unique email and return its id
async fn create_author(client: &Client) -> String {
    let email = format!("{}@example.com", Uuid::new_v4());
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .form(&[
            ("name", "Jane Doe"),
            ("email", email.as_str()),
            ("date_of_birth", "1970-01-01"),
        ])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let authors: Value = client
        .get(format!("{}/get_authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    authors
        .as_array()
        .expect("Expected an array")
        .iter()
        .find(|a| a["email"] == email.as_str())
        .and_then(|a| a["id"].as_str())
        .expect("Author not listed")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_and_get_author() {
    let client = Client::new();
    let author_id = create_author(&client).await;

    let response = client
        .get(format!("{}/get_author/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], author_id.as_str());
    assert_eq!(body["name"], "Jane Doe");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_author_email() {
    let client = Client::new();
    let email = format!("{}@example.com", Uuid::new_v4());
    let form = [
        ("name", "Jane Doe"),
        ("email", email.as_str()),
        ("date_of_birth", "1970-01-01"),
    ];

    let first = client
        .post(format!("{}/authors", BASE_URL))
        .form(&form)
        .send()
        .await
        .expect("Failed to send request");
    assert!(first.status().is_success());

    let second = client
        .post(format!("{}/authors", BASE_URL))
        .form(&form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_book_with_unknown_author() {
    let client = Client::new();
    let author_id = Uuid::new_v4().to_string();
    let isbn = Uuid::new_v4().to_string();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .form(&[
            ("title", "Go"),
            ("author_id", author_id.as_str()),
            ("published_date", "2015-10-26"),
            ("isbn", isbn.as_str()),
            ("quantity", "1"),
            ("available_copies", "1"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_transaction_with_unknown_book() {
    let client = Client::new();
    let book_id = Uuid::new_v4().to_string();
    let borrower_id = Uuid::new_v4().to_string();

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .form(&[
            ("book_id", book_id.as_str()),
            ("borrower_id", borrower_id.as_str()),
            ("transaction_type", "borrow"),
            ("due_date", "2030-01-15"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
#[ignore]
async fn test_unknown_transaction() {
    let client = Client::new();

    let response = client
        .get(format!("{}/get_transaction/{}", BASE_URL, Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_list_endpoints() {
    let client = Client::new();

    for path in ["get_authors", "get_books", "get_borrowers", "get_transactions"] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());

        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array(), "{} should return an array", path);
    }
}
