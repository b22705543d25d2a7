//! API integration tests
//!
//! These run against a live server with a reachable database:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// ISBNs unique per test run so the suite can be re-run against the same database
fn unique_isbn(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", tag, nanos)
}

async fn create_book(client: &Client, isbn: &str) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "author": "Test Author",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse response")
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // With the database up this is 200; a dead database turns it into 503
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_get_and_delete_book() {
    let client = Client::new();
    let isbn = unique_isbn("crud");

    let created = create_book(&client, &isbn).await;
    let book_id = created["id"].as_i64().expect("No book ID");
    assert_eq!(created["isbn"], isbn.as_str());

    // Get it back
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Test Book");

    // Delete it
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // Gone now
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_rejected() {
    let client = Client::new();
    let isbn = unique_isbn("dup");

    create_book(&client, &isbn).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Another Book",
            "author": "Another Author",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0], "ISBN already registered.");
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_fields() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "author": "",
            "isbn": ""
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"].as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
#[ignore]
async fn test_update_book_keeps_isbn() {
    let client = Client::new();
    let isbn = unique_isbn("upd");

    let created = create_book(&client, &isbn).await;
    let book_id = created["id"].as_i64().expect("No book ID");

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({
            "title": "Updated Title",
            "author": "Updated Author"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Updated Title");
    assert_eq!(body["isbn"], isbn.as_str());
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = Client::new();
    let isbn = unique_isbn("search");

    create_book(&client, &isbn).await;

    let response = client
        .get(format!("{}/books?title=test&per_page=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["items"].is_array());
    assert!(body["total"].as_i64().unwrap_or(0) >= 1);
    assert_eq!(body["per_page"], 5);
}

#[tokio::test]
#[ignore]
async fn test_page_zero_echoed_as_first_page() {
    let client = Client::new();
    let isbn = unique_isbn("page0");

    create_book(&client, &isbn).await;

    let response = client
        .get(format!("{}/books?page=0&per_page=5", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // page=0 serves the first page, and the response says so
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["page"], 1);
    assert!(body["items"].as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let isbn = unique_isbn("loan");

    create_book(&client, &isbn).await;

    // Lend the book
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "customer": "Ann Customer",
            "customer_email": "ann@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["id"].as_i64().expect("No loan ID");

    // Lending the same book again is rejected
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "customer": "Bob Customer",
            "customer_email": "bob@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0], "Book already loaned.");

    // Return the book
    let response = client
        .patch(format!("{}/loans/{}", BASE_URL, loan_id))
        .json(&json!({ "returned": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["returned"], true);
    assert_eq!(body["book"]["isbn"], isbn.as_str());

    // Lending is possible again after the return
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "customer": "Bob Customer",
            "customer_email": "bob@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_loan_unknown_isbn() {
    let client = Client::new();

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": "no-such-isbn",
            "customer": "Ann Customer",
            "customer_email": "ann@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["errors"][0], "Book not found for informed ISBN.");
}

#[tokio::test]
#[ignore]
async fn test_return_unknown_loan() {
    let client = Client::new();

    let response = client
        .patch(format!("{}/loans/0", BASE_URL))
        .json(&json!({ "returned": true }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_filter_loans_by_isbn_or_customer() {
    let client = Client::new();
    let isbn = unique_isbn("filter");

    let book = create_book(&client, &isbn).await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "isbn": isbn,
            "customer": "Filter Customer",
            "customer_email": "filter@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // By ISBN
    let response = client
        .get(format!("{}/loans?isbn={}", BASE_URL, isbn))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["book"]["isbn"], isbn.as_str());

    // By the book's loan listing
    let response = client
        .get(format!("{}/books/{}/loans", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["customer"], "Filter Customer");
}
