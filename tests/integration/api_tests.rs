//! API integration tests
//!
//! Need a running server with its database: `cargo test -- --ignored`

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:4000/api";

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn create(client: &Client, resource: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/{}", BASE_URL, resource))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request")
}

async fn delete(client: &Client, resource: &str, id: i64) -> reqwest::Response {
    client
        .delete(format!("{}/{}/{}", BASE_URL, resource, id))
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_api_index() {
    let client = Client::new();

    let response = client.get(BASE_URL).send().await.expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["endpoints"]["noticias"], "/api/noticias");
}

#[tokio::test]
#[ignore]
async fn test_publication_lifecycle() {
    let client = Client::new();
    let title = unique("Informe X");

    // Slug is derived from the title
    let response = create(
        &client,
        "publicaciones",
        json!({ "title": title, "type": "informe", "status": "draft" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_i64().expect("No id in response");
    let slug = body["data"]["slug"].as_str().expect("No slug").to_string();
    assert!(slug.starts_with("informe-x-"));

    // Fetch by slug
    let response = client
        .get(format!("{}/publicaciones/slug/{}", BASE_URL, slug))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], id);

    // Partial update keeps other fields
    let response = client
        .put(format!("{}/publicaciones/{}", BASE_URL, id))
        .json(&json!({ "author": "Observatorio" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["author"], "Observatorio");
    assert_eq!(body["data"]["type"], "informe");

    // Delete, then it is gone
    let response = delete(&client, "publicaciones", id).await;
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/publicaciones/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(&client, "publicaciones", id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_slug_conflicts() {
    let client = Client::new();
    let name = unique("Categoria");

    let response = create(&client, "categorias", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["data"]["id"].as_i64().expect("No id in response");

    let response = create(&client, "categorias", json!({ "name": name })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);

    delete(&client, "categorias", id).await;
}

#[tokio::test]
#[ignore]
async fn test_missing_required_fields() {
    let client = Client::new();

    let response = create(&client, "eventos", json!({ "title": "Sin tipo" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = create(&client, "eventos", json!({ "title": "X", "type": "concierto" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_search_requires_term() {
    let client = Client::new();

    let response = client
        .get(format!("{}/noticias/search?q=", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_search_without_matches_is_empty() {
    let client = Client::new();

    let response = client
        .get(format!("{}/publicaciones/search?q={}", BASE_URL, unique("zzqx")))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["totalPages"], 0);
}

#[tokio::test]
#[ignore]
async fn test_huge_page_number_is_not_a_server_error() {
    let client = Client::new();

    let response = client
        .get(format!("{}/publicaciones?page=9223372036854775807", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
#[ignore]
async fn test_advanced_search_reports_no_page_count() {
    let client = Client::new();

    let response = client
        .get(format!("{}/publicaciones/search-advanced?q=informe", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["pagination"]["total"].is_number());
    assert!(body["pagination"].get("totalPages").is_none());
}

#[tokio::test]
#[ignore]
async fn test_page_size_is_capped() {
    let client = Client::new();

    let response = client
        .get(format!("{}/publicaciones?page=1&limit=5000", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pagination"]["limit"], 100);
    assert!(body["data"].as_array().expect("data is an array").len() <= 100);
}

#[tokio::test]
#[ignore]
async fn test_non_numeric_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/verificadores/abc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_featured_is_not_shadowed_by_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/noticias/featured?limit=3", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"].as_array().expect("data is an array").len() <= 3);
}

#[tokio::test]
#[ignore]
async fn test_upload_and_delete_file() {
    let client = Client::new();

    let part = multipart::Part::bytes(b"%PDF-1.4 test".to_vec())
        .file_name("Guía Final.pdf")
        .mime_str("application/pdf")
        .expect("Invalid mime type");
    let form = multipart::Form::new()
        .text("type", "infografia")
        .part("file", part);

    let response = client
        .post(format!("{}/uploads/file", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["format"], "PDF");
    let path = body["data"]["path"].as_str().expect("No path").to_string();
    assert!(path.starts_with("infografia/pdf/guia-final-"));

    let response = client
        .delete(format!("{}/uploads/files/{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_upload_rejects_wrong_mime_type() {
    let client = Client::new();

    let part = multipart::Part::bytes(b"plain".to_vec())
        .file_name("notes.txt")
        .mime_str("text/plain")
        .expect("Invalid mime type");
    let form = multipart::Form::new().text("type", "video").part("file", part);

    let response = client
        .post(format!("{}/uploads/file", BASE_URL))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
