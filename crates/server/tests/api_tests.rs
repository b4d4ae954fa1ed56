use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use tower::ServiceExt;

use stockroom_blob::{BlobError, BlobObject, BlobStore};
use stockroom_blob_memory::MemoryBlobStore;
use stockroom_cache_memory::MemoryCacheIndex;
use stockroom_events_memory::MemoryEventBus;
use stockroom_metadata_memory::MemoryProductStore;
use stockroom_orchestrator::ProductOrchestrator;
use stockroom_server::api::{AppState, router};

const BOUNDARY: &str = "stockroom-test-boundary";
const MAX_UPLOAD: usize = 1024 * 1024;

// Three bytes that start a PNG signature.
const CHAIR_BYTES: &[u8] = &[0x89, b'P', b'N'];

// -- Mock blob store ------------------------------------------------------

struct UnreachableBlobStore;

#[async_trait]
impl BlobStore for UnreachableBlobStore {
    fn base_url(&self) -> String {
        "http://minio:9000/products".into()
    }

    async fn put(&self, _key: &str, _content_type: &str, _data: Bytes) -> Result<(), BlobError> {
        Err(BlobError::Connection("connection refused".into()))
    }

    async fn get(&self, key: &str) -> Result<BlobObject, BlobError> {
        Err(BlobError::NotFound(key.to_owned()))
    }

    async fn delete(&self, _key: &str) -> Result<(), BlobError> {
        Err(BlobError::Connection("connection refused".into()))
    }
}

// -- Helpers --------------------------------------------------------------

fn build_app_with(blob: Arc<dyn BlobStore>, max_upload: usize) -> Router {
    let orchestrator = ProductOrchestrator::builder()
        .blob(blob)
        .metadata(Arc::new(MemoryProductStore::new()))
        .cache(Arc::new(MemoryCacheIndex::new()))
        .notifier(Arc::new(MemoryEventBus::new()))
        .build()
        .expect("orchestrator should build");
    router(AppState::new(Arc::new(orchestrator)), max_upload)
}

fn build_app() -> Router {
    build_app_with(
        Arc::new(MemoryBlobStore::with_base_url("http://minio:9000/products")),
        MAX_UPLOAD,
    )
}

fn multipart_body(name: Option<&str>, file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"product_photo\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn create_request(name: Option<&str>, file: Option<(&str, &[u8])>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/products")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(name, file)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_bytes(response: Response) -> Bytes {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn create(app: &Router, name: &str, filename: &str) -> serde_json::Value {
    let response = send(app, create_request(Some(name), Some((filename, CHAIR_BYTES)))).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

fn product_ids(json: &serde_json::Value) -> Vec<i64> {
    json["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

// -- Tests ----------------------------------------------------------------

#[tokio::test]
async fn root_says_hello() {
    let app = build_app();
    let response = send(&app, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Hello World");
}

#[tokio::test]
async fn health_reports_counters() {
    let app = build_app();
    create(&app, "Chair", "chair.png").await;

    let response = send(&app, get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["metrics"]["created"], 1);
    assert_eq!(json["metrics"]["create_failed"], 0);
}

#[tokio::test]
async fn chair_end_to_end() {
    let app = build_app();

    let created = create(&app, "Chair", "chair.png").await;
    assert_eq!(created["type"], "create-product");
    assert_eq!(created["message"], "File uploaded successfully chair.png");
    assert_eq!(created["product"]["name"], "Chair");
    let cache_id = created["cache_id"].as_str().unwrap().to_owned();
    assert!(!cache_id.is_empty());
    assert_eq!(created["image_temp_url"], format!("/cache/{cache_id}"));
    assert_eq!(
        created["image_real_url"],
        "http://minio:9000/products/chair.png"
    );
    assert_eq!(created["product"]["photo_key"], created["image_real_url"]);
    let id = created["product"]["id"].as_i64().unwrap();
    assert!(id > 0);

    let image = send(&app, get(&format!("/cache/{cache_id}"))).await;
    assert_eq!(image.status(), StatusCode::OK);
    assert!(image.headers().contains_key(header::CONTENT_TYPE));
    assert_eq!(image.headers()[header::CONTENT_LENGTH], "3");
    assert_eq!(
        image.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"chair.png\""
    );
    assert_eq!(body_bytes(image).await.as_ref(), CHAIR_BYTES);

    let deleted = send(&app, delete(&format!("/products/{id}"))).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let json = body_json(deleted).await;
    assert_eq!(json["type"], "delete-product");
    assert_eq!(json["message"], "Product deleted successfully");

    // The cache entry is not invalidated and keeps resolving until it expires.
    let stale = send(&app, get(&format!("/cache/{cache_id}"))).await;
    assert_eq!(stale.status(), StatusCode::OK);
    assert_eq!(body_bytes(stale).await.as_ref(), CHAIR_BYTES);

    let listed = body_json(send(&app, get("/products")).await).await;
    assert!(product_ids(&listed).is_empty());

    let again = send(&app, delete(&format!("/products/{id}"))).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(again).await["type"], "product-not-found");
}

#[tokio::test]
async fn repeated_reads_return_identical_bytes() {
    let app = build_app();
    let created = create(&app, "Chair", "chair.png").await;
    let uri = format!("/cache/{}", created["cache_id"].as_str().unwrap());

    let first = body_bytes(send(&app, get(&uri)).await).await;
    let second = body_bytes(send(&app, get(&uri)).await).await;
    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn cache_token_expires_after_ttl() {
    let app = build_app();
    let created = create(&app, "Chair", "chair.png").await;
    let uri = format!("/cache/{}", created["cache_id"].as_str().unwrap());

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(send(&app, get(&uri)).await.status(), StatusCode::OK);

    tokio::time::advance(Duration::from_secs(2)).await;
    let response = send(&app, get(&uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["type"], "file-cache");
    assert_eq!(json["message"], "File not found in cache");
}

#[tokio::test]
async fn unknown_cache_token_is_404() {
    let app = build_app();
    let response = send(&app, get("/cache/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["type"], "file-cache");
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
    let app = build_app();
    for i in 1..=12 {
        create(&app, &format!("Item {i}"), &format!("item-{i}.png")).await;
    }

    let json = body_json(send(&app, get("/products?page=2&limit=5")).await).await;
    assert_eq!(json["type"], "get-products");
    assert_eq!(json["message"], "Products fetched successfully");
    assert_eq!(product_ids(&json), vec![6, 7, 8, 9, 10]);

    let past_end = body_json(send(&app, get("/products?page=4&limit=5")).await).await;
    assert!(product_ids(&past_end).is_empty());
}

#[tokio::test]
async fn malformed_paging_matches_defaults() {
    let app = build_app();
    for i in 1..=12 {
        create(&app, &format!("Item {i}"), &format!("item-{i}.png")).await;
    }

    let defaults = body_json(send(&app, get("/products")).await).await;
    let malformed = body_json(send(&app, get("/products?page=abc&limit=-5")).await).await;
    assert_eq!(product_ids(&defaults), (1..=10).collect::<Vec<_>>());
    assert_eq!(defaults, malformed);
}

#[tokio::test]
async fn same_filename_overwrites_blob() {
    let app = build_app();
    create(&app, "Chair", "chair.png").await;

    let response = send(
        &app,
        create_request(Some("Stool"), Some(("chair.png", &b"stool"[..]))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let first_image = send(&app, get("/cache/1")).await;
    assert_eq!(body_bytes(first_image).await.as_ref(), b"stool");
}

#[tokio::test]
async fn create_without_file_is_400() {
    let app = build_app();
    let response = send(&app, create_request(Some("Chair"), None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["type"], "request-validation");
    assert_eq!(json["message"], "Invalid request body");
}

#[tokio::test]
async fn create_without_name_is_400() {
    let app = build_app();
    let response = send(&app, create_request(None, Some(("chair.png", CHAIR_BYTES)))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "request-validation");

    let listed = body_json(send(&app, get("/products")).await).await;
    assert!(product_ids(&listed).is_empty());
}

#[tokio::test]
async fn create_with_overlong_name_is_400() {
    let app = build_app();
    let name = "x".repeat(256);
    let response = send(&app, create_request(Some(&name), Some(("chair.png", CHAIR_BYTES)))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_multipart_body_is_binding_error() {
    let app = build_app();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"Chair"}"#))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["type"], "request-binding");
    assert_eq!(json["message"], "Invalid request body");
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = build_app_with(Arc::new(MemoryBlobStore::new()), 64);
    let large = vec![0u8; 1024];
    let response = send(&app, create_request(Some("Chair"), Some(("chair.png", large.as_slice())))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = body_json(send(&app, get("/products")).await).await;
    assert!(product_ids(&listed).is_empty());
}

#[tokio::test]
async fn blob_upload_failure_is_500_and_leaves_no_row() {
    let app = build_app_with(Arc::new(UnreachableBlobStore), MAX_UPLOAD);
    let response = send(&app, create_request(Some("Chair"), Some(("chair.png", CHAIR_BYTES)))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["type"], "file-upload-cdn");
    assert_eq!(json["message"], "Error uploading file to CDN");
    assert!(json["error"].as_str().unwrap().contains("connection refused"));

    let listed = body_json(send(&app, get("/products")).await).await;
    assert!(product_ids(&listed).is_empty());
}

#[tokio::test]
async fn delete_with_non_integer_id_is_400() {
    let app = build_app();
    let response = send(&app, delete("/products/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["type"], "request-validation");
    assert_eq!(json["message"], "Invalid product id");
}

#[tokio::test]
async fn delete_missing_product_is_404() {
    let app = build_app();
    for id in ["0", "42", "-1"] {
        let response = send(&app, delete(&format!("/products/{id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "id {id}");
        let json = body_json(response).await;
        assert_eq!(json["type"], "product-not-found");
        assert_eq!(json["message"], "Product not found in database");
    }
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let app = build_app();
    let response = send(&app, get("/api-doc/openapi.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["info"]["title"], "Stockroom API");
    assert!(json["paths"]["/products"].is_object());
    assert!(json["paths"]["/cache/{cache_id}"].is_object());
    assert!(json["paths"]["/products/{id}"].is_object());
}
