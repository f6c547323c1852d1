//! Integration tests for the points API
//!
//! These tests drive the router end to end against real store backends.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use points_api::{create_router, AppState, ErrorResponse, PointsResponse, ProcessReceiptResponse};
use points_core::{ReceiptId, ScoredReceipt};
use points_store::{MemoryStore, ReceiptStore, SledStore, StoreError, StoreResult};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Store whose backend is always down
struct UnavailableStore;

#[async_trait]
impl ReceiptStore for UnavailableStore {
    async fn store(&self, _receipt: &ScoredReceipt) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn fetch(&self, _id: &ReceiptId) -> StoreResult<ScoredReceipt> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

fn create_test_server_with(store: Arc<dyn ReceiptStore>) -> TestServer {
    let router = create_router(AppState::new(store));
    TestServer::new(router).unwrap()
}

fn create_test_server() -> TestServer {
    create_test_server_with(Arc::new(MemoryStore::new()))
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

fn corner_market_receipt() -> Value {
    json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    })
}

async fn submit(server: &TestServer, receipt: &Value) -> String {
    let response = server.post("/receipts/process").json(receipt).await;
    response.assert_status_ok();
    response.json::<ProcessReceiptResponse>().id
}

async fn points_for(server: &TestServer, id: &str) -> u64 {
    let response = server.get(&format!("/receipts/{}/points", id)).await;
    response.assert_status_ok();
    response.json::<PointsResponse>().points
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store_backend"], "memory");
}

#[tokio::test]
async fn test_ready_check() {
    let server = create_test_server();

    let response = server.get("/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_ready_check_store_down() {
    let server = create_test_server_with(Arc::new(UnavailableStore));

    let response = server.get("/ready").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

// ============ Receipt Endpoint Tests ============

#[tokio::test]
async fn test_process_then_fetch_points() {
    let server = create_test_server();

    let target_id = submit(&server, &target_receipt()).await;
    let market_id = submit(&server, &corner_market_receipt()).await;

    assert_eq!(points_for(&server, &target_id).await, 28);
    assert_eq!(points_for(&server, &market_id).await, 109);
}

#[tokio::test]
async fn test_duplicate_submissions_get_distinct_ids() {
    let server = create_test_server();

    let mut ids = HashSet::new();
    for _ in 0..5 {
        let id = submit(&server, &target_receipt()).await;
        assert!(ids.insert(id));
    }

    for id in &ids {
        assert_eq!(points_for(&server, id).await, 28);
    }
}

#[tokio::test]
async fn test_get_points_not_found() {
    let server = create_test_server();

    let response = server.get("/receipts/nonexistent/points").await;

    response.assert_status_not_found();
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_amounts_still_accepted() {
    let server = create_test_server();

    let receipt = json!({
        "retailer": "Abc",
        "purchaseDate": "not-a-date",
        "purchaseTime": "later",
        "items": [
            { "shortDescription": "abc", "price": "free" },
            { "shortDescription": "xyz", "price": "$5" }
        ],
        "total": "a lot"
    });

    let id = submit(&server, &receipt).await;

    // 3 retailer characters plus one item pair
    assert_eq!(points_for(&server, &id).await, 8);
}

#[tokio::test]
async fn test_process_invalid_json() {
    let server = create_test_server();

    let response = server
        .post("/receipts/process")
        .bytes(Bytes::from_static(b"{\"retailer\": "))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_process_wrong_shape() {
    let server = create_test_server();

    // Total must be a string
    let mut receipt = target_receipt();
    receipt["total"] = json!(35.35);
    let response = server.post("/receipts/process").json(&receipt).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Items are required
    let response = server
        .post("/receipts/process")
        .json(&json!({
            "retailer": "Target",
            "purchaseDate": "2022-01-01",
            "purchaseTime": "13:01",
            "total": "1.00"
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_process_without_json_content_type() {
    let server = create_test_server();

    // text/plain
    let response = server
        .post("/receipts/process")
        .text(target_receipt().to_string())
        .await;
    response.assert_status_ok();
    let id = response.json::<ProcessReceiptResponse>().id;
    assert_eq!(points_for(&server, &id).await, 28);

    // Form encoding, as sent by `curl -d`
    let response = server
        .post("/receipts/process")
        .bytes(Bytes::from(corner_market_receipt().to_string()))
        .content_type("application/x-www-form-urlencoded")
        .await;
    response.assert_status_ok();
    let id = response.json::<ProcessReceiptResponse>().id;
    assert_eq!(points_for(&server, &id).await, 109);

    // No content type at all
    let response = server
        .post("/receipts/process")
        .bytes(Bytes::from(target_receipt().to_string()))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_process_non_json_body_without_content_type() {
    let server = create_test_server();

    let response = server
        .post("/receipts/process")
        .text("retailer=Target&total=35.35")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "BAD_REQUEST");
}

#[tokio::test]
async fn test_process_store_unavailable() {
    let server = create_test_server_with(Arc::new(UnavailableStore));

    let response = server.post("/receipts/process").json(&target_receipt()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.code, "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_get_points_store_unavailable() {
    let server = create_test_server_with(Arc::new(UnavailableStore));

    let response = server.get("/receipts/anything/points").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_get_points_corrupt_record() {
    let store = MemoryStore::new();
    store.insert_raw(ReceiptId::from("broken"), "not json").await;
    let server = create_test_server_with(Arc::new(store));

    let response = server.get("/receipts/broken/points").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_sled_backend_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SledStore::open(dir.path()).unwrap());
    let server = create_test_server_with(store.clone());

    let id = submit(&server, &corner_market_receipt()).await;

    assert_eq!(points_for(&server, &id).await, 109);
    assert_eq!(store.len(), 1);
}
