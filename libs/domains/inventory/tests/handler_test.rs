//! Handler tests for the Inventory domain
//!
//! These tests drive the domain router directly with `oneshot`:
//! - Request deserialization and validation (JSON → DTOs, query params, path ids)
//! - Response serialization (camelCase, decimals as strings)
//! - HTTP status codes and error payloads
//!
//! They use the in-memory repository and a stub unit-of-measure client, so no
//! database or network is needed.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::ErrorResponse;
use domain_inventory::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

/// Units 1..=10 exist, 999 makes the service look down, everything else is unknown
struct StubUomClient;

#[async_trait]
impl UomClient for StubUomClient {
    async fn verify_exists(&self, unit_id: i64) -> InventoryResult<()> {
        match unit_id {
            1..=10 => Ok(()),
            999 => Err(InventoryError::uom_unavailable()),
            _ => Err(InventoryError::uom_not_found(unit_id)),
        }
    }
}

fn app() -> Router {
    let service = InventoryItemService::new(InMemoryInventoryItemRepository::new(), StubUomClient);
    handlers::router(service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn bolt(name: &str) -> Value {
    json!({
        "name": name,
        "baseUnitOfMeasureId": 1,
        "standardCost": 0.05,
        "unitPerPurchaseUom": 100,
        "reorderPointQuantity": 500
    })
}

async fn create(app: &Router, name: &str) -> InventoryItem {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", bolt(name)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_returns_201_with_assigned_id() {
    let app = app();

    let response = app
        .oneshot(json_request("POST", "/", bolt("Bolt-M6")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Bolt-M6");
    assert_eq!(body["baseUnitOfMeasureId"], 1);
    assert_eq!(body["standardCost"], "0.05");
    assert_eq!(body["unitPerPurchaseUom"], "100");
    assert_eq!(body["reorderPointQuantity"], "500");
}

#[tokio::test]
async fn test_duplicate_name_returns_409() {
    let app = app();
    create(&app, "Bolt-M6").await;

    let response = app
        .oneshot(json_request("POST", "/", bolt("BOLT-m6")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1003);
    assert_eq!(error.value, "RESOURCE_CONFLICT");
    assert_eq!(error.message, "Inventory Item with name 'BOLT-m6' already exists");
}

#[tokio::test]
async fn test_create_validates_fields() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "name": "",
                "description": "d".repeat(201),
                "baseUnitOfMeasureId": 0,
                "standardCost": -1,
                "unitPerPurchaseUom": 0.001,
                "reorderPointQuantity": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.value, "INVALID_DATA");
    let details = error.details.unwrap();
    for field in [
        "name",
        "description",
        "baseUnitOfMeasureId",
        "standardCost",
        "unitPerPurchaseUom",
    ] {
        assert!(details.get(field).is_some(), "missing detail for {field}");
    }
    assert!(details.get("reorderPointQuantity").is_none());
    assert!(details.get("base_unit_of_measure_id").is_none());
    assert!(error.message.contains("standardCost"));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1002);
}

#[tokio::test]
async fn test_unknown_uom_returns_404_and_creates_nothing() {
    let app = app();
    let mut body = bolt("Nut");
    body["baseUnitOfMeasureId"] = json!(42);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Uom with id '42' was not found");

    let response = app.oneshot(get("/check-name?name=Nut")).await.unwrap();
    let taken: bool = json_body(response.into_body()).await;
    assert!(!taken);
}

#[tokio::test]
async fn test_uom_outage_returns_503() {
    let mut body = bolt("Nut");
    body["baseUnitOfMeasureId"] = json!(999);

    let response = app()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1006);
    assert_eq!(error.value, "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_get_by_id() {
    let app = app();
    let created = create(&app, "Washer").await;

    let response = app
        .clone()
        .oneshot(get(&format!("/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let item: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(item, created);

    let response = app.oneshot(get("/12345")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.code, 1004);
    assert_eq!(error.message, "Inventory Item with id '12345' was not found");
}

#[tokio::test]
async fn test_invalid_ids_return_400() {
    let app = app();
    for uri in ["/0", "/-3", "/abc"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_list_is_paged_and_sorted_by_name() {
    let app = app();
    for name in ["Charlie", "alpha", "Bravo"] {
        create(&app, name).await;
    }

    let response = app.clone().oneshot(get("/?size=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: Page<InventoryItem> = json_body(response.into_body()).await;

    let names: Vec<_> = page.content.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "Bravo"]);
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages, 2);
    assert!(page.first);
    assert!(!page.last);

    let response = app.oneshot(get("/?page=0&sort=id,desc")).await.unwrap();
    let page: Page<InventoryItem> = json_body(response.into_body()).await;
    assert_eq!(page.content[0].name, "Bravo");
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let app = app();
    for uri in ["/?size=0", "/?size=101", "/?sort=price", "/?page=abc"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_out_of_range_page_index_returns_400() {
    let app = app();
    create(&app, "Bolt-M6").await;

    for uri in ["/?page=18446744073709551615", "/search?name=bolt&page=18446744073709551615"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["value"], "INVALID_DATA");
    }
}

#[tokio::test]
async fn test_search_by_name_fragment() {
    let app = app();
    for name in ["Hex Bolt", "bolt-m6", "Washer"] {
        create(&app, name).await;
    }

    let response = app.clone().oneshot(get("/search?name=BOLT")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page: Page<InventoryItem> = json_body(response.into_body()).await;
    assert_eq!(page.total_elements, 2);
    assert!(page.content.iter().all(|i| i.name.to_lowercase().contains("bolt")));

    for uri in ["/search", "/search?name=%20%20"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_check_name() {
    let app = app();
    create(&app, "Bolt-M6").await;

    let response = app.clone().oneshot(get("/check-name?name=bolt-m6")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let taken: bool = json_body(response.into_body()).await;
    assert!(taken);

    let response = app.clone().oneshot(get("/check-name?name=Nut")).await.unwrap();
    let taken: bool = json_body(response.into_body()).await;
    assert!(!taken);

    let response = app.oneshot(get("/check-name")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.message, "Required parameter 'name' is missing");
}

#[tokio::test]
async fn test_update_replaces_fields_and_keeps_id() {
    let app = app();
    let created = create(&app, "Nut").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id),
            json!({
                "name": "Nut M6",
                "description": "zinc plated",
                "baseUnitOfMeasureId": 2,
                "standardCost": "0.10",
                "unitPerPurchaseUom": 50,
                "reorderPointQuantity": 250
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let item: InventoryItem = json_body(response.into_body()).await;
    assert_eq!(item.id, created.id);
    assert_eq!(item.name, "Nut M6");
    assert_eq!(item.description.as_deref(), Some("zinc plated"));
    assert_eq!(item.base_unit_of_measure_id, 2);
}

#[tokio::test]
async fn test_update_to_other_items_name_returns_409() {
    let app = app();
    let nut = create(&app, "Nut").await;
    create(&app, "Washer").await;

    let response = app
        .oneshot(json_request("PUT", &format!("/{}", nut.id), bolt("WASHER")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_missing_returns_404() {
    let response = app()
        .oneshot(json_request("PUT", "/77", bolt("Nut")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let app = app();
    let created = create(&app, "Washer").await;

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(delete).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get(&format!("/{}", created.id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(delete_again).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_returns_405_payload() {
    let request = Request::builder()
        .method("PATCH")
        .uri("/1")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let error: ErrorResponse = json_body(response.into_body()).await;
    assert_eq!(error.value, "INVALID_DATA");
    assert!(error.message.contains("PATCH"));
}
