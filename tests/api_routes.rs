use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::Router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use supplychain_api::data::load_snapshot_from_reader;
use supplychain_api::web::create_axum_router;

const DATASET: &str = "\
Product type,Product ID,Price,Stock levels,Order quantities
haircare,P1,69.8,150,90
skincare,P2,14.84,0,
haircare,P1,11.3,250,70
cosmetics,P3,61.16,inf,-inf
";

fn app() -> Router {
    let snapshot = load_snapshot_from_reader(DATASET.as_bytes()).expect("load test dataset");
    create_axum_router(Arc::new(snapshot))
}

async fn send(method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn all_data_returns_rows_in_order() {
    let (status, body) = send(Method::GET, "/all_data").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("array of records");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["Product ID"], "P1");
    assert_eq!(rows[0]["Stock levels"], json!(150.0));
    assert_eq!(rows[1]["Order quantities"], json!(0.0));
    assert_eq!(rows[3]["Stock levels"], json!(0.0));
    assert_eq!(rows[3]["Order quantities"], json!(0.0));
}

#[tokio::test]
async fn inventory_optimize_two_row_product() {
    let (status, body) = send(Method::GET, "/inventory_optimize/P1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "product_id": "P1",
            "reorder_point": 100,
            "safety_stock": 40,
            "recommended_order_quantity": 80
        })
    );
}

#[tokio::test]
async fn inventory_optimize_zero_means_use_defaults() {
    let (_, body) = send(Method::GET, "/inventory_optimize/P3").await;
    assert_eq!(body["reorder_point"], 50);
    assert_eq!(body["safety_stock"], 20);
    assert_eq!(body["recommended_order_quantity"], 80);
}

#[tokio::test]
async fn inventory_optimize_unknown_product_is_a_payload() {
    let (status, body) = send(Method::GET, "/inventory_optimize/p1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn forecast_returns_thirty_days() {
    let (status, body) = send(Method::GET, "/forecast/P1").await;
    assert_eq!(status, StatusCode::OK);
    let points = body.as_array().expect("forecast array");
    assert_eq!(points.len(), 30);
    assert_eq!(points[0]["ds"], "2025-08-08 00:00:00");
    for point in points {
        let yhat = point["yhat"].as_f64().expect("numeric yhat");
        assert!((50.0..=150.0).contains(&yhat));
    }
}

#[tokio::test]
async fn market_analysis_reads_text_query() {
    let (status, body) = send(Method::POST, "/market_analysis?text=Sales%20look%20good").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Positive");
    assert_eq!(body["suggested_action"], "Increase inventory");
    let confidence = body["confidence"].as_f64().expect("numeric confidence");
    assert!((0.7..=0.99).contains(&confidence));

    let (_, body) = send(Method::POST, "/market_analysis?text=supplier%20delays").await;
    assert_eq!(body["sentiment"], "Negative");
    assert_eq!(body["suggested_action"], "Review supply sources");
}

#[tokio::test]
async fn market_analysis_without_text_is_rejected() {
    let (status, body) = send(Method::POST, "/market_analysis").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = send(Method::GET, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/all_data")
                .header(header::ORIGIN, "http://dashboard.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("router is infallible");
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}
