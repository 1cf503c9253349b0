// src/tests/api_tests.rs

use crate::api::handlers::api_routes;
use crate::api::models::SettlementResponse;
use crate::api::openapi::ApiDoc;
use crate::tests::create_test_service;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use utoipa::OpenApi;

async fn test_router() -> Router {
    Router::new().nest("/api", api_routes(Arc::new(create_test_service().await)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_settlement_endpoint_reports_each_state() {
    let router = test_router().await;

    let (status, body) = send(&router, Method::GET, "/api/settlement", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "nothing_to_settle");
    assert_eq!(body["lines"], json!(["Nothing to settle."]));

    for name in ["A", "B", "C"] {
        let (status, _) = send(&router, Method::POST, "/api/participants", Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, expense) = send(
        &router,
        Method::POST,
        "/api/expenses",
        Some(json!({ "description": "Villa", "amount": 90.0, "payer": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["amount"], 90.0);

    let (status, body) = send(&router, Method::GET, "/api/settlement", None).await;
    assert_eq!(status, StatusCode::OK);
    let response: SettlementResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.status, "transfers");
    assert_eq!(response.transfers.len(), 2);
    assert_eq!(response.lines, vec!["B → A: 30.00 €", "C → A: 30.00 €"]);
    assert_eq!(response.balances.len(), 3);

    for payer in ["B", "C"] {
        send(
            &router,
            Method::POST,
            "/api/expenses",
            Some(json!({ "description": "Round", "amount": 90.0, "payer": payer })),
        )
        .await;
    }
    let (_, body) = send(&router, Method::GET, "/api/settlement", None).await;
    assert_eq!(body["status"], "all_square");
    assert_eq!(body["transfers"], json!([]));
}

#[tokio::test]
async fn test_expense_errors_map_to_status_codes() {
    let router = test_router().await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/expenses",
        Some(json!({ "description": "Taxi", "amount": -3.0, "payer": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("amount"));

    let (status, body) = send(&router, Method::DELETE, "/api/expenses/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Expense missing not found");
}

#[tokio::test]
async fn test_roster_and_budget_endpoints() {
    let router = test_router().await;

    let (_, participant) = send(&router, Method::POST, "/api/participants", Some(json!({}))).await;
    assert_eq!(participant["name"], "");
    let id = participant["id"].as_str().unwrap().to_string();

    let (status, renamed) = send(
        &router,
        Method::PUT,
        &format!("/api/participants/{}", id),
        Some(json!({ "name": "Ewa" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Ewa");

    send(
        &router,
        Method::POST,
        "/api/expenses",
        Some(json!({ "description": "Museum", "amount": 12.5, "payer": "Ewa" })),
    )
    .await;
    let (_, budget) = send(&router, Method::GET, "/api/budget", None).await;
    assert_eq!(budget, json!({ "total": 12.5, "head_count": 1, "per_person": 12.5 }));

    let (status, _) = send(&router, Method::DELETE, &format!("/api/participants/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, participants) = send(&router, Method::GET, "/api/participants", None).await;
    assert_eq!(participants, json!([]));

    let (_, logs) = send(&router, Method::GET, "/api/logs", None).await;
    assert_eq!(logs.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_default_roster_endpoint() {
    let router = test_router().await;

    let (status, body) = send(&router, Method::POST, "/api/participants/defaults", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert_eq!(body[0]["name"], "Ala");

    let (status, body) = send(&router, Method::POST, "/api/participants/defaults", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("roster"));

    let (_, participants) = send(&router, Method::GET, "/api/participants", None).await;
    assert_eq!(participants.as_array().unwrap().len(), 4);
}

#[test]
fn test_openapi_documents_expense_timestamps_as_strings() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    let created_at = &doc["components"]["schemas"]["Expense"]["properties"]["created_at"];
    assert_eq!(created_at["type"], "string");
    assert!(doc["paths"]["/api/participants/defaults"]["post"].is_object());
    assert!(doc["paths"]["/api/settlement"]["get"].is_object());
}
