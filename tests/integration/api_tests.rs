//! API endpoint integration tests.
//!
//! Tests for GET /api/perks and GET /api/merchants

use crate::common::{PUBLIC_PERK_COUNT, test_server};
use axum::http::StatusCode;
use serde_json::Value;

fn titles(body: &Value) -> Vec<&str> {
    body["perks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_api_perks_list() {
    let ctx = test_server().await;

    let response = ctx.server.get("/api/perks").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(titles(&body).len(), PUBLIC_PERK_COUNT);
    assert_eq!(body["summary"]["shown"], PUBLIC_PERK_COUNT);
    assert_eq!(body["summary"]["total"], PUBLIC_PERK_COUNT);
    assert!(!titles(&body).contains(&"Staff Discount"));
}

#[tokio::test]
async fn test_api_perks_name_filter() {
    let ctx = test_server().await;

    let body: Value = ctx
        .server
        .get("/api/perks")
        .add_query_param("name", ctx.seeded_perk.title)
        .await
        .json();

    assert_eq!(titles(&body), vec![ctx.seeded_perk.title]);
    assert_eq!(body["summary"]["shown"], 1);
    assert_eq!(body["perks"][0]["merchant"], ctx.seeded_perk.merchant);
    assert_eq!(body["perks"][0]["discount_percent"], 10);
}

#[tokio::test]
async fn test_api_perks_merchant_filter() {
    let ctx = test_server().await;

    let body: Value = ctx
        .server
        .get("/api/perks")
        .add_query_param("merchant", ctx.seeded_perk.merchant)
        .await
        .json();

    let titles = titles(&body);
    assert!(titles.contains(&ctx.seeded_perk.title));
    assert_eq!(body["summary"]["shown"], titles.len());
    // Merchant options are not narrowed by the merchant filter itself.
    assert_eq!(body["merchants"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_api_merchants() {
    let ctx = test_server().await;

    let response = ctx.server.get("/api/merchants").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let merchants: Vec<String> = response.json();
    assert_eq!(merchants, vec!["Acme Co", "Bean There", "Stretch Studio"]);
}
