mod common;

use common::*;
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use httpmock::Mock;
use marketplace_handler::shared::errors::SyncError;
use marketplace_handler::shared::marketplaces::Marketplace;
use serde_json::json;

const SUPPLY_ID: &str = "WB-GI-1234567";

async fn mock_create_supply<'a>(server: &'a MockServer, name: &str) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v3/supplies")
                .header("Authorization", SELLER_TOKEN)
                .json_body(json!({ "name": name }));
            then.status(201).json_body(json!({ "id": SUPPLY_ID }));
        })
        .await
}

async fn mock_add_to_supply<'a>(server: &'a MockServer, supply_id: &str, order_id: i64) -> Mock<'a> {
    let path = format!("/api/v3/supplies/{}/orders/{}", supply_id, order_id);
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(path);
            then.status(204);
        })
        .await
}

async fn mock_cancel(server: &MockServer, order_id: i64) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(PATCH).path(format!("/api/v3/orders/{}/cancel", order_id));
            then.status(204);
        })
        .await
}

fn statuses(list: &[&str]) -> Vec<String> {
    ids(list)
}

#[tokio::test]
async fn refresh_statuses_shares_one_supply() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let supply = mock_create_supply(&server, "supply_orders").await;
    let first = mock_add_to_supply(&server, SUPPLY_ID, 11).await;
    let second = mock_add_to_supply(&server, SUPPLY_ID, 12).await;
    let cancel = mock_cancel(&server, 13).await;

    let report = wb
        .refresh_statuses(&[11, 12, 13], &statuses(&["confirm", "confirm", "cancel"]))
        .await
        .unwrap();

    supply.assert_async().await;
    first.assert_async().await;
    second.assert_async().await;
    cancel.assert_async().await;
    assert_eq!(report.updated, vec!["11", "12", "13"]);
    assert_eq!(report.supply_id.as_deref(), Some(SUPPLY_ID));
}

#[tokio::test]
async fn refresh_statuses_with_only_cancels_creates_no_supply() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let supply = mock_create_supply(&server, "supply_orders").await;
    let cancel = mock_cancel(&server, 13).await;

    let report = wb.refresh_statuses(&[13], &statuses(&["cancel"])).await.unwrap();

    cancel.assert_async().await;
    assert_eq!(supply.hits_async().await, 0);
    assert!(report.supply_id.is_none());
}

#[tokio::test]
async fn refresh_statuses_rejects_unknown_status_before_any_call() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let supply = mock_create_supply(&server, "supply_orders").await;
    let first = mock_add_to_supply(&server, SUPPLY_ID, 11).await;

    let err = wb
        .refresh_statuses(&[11, 12], &statuses(&["confirm", "archive"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::InvalidStatus(_)));
    assert_eq!(supply.hits_async().await, 0);
    assert_eq!(first.hits_async().await, 0);
}

#[tokio::test]
async fn refresh_statuses_rejects_mismatched_input() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let err = wb
        .refresh_statuses(&[11, 12], &statuses(&["confirm"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::InvalidInput(_)));
}

#[tokio::test]
async fn refresh_status_creates_supply_when_missing() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let supply = mock_create_supply(&server, "supply_order5").await;
    let add = mock_add_to_supply(&server, SUPPLY_ID, 5).await;

    let used = wb.refresh_status(5, "confirm", None).await.unwrap();

    supply.assert_async().await;
    add.assert_async().await;
    assert_eq!(used.as_deref(), Some(SUPPLY_ID));
}

#[tokio::test]
async fn refresh_status_reuses_given_supply() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let supply = mock_create_supply(&server, "supply_order5").await;
    let add = mock_add_to_supply(&server, "WB-GI-42", 5).await;

    let used = wb.refresh_status(5, "confirm", Some("WB-GI-42")).await.unwrap();

    add.assert_async().await;
    assert_eq!(supply.hits_async().await, 0);
    assert_eq!(used.as_deref(), Some("WB-GI-42"));
}

#[tokio::test]
async fn refresh_status_cancel_and_failure() {
    let server = MockServer::start_async().await;
    let wb = adapter(&server, 1000).await;

    let cancel = mock_cancel(&server, 7).await;
    assert_eq!(wb.refresh_status(7, "cancel", None).await.unwrap(), None);
    cancel.assert_async().await;

    server
        .mock_async(|when, then| {
            when.method(PATCH).path("/api/v3/orders/8/cancel");
            then.status(400).body("order is already cancelled");
        })
        .await;
    let err = wb.refresh_status(8, "cancel", None).await.unwrap_err();
    assert!(matches!(err, SyncError::RemoteCall { status: Some(400), .. }));

    let err = wb.refresh_status(9, "archive", None).await.unwrap_err();
    assert!(matches!(err, SyncError::InvalidStatus(_)));
}
