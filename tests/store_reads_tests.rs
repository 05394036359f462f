// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cross-service read endpoints: the caller's transactions and budgets,
//! the latter with derived spending status.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn get_json(app: &common::TestApp, uri: &str, token: &str) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_my_transactions() {
    let app = common::create_test_app();
    let account = common::seed_account(&app.state.db, "alice").await;
    let token = app.state.tokens.issue(&account.username).unwrap();

    app.ledger
        .entries
        .lock()
        .unwrap()
        .extend([common::sample_entry(account.id, 1), common::sample_entry(account.id, 2)]);

    let (status, body) = get_json(&app, "/api/me/transactions", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["transactions"][0]["category"], "Groceries");
    assert_eq!(body["transactions"][0]["type"], "EXPENSE");
}

#[tokio::test]
async fn test_my_budgets_with_derived_status() {
    let app = common::create_test_app();
    let account = common::seed_account(&app.state.db, "alice").await;
    let token = app.state.tokens.issue(&account.username).unwrap();

    {
        let mut limits = app.budgets.limits.lock().unwrap();
        limits.push(common::sample_budget(account.id, 1, 50, 100));
        limits.push(common::sample_budget(account.id, 2, 80, 100));
        limits.push(common::sample_budget(account.id, 3, 100, 100));
        limits.push(common::sample_budget(account.id, 4, 0, 0));
    }

    let (status, body) = get_json(&app, "/api/me/budgets", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["budgets"][0]["status"], "SAFE");
    assert_eq!(body["budgets"][1]["status"], "WARNING");
    assert_eq!(body["budgets"][2]["status"], "EXCEEDED");
    // Zero-limit budgets derive a status instead of faulting
    assert_eq!(body["budgets"][3]["status"], "SAFE");
    assert_eq!(body["budgets"][0]["remaining"], "50");
}

#[tokio::test]
async fn test_reads_require_auth() {
    let app = common::create_test_app();

    for uri in ["/api/me/transactions", "/api/me/budgets"] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
