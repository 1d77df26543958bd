//! Tests for the contact form endpoint

mod common;

use common::create_test_server;
use serde_json::{json, Value};

/// Test: a complete submission is relayed to the mailer
#[tokio::test]
async fn test_valid_submission_sends_mail() {
    let (server, mailer) = create_test_server();

    let response = server
        .post("/contact")
        .json(&json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "phone": "+1 555 0100",
            "service": "ID cards",
            "message": "How long does printing take?",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let sent = mailer.sent.read().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Grace Hopper");
    assert_eq!(sent[0].email, "grace@example.com");
    assert_eq!(sent[0].phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(sent[0].message, "How long does printing take?");
}

/// Test: phone and service are optional
#[tokio::test]
async fn test_optional_fields_omitted() {
    let (server, mailer) = create_test_server();

    let response = server
        .post("/contact")
        .json(&json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "message": "Hello",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let sent = mailer.sent.read().unwrap();
    assert!(sent[0].phone.is_none());
    assert!(sent[0].service.is_none());
}

/// Test: a missing required field returns 400 and sends nothing
#[tokio::test]
async fn test_missing_message_returns_400() {
    let (server, mailer) = create_test_server();

    let response = server
        .post("/contact")
        .json(&json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing required fields.");
    assert!(mailer.sent.read().unwrap().is_empty());
}

/// Test: a mailer failure surfaces as a 500 with a generic message
#[tokio::test]
async fn test_mailer_failure_returns_500() {
    let (server, mailer) = create_test_server();
    mailer.set_failing(true);

    let response = server
        .post("/contact")
        .json(&json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "message": "Hello",
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send email.");
}
