// ABOUTME: HTTP integration tests for the chat widget and demo booking routes
// ABOUTME: Uses a stub chat provider so no network access is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use ai_solutions_site::database_plugins::SiteStore;
use ai_solutions_site::routes::chat::ChatReply;
use common::{create_test_server, create_test_server_with_llm, StubLlm, TEST_ADMIN_TOKEN};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use site_core::constants::EMPTY_CHAT_REPLY;
use site_core::models::ChatRole;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// POST /api/chat
// ============================================================================

#[tokio::test]
async fn test_chat_starts_session_and_continues_it() {
    let llm = Arc::new(StubLlm::replying("Happy to help!"));
    let server = create_test_server_with_llm(llm.clone());

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "What do you sell?"}))
        .send(server.router())
        .await;
    assert_eq!(response.status(), 200);
    let first: ChatReply = response.json();
    assert_eq!(first.response, "Happy to help!");
    assert!(!first.session_id.is_empty());

    let second: ChatReply = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "How much is it?", "sessionId": first.session_id}))
        .send(server.router())
        .await
        .json();
    assert_eq!(second.session_id, first.session_id);

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    let history = &requests[1].messages;
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].content, "What do you sell?");
    assert_eq!(history[1].role, ChatRole::Assistant);
    assert_eq!(history[2].content, "How much is it?");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_turns_on_one_session_are_all_kept() {
    let llm = Arc::new(StubLlm::replying("ok").with_delay(Duration::from_millis(100)));
    let server = create_test_server_with_llm(llm);

    let first: ChatReply = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "one"}))
        .send(server.router())
        .await
        .json();

    let turn = |message: &str| {
        AxumTestRequest::post("/api/chat")
            .json(&json!({"message": message, "sessionId": first.session_id}))
            .send(server.router())
    };
    let (two, three) = tokio::join!(turn("two"), turn("three"));
    assert_eq!(two.status(), 200);
    assert_eq!(three.status(), 200);

    let session = server
        .resources
        .database
        .get_chat_session(&first.session_id)
        .await
        .unwrap()
        .unwrap();
    let contents: Vec<&str> = session.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents.len(), 6);
    assert_eq!(&contents[..2], ["one", "ok"]);
    assert!(contents.contains(&"two"));
    assert!(contents.contains(&"three"));
}

#[tokio::test]
async fn test_chat_unknown_session_starts_fresh() {
    let llm = Arc::new(StubLlm::replying("Hi"));
    let server = create_test_server_with_llm(llm.clone());

    let reply: ChatReply = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello", "sessionId": "no-such-session"}))
        .send(server.router())
        .await
        .json();

    assert_ne!(reply.session_id, "no-such-session");
    assert_eq!(llm.requests()[0].messages.len(), 1);
}

#[tokio::test]
async fn test_chat_persona_uses_requested_company() {
    let llm = Arc::new(StubLlm::replying("Hi"));
    let server = create_test_server_with_llm(llm.clone());

    AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello", "companyName": "Acme Robotics"}))
        .send(server.router())
        .await;

    let prompt = &llm.requests()[0].system_prompt;
    assert!(prompt.contains("Acme Robotics"));
    assert!(prompt.contains("Oishy"));
}

#[tokio::test]
async fn test_chat_blank_message_is_400() {
    let llm = Arc::new(StubLlm::replying("unused"));
    let server = create_test_server_with_llm(llm.clone());

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "   "}))
        .send(server.router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Message is required");
    assert!(llm.requests().is_empty());
}

#[tokio::test]
async fn test_chat_without_provider_is_500() {
    let server = create_test_server();

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello"}))
        .send(server.router())
        .await;

    assert_eq!(response.status(), 500);
}

#[tokio::test]
async fn test_chat_provider_failure_is_502_with_generic_message() {
    let server = create_test_server_with_llm(Arc::new(StubLlm::failing("quota exceeded")));

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello"}))
        .send(server.router())
        .await;

    assert_eq!(response.status(), 502);
    assert!(!response.text().contains("quota exceeded"));
}

#[tokio::test]
async fn test_chat_empty_model_output_uses_fallback_reply() {
    let server = create_test_server_with_llm(Arc::new(StubLlm::silent()));

    let reply: ChatReply = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Hello"}))
        .send(server.router())
        .await
        .json();

    assert_eq!(reply.response, EMPTY_CHAT_REPLY);
}

// ============================================================================
// /api/demo-bookings
// ============================================================================

#[tokio::test]
async fn test_booking_is_recorded_as_pending() {
    let server = create_test_server();

    let response = AxumTestRequest::post("/api/demo-bookings")
        .json(&json!({
            "fullName": "Dana Reyes",
            "email": "dana@example.com",
            "company": "  ",
            "productInterest": "AI Recruiting Assistant"
        }))
        .send(server.router())
        .await;

    assert_eq!(response.status(), 200);
    let booking: Value = response.json();
    assert_eq!(booking["status"], "pending");
    assert!(booking["company"].is_null());
    assert!(booking["id"].is_string());

    let listed: Vec<Value> = AxumTestRequest::get("/api/demo-bookings")
        .bearer(TEST_ADMIN_TOKEN)
        .send(server.router())
        .await
        .json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["email"], "dana@example.com");
}

#[tokio::test]
async fn test_booking_validation_errors() {
    let server = create_test_server();

    let response = AxumTestRequest::post("/api/demo-bookings")
        .json(&json!({"fullName": "Dana", "email": "not-an-email"}))
        .send(server.router())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    let fields: Vec<&str> = body["error"]["details"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["email", "productInterest"]);
}

#[tokio::test]
async fn test_booking_list_requires_admin() {
    let server = create_test_server();

    let response = AxumTestRequest::get("/api/demo-bookings")
        .send(server.router())
        .await;

    assert_eq!(response.status(), 401);
}
