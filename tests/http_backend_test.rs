//! HTTP backend integration tests
//!
//! Tests the `HttpBackend` implementation against a `wiremock` mock server:
//! request paths and bodies, both `/chat` response shapes, and how
//! non-success statuses and malformed bodies surface as errors.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roundtable::error::RoundtableError;
use roundtable::transport::{Backend, ChatResult, DEFAULT_MAX_ROUNDS};

mod common;

#[tokio::test]
async fn test_send_chat_posts_content_and_decodes_flat_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"content": "hello agents"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"agent_name": "Advisor", "content": "Start small."},
            {"agent_name": "Critic", "content": "Consider the risks."}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let result = backend.send_chat("hello agents").await.expect("send succeeds");

    match result {
        ChatResult::Flat(replies) => {
            assert_eq!(replies.len(), 2);
            assert_eq!(replies[0].agent_name, "Advisor");
            assert_eq!(replies[1].content, "Consider the risks.");
        }
        other => panic!("expected flat shape, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_chat_decodes_rich_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_discussion": true,
            "responses": [
                {"agent_name": "A", "content": "x", "round": 1},
                {"agent_name": "B", "content": "y", "round": 1},
                {"agent_name": "A", "content": "z", "round": 2, "is_summary": true}
            ]
        })))
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let result = backend.send_chat("discuss").await.expect("send succeeds");

    match result {
        ChatResult::Rich(envelope) => {
            assert!(envelope.is_discussion);
            assert_eq!(envelope.responses.len(), 3);
            assert_eq!(envelope.responses[2].is_summary, Some(true));
        }
        other => panic!("expected rich shape, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_chat_non_success_status_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let err = backend.send_chat("hello").await.unwrap_err();

    match err.downcast_ref::<RoundtableError>() {
        Some(RoundtableError::HttpStatus { endpoint, status }) => {
            assert_eq!(endpoint, "chat");
            assert_eq!(*status, 500);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_chat_unrecognised_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "hi"})))
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let err = backend.send_chat("hello").await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<RoundtableError>(),
        Some(RoundtableError::InvalidResponse { .. })
    ));
}

#[tokio::test]
async fn test_fetch_context_decodes_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "global_context_length": 2,
            "global_context": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "name": "Advisor", "content": "hello"}
            ],
            "agents": {
                "Advisor": {
                    "private_context_length": 1,
                    "private_context": [{"role": "assistant", "content": "hello"}]
                },
                "Critic": {"private_context_length": 0, "private_context": []}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let snapshot = backend.fetch_context().await.expect("fetch succeeds");

    assert_eq!(snapshot.global_context_length, 2);
    assert_eq!(snapshot.agents.len(), 2);
    assert_eq!(snapshot.agents["Advisor"].private_context_length, 1);
    assert_eq!(snapshot.global_context[1]["name"], "Advisor");
}

#[tokio::test]
async fn test_start_discussion_sends_topic_and_rounds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/discussion"))
        .and(body_json(json!({"topic": "AI ethics", "max_rounds": DEFAULT_MAX_ROUNDS})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "started"})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let result = backend
        .start_discussion("AI ethics", DEFAULT_MAX_ROUNDS)
        .await
        .expect("discussion request succeeds");

    assert_eq!(result.0["status"], "started");
    assert!(result.as_chat_result().is_none());
}

#[tokio::test]
async fn test_discussion_status_is_a_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/discussion/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"active": true, "round": 2})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = common::backend_for(&server.uri());
    let status = backend.discussion_status().await.expect("status succeeds");

    assert_eq!(status.0["round"], 2);
}
