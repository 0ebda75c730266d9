//! Integration tests for the HTTP API.
//!
//! Drives the full router with the mock AI provider and in-memory stores.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use consultant_ai::adapters::ai::{MockAIProvider, MockError};
use consultant_ai::adapters::http::{build_router, AppState};
use consultant_ai::adapters::memory::{InMemoryPromptStore, InMemoryTrainingExampleStore};
use consultant_ai::application::{PromptManager, ReplyGenerator};
use consultant_ai::config::ServerConfig;
use consultant_ai::domain::prompt::BASE_SYSTEM_PROMPT;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    mock: MockAIProvider,
    prompts: InMemoryPromptStore,
    training: InMemoryTrainingExampleStore,
}

impl TestApp {
    async fn new(mock: MockAIProvider) -> Self {
        Self::with_server(mock, &ServerConfig::default()).await
    }

    async fn with_server(mock: MockAIProvider, server: &ServerConfig) -> Self {
        let prompts = InMemoryPromptStore::new();
        let training = InMemoryTrainingExampleStore::new();

        let manager = PromptManager::new(Arc::new(prompts.clone()));
        manager.ensure_defaults().await.unwrap();

        let state = AppState::new(
            manager,
            ReplyGenerator::new(Arc::new(mock.clone())),
            Arc::new(training.clone()),
        );

        Self {
            router: build_router(state, server),
            mock,
            prompts,
            training,
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn scenario_a() -> Value {
    json!({
        "contact_id": "c-100",
        "scenario": "student visa",
        "conversation": [
            {"direction": "in", "text": "Hi"},
            {"direction": "in", "text": "Need a visa"},
            {"direction": "out", "text": "Sure"},
            {"direction": "out", "text": "what type?"}
        ]
    })
}

// =============================================================================
// Health & Reply Generation
// =============================================================================

#[tokio::test]
async fn health_reports_service() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "healthy", "service": "visa-consultant-ai"}));
}

#[tokio::test]
async fn generate_reply_uses_latest_system_prompt() {
    let mock = MockAIProvider::new().with_response(r#"{"reply": "Which visa are you after?"}"#);
    let app = TestApp::new(mock).await;

    let (status, body) = app
        .post(
            "/generate-reply",
            json!({
                "clientSequence": ["Hi", "Need a visa"],
                "chatHistory": [{"direction": "out", "text": "Welcome!"}]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aiReply"], "Which visa are you after?");

    let calls = app.mock.get_calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].messages[0].content;
    assert!(prompt.starts_with(BASE_SYSTEM_PROMPT));
    assert!(prompt.contains("Consultant: Welcome!\nClient: Hi\nClient: Need a visa"));
}

#[tokio::test]
async fn generate_reply_requires_client_sequence() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app.post("/generate-reply", json!({"chatHistory": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(app.mock.call_count(), 0);
}

#[tokio::test]
async fn rate_limited_model_maps_to_429() {
    let mock = MockAIProvider::new().with_error(MockError::RateLimited {
        retry_after_secs: 20,
    });
    let app = TestApp::new(mock).await;

    let (status, body) = app
        .post("/generate-reply", json!({"clientSequence": ["Hi"]}))
        .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["code"], "RATE_LIMITED");
    assert_eq!(body["details"]["retryAfterSecs"], 20);
}

#[tokio::test]
async fn unavailable_model_maps_to_502() {
    let mock = MockAIProvider::new().with_error(MockError::Unavailable {
        message: "overloaded".into(),
    });
    let app = TestApp::new(mock).await;

    let (status, body) = app
        .post("/generate-reply", json!({"clientSequence": ["Hi"]}))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "AI_PROVIDER_ERROR");
}

#[tokio::test]
async fn unavailable_store_maps_to_503() {
    let app = TestApp::new(MockAIProvider::new()).await;
    app.prompts.set_unavailable(true);

    let (status, body) = app
        .post("/generate-reply", json!({"clientSequence": ["Hi"]}))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "STORE_UNAVAILABLE");
}

// =============================================================================
// Prompt Improvement
// =============================================================================

#[tokio::test]
async fn improve_ai_saves_new_prompt_and_records_example() {
    let mock = MockAIProvider::new()
        .with_response(r#"{"reply": "Hello."}"#)
        .with_response(r#"{"prompt": "Greet warmly, then ask which visa."}"#);
    let app = TestApp::new(mock).await;

    let (status, body) = app
        .post(
            "/improve-ai",
            json!({
                "clientSequence": ["Hi"],
                "consultantReply": "Hi! Which visa can I help with?"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictedReply"], "Hello.");
    assert_eq!(body["updatedPrompt"], "Greet warmly, then ask which visa.");

    let (_, history) = app.get("/prompts/system").await;
    let versions = history["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["content"], "Greet warmly, then ask which visa.");

    let records = app.training.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ai_reply.as_deref(), Some("Hello."));
}

#[tokio::test]
async fn improve_ai_requires_consultant_reply() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app
        .post("/improve-ai", json!({"clientSequence": ["Hi"]}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("consultantReply"));
}

#[tokio::test]
async fn improve_ai_manually_then_rollback_restores_default() {
    let mock = MockAIProvider::new().with_response(r#"{"prompt": "Always answer in one line."}"#);
    let app = TestApp::new(mock).await;

    let (status, body) = app
        .post("/improve-ai-manually", json!({"instructions": "Be brief"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedPrompt"], "Always answer in one line.");

    let (_, history) = app.get("/prompts/system?limit=5").await;
    let original_id = history["versions"][1]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/prompts/system/rollback",
            json!({"versionId": original_id}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"]["content"], BASE_SYSTEM_PROMPT);
    assert_ne!(body["version"]["id"], original_id.as_str());

    let (_, history) = app.get("/prompts/system").await;
    assert_eq!(history["versions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn rollback_to_unknown_version_is_404() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app
        .post(
            "/prompts/editor/rollback",
            json!({"versionId": "00000000-0000-4000-8000-000000000000"}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROMPT_VERSION_NOT_FOUND");
}

#[tokio::test]
async fn history_limit_out_of_range_is_400() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, _) = app.get("/prompts/system?limit=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Training Data
// =============================================================================

#[tokio::test]
async fn parse_conversations_isolates_malformed_conversation() {
    let app = TestApp::new(MockAIProvider::new()).await;
    let malformed = json!({
        "contact_id": "c-200",
        "conversation": [{"direction": "in"}, {"direction": "out", "text": "Hello"}]
    });

    let (status, body) = app
        .post(
            "/parse-conversations",
            json!({"conversations": [scenario_a(), malformed]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    let example = &body["trainingExamples"][0];
    assert_eq!(example["client_sequence"], json!(["Hi", "Need a visa"]));
    assert_eq!(example["chat_history"], json!([]));
    assert_eq!(example["consultant_reply"], "Sure what type?");
    assert_eq!(example["contact_id"], "c-100");
    assert_eq!(body["errors"][0]["contactId"], "c-200");
    assert_eq!(app.mock.call_count(), 0);
}

#[tokio::test]
async fn parse_conversations_tolerates_wrongly_typed_fields() {
    let app = TestApp::new(MockAIProvider::new()).await;
    let odd_direction = json!({
        "contact_id": "odd",
        "conversation": [
            {"direction": 1, "text": "noise"},
            {"direction": "in", "text": "Q"},
            {"direction": "out", "text": "A"}
        ]
    });
    let numeric_text = json!({
        "contact_id": 42,
        "conversation": [
            {"direction": "in", "text": 7},
            {"direction": "out", "text": "A"}
        ]
    });

    let (status, body) = app
        .post(
            "/parse-conversations",
            json!({"conversations": [scenario_a(), odd_direction, numeric_text]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["trainingExamples"][0]["contact_id"], "c-100");
    let odd = &body["trainingExamples"][1];
    assert_eq!(odd["contact_id"], "odd");
    assert_eq!(odd["client_sequence"], json!(["Q"]));
    assert_eq!(odd["consultant_reply"], "A");
    assert_eq!(odd["chat_history"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["errors"][0]["position"], 2);
    assert_eq!(body["errors"][0]["contactId"], "42");
}

#[tokio::test]
async fn undecodable_body_uses_error_envelope() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app
        .post("/parse-conversations", json!({"conversations": "not a list"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn parse_conversations_requires_conversations() {
    let app = TestApp::new(MockAIProvider::new()).await;

    let (status, body) = app
        .post("/parse-conversations", json!({"conversations": []}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn load_training_data_reports_each_example() {
    let mock = MockAIProvider::new()
        .with_response("Hello there")
        .with_response(r#"{"prompt": "Improved once."}"#)
        .with_error(MockError::Unavailable {
            message: "overloaded".into(),
        });
    let app = TestApp::new(mock).await;
    let second = json!({
        "contact_id": "c-300",
        "conversation": [
            {"direction": "in", "text": "Is my visa ready?"},
            {"direction": "out", "text": "Checking now."}
        ]
    });

    let (status, body) = app
        .post(
            "/load-training-data",
            json!({"conversations": [scenario_a(), second]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 2);
    assert_eq!(body["results"][0]["contact_id"], "c-100");
    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["results"][1]["contact_id"], "c-300");
    assert_eq!(body["results"][1]["status"], "error");
    assert!(body["results"][1]["error"].is_string());
    assert_eq!(body["parseErrors"], json!([]));

    assert_eq!(app.training.len().await, 1);
}

#[tokio::test]
async fn load_training_data_skips_wrongly_typed_conversation() {
    let mock = MockAIProvider::new()
        .with_response("Hello there")
        .with_response(r#"{"prompt": "Improved once."}"#);
    let app = TestApp::new(mock).await;
    let numeric_text = json!({
        "contact_id": 42,
        "conversation": [
            {"direction": "in", "text": 7},
            {"direction": "out", "text": "A"}
        ]
    });

    let (status, body) = app
        .post(
            "/load-training-data",
            json!({"conversations": [scenario_a(), numeric_text]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 1);
    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["parseErrors"][0]["contactId"], "42");
    assert_eq!(app.mock.call_count(), 2);
}

// =============================================================================
// Request Timeout
// =============================================================================

fn one_second_timeout() -> ServerConfig {
    ServerConfig {
        request_timeout_secs: 1,
        ..ServerConfig::default()
    }
}

#[tokio::test]
async fn load_training_data_outlives_request_timeout() {
    let mock = MockAIProvider::new()
        .with_delay(Duration::from_millis(400))
        .with_response("Hello there")
        .with_response(r#"{"prompt": "Improved once."}"#)
        .with_response("Checking")
        .with_response(r#"{"prompt": "Improved twice."}"#);
    let app = TestApp::with_server(mock, &one_second_timeout()).await;
    let second = json!({
        "contact_id": "c-301",
        "conversation": [
            {"direction": "in", "text": "Is my visa ready?"},
            {"direction": "out", "text": "Checking now."}
        ]
    });

    let (status, body) = app
        .post(
            "/load-training-data",
            json!({"conversations": [scenario_a(), second]}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], 2);
    assert_eq!(body["results"][0]["status"], "success");
    assert_eq!(body["results"][1]["status"], "success");
    assert_eq!(app.mock.call_count(), 4);
    assert_eq!(app.training.len().await, 2);
}

#[tokio::test]
async fn generate_reply_is_cut_off_by_request_timeout() {
    let mock = MockAIProvider::new().with_delay(Duration::from_millis(1500));
    let app = TestApp::with_server(mock, &one_second_timeout()).await;

    let (status, _) = app
        .post("/generate-reply", json!({"clientSequence": ["Hi"]}))
        .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
