//! End-to-end tests for the case intake conversation.
//!
//! These tests drive the full router with an in-memory session store and the
//! mock AI provider:
//! 1. A complete 14-answer interview ends in exactly one analysis
//! 2. Rejected answers leave the conversation where it was
//! 3. Reset commands and the reset endpoint start over

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use case_intake::adapters::ai::{MockAIProvider, MockError};
use case_intake::adapters::analysis::LlmCaseAnalyzer;
use case_intake::adapters::http::{router, IntakeAppState};
use case_intake::adapters::storage::InMemorySessionStore;
use case_intake::ports::SessionStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ANSWERS: [(&str, &str, &str); 14] = [
    ("case_id", "HC-2024-017", "HC-2024-017"),
    ("date_of_crime", "May 5, 2023", "2023-05-05"),
    ("time_of_crime", "2:30 PM", "14:30"),
    ("location", "221 Baker Street, apartment 3", "221 Baker Street, apartment 3"),
    ("victim_name", "Jane Doe", "Jane Doe"),
    ("victim_age", "around 35 years", "35"),
    ("victim_gender", "Female", "Female"),
    ("cause_of_death", "Blunt force trauma", "Blunt force trauma"),
    ("weapon_used", "Hammer", "Hammer"),
    ("crime_scene_description", "Kitchen, signs of struggle", "Kitchen, signs of struggle"),
    ("witnesses", "Neighbor heard shouting", "Neighbor heard shouting"),
    ("evidence_found", "Fingerprints on the handle", "Fingerprints on the handle"),
    ("suspects", "Former roommate", "Former roommate"),
    ("additional_notes", "Back door unlocked", "Back door unlocked"),
];

struct TestApp {
    router: Router,
    store: Arc<InMemorySessionStore>,
    provider: Arc<MockAIProvider>,
}

impl TestApp {
    fn new(provider: MockAIProvider) -> Self {
        let store = Arc::new(InMemorySessionStore::new());
        let provider = Arc::new(provider);
        let analyzer = Arc::new(LlmCaseAnalyzer::new(provider.clone()));
        let router = router(IntakeAppState::new(store.clone(), analyzer));
        Self {
            router,
            store,
            provider,
        }
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn say(&self, session_id: Option<&str>, message: &str) -> Value {
        let mut body = json!({ "message": message });
        if let Some(id) = session_id {
            body["session_id"] = json!(id);
        }
        let request = Request::builder()
            .method("POST")
            .uri("/api/intake/messages")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = self.call(request).await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    async fn state(&self, session_id: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(format!("/api/intake/sessions/{}", session_id))
            .body(Body::empty())
            .unwrap();
        self.call(request).await
    }
}

// =============================================================================
// Full interview
// =============================================================================

#[tokio::test]
async fn complete_interview_is_analyzed_once() {
    let app = TestApp::new(MockAIProvider::new().with_response("Primary lead: the roommate."));

    let greeting = app.say(None, "").await;
    assert_eq!(greeting["current_step"], "greeting");
    let session_id = greeting["session_id"].as_str().unwrap().to_string();

    let mut last = Value::Null;
    for (index, (field, answer, stored)) in ANSWERS.iter().enumerate() {
        last = app.say(Some(&session_id), answer).await;
        assert!(last["error"].is_null(), "answer {} rejected: {}", index, last["error"]);
        assert_eq!(last["session_id"], session_id.as_str());
        assert_eq!(last["collected_data"][*field], *stored);
    }

    assert_eq!(last["current_step"], "analysis");
    assert_eq!(last["is_collecting_info"], false);
    assert_eq!(last["response"], "Primary lead: the roommate.");
    assert_eq!(last["collected_data"].as_object().unwrap().len(), 14);
    assert_eq!(app.provider.call_count(), 1);

    let prompt = app.provider.last_prompt().unwrap();
    assert!(prompt.contains("Case Id: HC-2024-017"));
    assert!(prompt.contains("Date Of Crime: 2023-05-05"));
    assert!(prompt.contains("Victim Age: 35"));

    let (status, state) = app.state(&session_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["current_step"], "analysis");
    assert_eq!(state["analysis_in_flight"], false);
}

#[tokio::test]
async fn provider_failure_keeps_case_for_retry() {
    let provider = MockAIProvider::new()
        .with_error(MockError::AuthenticationFailed)
        .with_response("Second attempt worked.");
    let app = TestApp::new(provider);

    let session_id = app.say(None, "").await["session_id"]
        .as_str()
        .unwrap()
        .to_string();
    let mut last = Value::Null;
    for (_, answer, _) in ANSWERS.iter() {
        last = app.say(Some(&session_id), answer).await;
    }

    assert_eq!(last["current_step"], "analysis");
    assert!(last["response"]
        .as_str()
        .unwrap()
        .starts_with("Error analyzing case:"));
    assert!(last["error"].as_str().is_some());
    assert_eq!(last["collected_data"].as_object().unwrap().len(), 14);

    let retry = app.say(Some(&session_id), "try again").await;
    assert!(retry["error"].is_null());
    assert_eq!(retry["response"], "Second attempt worked.");
    assert_eq!(app.provider.call_count(), 2);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn invalid_answers_are_reprompted() {
    let app = TestApp::new(MockAIProvider::new());
    let session_id = app.say(None, "HC-1").await["session_id"]
        .as_str()
        .unwrap()
        .to_string();

    let rejected = app.say(Some(&session_id), "13/45/2023").await;
    assert_eq!(rejected["current_step"], "date_of_crime");
    assert!(rejected["response"]
        .as_str()
        .unwrap()
        .starts_with("I couldn't process your input:"));
    assert!(rejected["error"].as_str().is_some());

    let accepted = app.say(Some(&session_id), "5/5/23").await;
    assert!(accepted["error"].is_null());
    assert_eq!(accepted["current_step"], "time_of_crime");

    let rejected = app.say(Some(&session_id), "25:00").await;
    assert_eq!(rejected["current_step"], "time_of_crime");

    let accepted = app.say(Some(&session_id), "noon").await;
    assert_eq!(accepted["collected_data"]["time_of_crime"], "12:00");
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn reset_word_mid_interview_starts_over() {
    let app = TestApp::new(MockAIProvider::new());
    let session_id = app.say(None, "HC-1").await["session_id"]
        .as_str()
        .unwrap()
        .to_string();
    app.say(Some(&session_id), "2023-01-02").await;

    let reset = app.say(Some(&session_id), "reset").await;

    assert_eq!(reset["current_step"], "greeting");
    assert_eq!(reset["collected_data"], json!({}));
    assert_ne!(reset["session_id"], session_id.as_str());
    assert_eq!(app.store.len().await, 1);

    let (status, _) = app.state(&session_id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reset_endpoint_issues_new_session() {
    let app = TestApp::new(MockAIProvider::new());
    let session_id = app.say(None, "HC-1").await["session_id"]
        .as_str()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/intake/sessions/{}/reset", session_id))
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.call(request).await;

    assert_eq!(status, StatusCode::OK);
    let new_id = body["session_id"].as_str().unwrap();
    assert_ne!(new_id, session_id);

    let (status, state) = app.state(new_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["current_step"], "greeting");
}

#[tokio::test]
async fn health_endpoint_is_served() {
    let app = TestApp::new(MockAIProvider::new());
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.call(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
