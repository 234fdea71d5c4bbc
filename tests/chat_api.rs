use std::sync::Arc;

use actix_web::{test, web, App};
use parley_server::store::{MemoryStore, Sender};
use parley_server::{configure_api, AppState, Settings};
use serde_json::json;

fn test_state() -> (Arc<MemoryStore>, web::Data<AppState>) {
    let config = Settings::new_for_test().unwrap();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_stores(config, store.clone(), store.clone());
    (store, web::Data::new(state))
}

macro_rules! register_alice {
    ($app:expr) => {{
        let response = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "alice",
                "email": "a@x.com",
                "password": "pw1"
            }))
            .send_request($app)
            .await;
        assert_eq!(response.status(), 201);
        let body: serde_json::Value = test::read_body_json(response).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_chat_requires_auth() {
    let (_, state) = test_state();
    let app = test::init_service(
        App::new().app_data(state.clone()).configure(configure_api),
    )
    .await;

    let response = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({ "message": "hello" }))
        .send_request(&app)
        .await;
    assert_eq!(response.status(), 401);
}

#[actix_web::test]
async fn test_chat_appends_user_then_bot_turn() {
    let (store, state) = test_state();
    let app = test::init_service(
        App::new().app_data(state.clone()).configure(configure_api),
    )
    .await;
    let token = register_alice!(&app);

    let response = test::TestRequest::post()
        .uri("/api/chat")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "message": "hello" }))
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["response"].as_str().unwrap().contains("hello"));
    let session_id = body["sessionId"].as_str().unwrap();
    assert!(!session_id.is_empty());

    let messages = store.session_messages(session_id).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "hello");
    assert_eq!(messages[1].sender, Sender::Bot);
    assert_eq!(messages[0].session_id, messages[1].session_id);
    assert_eq!(messages[0].user_id, messages[1].user_id);
}

#[actix_web::test]
async fn test_omitted_session_ids_are_distinct() {
    let (_, state) = test_state();
    let app = test::init_service(
        App::new().app_data(state.clone()).configure(configure_api),
    )
    .await;
    let token = register_alice!(&app);

    let mut seen = Vec::new();
    for message in ["one", "two"] {
        let response = test::TestRequest::post()
            .uri("/api/chat")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "message": message }))
            .send_request(&app)
            .await;
        let body: serde_json::Value = test::read_body_json(response).await;
        seen.push(body["sessionId"].as_str().unwrap().to_string());
    }
    assert_ne!(seen[0], seen[1]);
}

#[actix_web::test]
async fn test_explicit_session_id_accumulates_turns() {
    let (store, state) = test_state();
    let app = test::init_service(
        App::new().app_data(state.clone()).configure(configure_api),
    )
    .await;
    let token = register_alice!(&app);

    for message in ["first", "second"] {
        let response = test::TestRequest::post()
            .uri("/api/chat")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({ "message": message, "sessionId": "s1" }))
            .send_request(&app)
            .await;
        assert_eq!(response.status(), 200);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["sessionId"], "s1");
    }

    // Four turns, no overwrites.
    let messages = store.session_messages("s1").await;
    assert_eq!(messages.len(), 4);
}

#[actix_web::test]
async fn test_voice_returns_mock_transcript() {
    let (_, state) = test_state();
    let app = test::init_service(
        App::new().app_data(state.clone()).configure(configure_api),
    )
    .await;

    let response = test::TestRequest::post()
        .uri("/api/process-voice")
        .insert_header(("Content-Type", "audio/wav"))
        .set_payload(vec![0u8; 128])
        .send_request(&app)
        .await;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(!body["text"].as_str().unwrap().is_empty());
}
