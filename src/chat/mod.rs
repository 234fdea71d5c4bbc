//! Chat turn handling: persist the user's message, compute a reply, persist
//! the reply, return it with the session id.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::AppError;
use crate::store::{MessageLog, Sender};
use crate::AppState;

/// Strategy seam for the reply computation. The default is the mock below; a
/// real model backend slots in here without touching the router.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn reply(&self, message: &str) -> Result<String, AppError>;
}

/// Deterministic placeholder reply: a pure function of the input text.
pub struct MockResponder;

#[async_trait]
impl ResponseGenerator for MockResponder {
    async fn reply(&self, message: &str) -> Result<String, AppError> {
        Ok(format!(
            "I received your message: \"{}\". This is a mock response.",
            message
        ))
    }
}

pub struct ChatOutcome {
    pub response: String,
    pub session_id: String,
}

pub struct ChatService {
    log: Arc<dyn MessageLog>,
    responder: Arc<dyn ResponseGenerator>,
}

impl ChatService {
    pub fn new(log: Arc<dyn MessageLog>, responder: Arc<dyn ResponseGenerator>) -> Self {
        Self { log, responder }
    }

    /// Appends the user turn, computes the reply, appends the bot turn.
    ///
    /// The two writes are not transactional: if the bot append fails, the user
    /// turn stays in the log. At-least-once, retained from the source system.
    pub async fn handle(
        &self,
        user_id: Uuid,
        message: &str,
        session_id: Option<String>,
    ) -> Result<ChatOutcome, AppError> {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        self.log
            .append(&session_id, message, Sender::User, user_id)
            .await
            .map_err(|e| AppError::ChatProcessing(e.to_string()))?;

        let response = self.responder.reply(message).await?;

        self.log
            .append(&session_id, &response, Sender::Bot, user_id)
            .await
            .map_err(|e| AppError::ChatProcessing(e.to_string()))?;

        Ok(ChatOutcome {
            response,
            session_id,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

pub async fn chat(
    identity: Identity,
    req: web::Json<ChatRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!(
        "Chat request from {} (session: {:?})",
        identity.username, req.session_id
    );

    match state
        .chat
        .handle(identity.user_id, &req.message, req.session_id.clone())
        .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ChatResponse {
            response: outcome.response,
            session_id: outcome.session_id,
        })),
        Err(e) => {
            error!("Chat processing failed for {}: {}", identity.username, e);
            Err(e)
        }
    }
}
