//! Voice transcription stub. The handler accepts raw audio bytes and hands
//! them to a [`Transcriber`]; only the mock exists for now.

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::error::AppError;
use crate::AppState;

/// Audio payloads above this are rejected by the route's payload config.
pub const MAX_AUDIO_BYTES: usize = 5 * 1024 * 1024;

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, AppError>;
}

pub struct MockTranscriber;

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _audio: &[u8]) -> Result<String, AppError> {
        Ok("This is a mock transcription of your voice message.".to_string())
    }
}

pub async fn process_voice(
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Voice payload received: {} bytes", body.len());
    let text = state.transcriber.transcribe(&body).await?;
    Ok(HttpResponse::Ok().json(json!({ "text": text })))
}
