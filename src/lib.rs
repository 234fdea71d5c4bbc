pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod store;
pub mod voice;

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpResponse};

pub use config::Settings;
pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;

use auth::{AuthService, TokenService};
use chat::{ChatService, MockResponder};
use store::{MessageLog, PgStore, UserStore};
use voice::{MockTranscriber, Transcriber};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all request handlers. Built once at
/// startup and injected; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth: Arc<AuthService>,
    pub chat: Arc<ChatService>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    /// Production wiring: one Postgres store behind both the credential store
    /// and the message log, mock responder and transcriber as defaults.
    pub async fn new(config: Settings) -> Result<Self> {
        let store = Arc::new(
            PgStore::connect(
                &config.database.url,
                config.database.max_connections,
                Duration::from_secs(5),
            )
            .await?,
        );
        Ok(Self::with_stores(config, store.clone(), store))
    }

    /// Explicit wiring; the tests pass an in-memory store here.
    pub fn with_stores(
        config: Settings,
        users: Arc<dyn UserStore>,
        log: Arc<dyn MessageLog>,
    ) -> Self {
        let tokens = TokenService::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_expiry_hours,
        );
        Self {
            config: Arc::new(config),
            auth: Arc::new(AuthService::new(users, tokens)),
            chat: Arc::new(ChatService::new(log, Arc::new(MockResponder))),
            transcriber: Arc::new(MockTranscriber),
        }
    }
}

/// Route table, shared by `main` and the integration tests so they exercise
/// the same dispatch.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/api/auth/register", web::post().to(auth::handlers::register))
        .route("/api/auth/login", web::post().to(auth::handlers::login))
        .route("/api/auth/me", web::get().to(auth::handlers::me))
        .route("/api/chat", web::post().to(chat::chat))
        .service(
            web::resource("/api/process-voice")
                .app_data(web::PayloadConfig::new(voice::MAX_AUDIO_BYTES))
                .route(web::post().to(voice::process_voice)),
        );
}
