//! Bearer-token gate, expressed as an actix extractor so protected handlers
//! just take an [`Identity`] argument. Purely synchronous: the header is
//! parsed and the signature checked, with no store lookup.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::warn;

use crate::auth::token::Identity;
use crate::error::AppError;
use crate::AppState;

fn identity_from_request(req: &HttpRequest) -> Result<Identity, AppError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthenticated)?;

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state not configured".into()))?;

    state.auth.tokens().verify(token).map_err(|e| {
        warn!("rejected bearer token from {}: {}", req.path(), e);
        e
    })
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}
