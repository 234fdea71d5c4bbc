use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity decoded from a verified token. Trusted as-is; there is no store
/// re-lookup per request (stateless auth).
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

/// Issues and verifies HS256 tokens with the process-wide secret.
pub struct TokenService {
    secret: String,
    expiry: Duration,
}

impl TokenService {
    pub fn new(secret: String, expiry_hours: i64) -> Self {
        Self {
            secret,
            expiry: Duration::hours(expiry_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String, AppError> {
        self.issue_with_lifetime(user_id, username, self.expiry)
    }

    pub fn issue_with_lifetime(
        &self,
        user_id: Uuid,
        username: &str,
        lifetime: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Fails with `InvalidToken` on a bad signature, an undecodable payload,
    /// or an expired `exp`. A missing token is the caller's problem.
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::InvalidToken("malformed subject claim".into()))?;

        Ok(Identity {
            user_id,
            username: data.claims.username,
        })
    }
}
