use std::sync::Arc;

use uuid::Uuid;

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::store::{User, UserProfile, UserStore};

/// Registration, login, and profile lookup over the credential store.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Creates a user and signs a token for it. Duplicates surface as a
    /// conflict with a field-specific message; the store's unique indexes
    /// backstop the pre-check under concurrent registration.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AppError> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "username, email and password are required".into(),
            ));
        }

        if let Some(existing) = self.users.find_by_username_or_email(username, email).await? {
            let message = if existing.username == username {
                "Username already taken"
            } else {
                "Email already registered"
            };
            return Err(AppError::Conflict(message.into()));
        }

        let user = self.users.create(username, email, password).await?;
        let token = self.tokens.issue(user.id, &user.username)?;
        Ok((user, token))
    }

    /// Plaintext comparison, matching the stored form. A wrong password and
    /// an unknown email are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.password != password {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.username)?;
        Ok((user, token))
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Store("user record missing".into()))
    }
}
