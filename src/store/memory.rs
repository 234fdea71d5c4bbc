//! In-memory store used by the integration tests (and handy for local runs
//! without Postgres). Mirrors the Postgres behavior, including the duplicate
//! conflict on create.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::models::{Message, Sender, User, UserProfile};
use crate::store::{MessageLog, UserStore};

#[derive(Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-only inspection; the `MessageLog` trait itself exposes no reads.
    pub async fn session_messages(&self, session_id: &str) -> Vec<Message> {
        self.messages
            .read()
            .await
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect()
    }

}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).map(|u| u.profile()))
    }

    async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username || u.email == email) {
            return Err(AppError::Conflict("Username or email already in use".into()));
        }
        let user = User::new(username.to_string(), email.to_string(), password.to_string());
        users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl MessageLog for MemoryStore {
    async fn append(
        &self,
        session_id: &str,
        text: &str,
        sender: Sender,
        user_id: Uuid,
    ) -> Result<Message, AppError> {
        let message = Message::new(session_id.to_string(), text.to_string(), sender, user_id);
        self.messages.write().await.push(message.clone());
        Ok(message)
    }
}
