//! Storage layer: credential store and append-only message log.
//!
//! Both are traits so the HTTP surface stays independent of the backend; the
//! default is Postgres via sqlx, with an in-memory implementation used by the
//! test suites.

pub mod memory;
pub mod models;
pub mod postgres;

use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use models::{Message, Sender, User, UserProfile};
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Duplicate check for registration: matches on either field.
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, AppError>;

    /// Login lookup; includes the stored password for comparison.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Profile lookup; the password never leaves the store here.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, AppError>;

    /// Inserts a new user. A duplicate username or email surfaces as
    /// `AppError::Conflict`, anything else as `AppError::Store`.
    async fn create(&self, username: &str, email: &str, password: &str)
        -> Result<User, AppError>;
}

#[async_trait]
pub trait MessageLog: Send + Sync {
    /// Appends one turn. No validation, no deduplication, no ordering
    /// guarantee across concurrent callers. There is deliberately no read
    /// operation on this trait; history retrieval is not part of the surface.
    async fn append(
        &self,
        session_id: &str,
        text: &str,
        sender: Sender,
        user_id: Uuid,
    ) -> Result<Message, AppError>;
}
