//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::{CallContext, DomainError};

/// Repository trait for user storage
///
/// Implementations own the persisted representation and must be safe to
/// share between concurrent callers.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, ctx: &CallContext, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert or overwrite a user, keyed by its ID
    async fn put(&self, ctx: &CallContext, user: &User) -> Result<(), DomainError>;

    /// Delete a user, returning false if no record existed
    async fn delete(&self, ctx: &CallContext, id: &UserId) -> Result<bool, DomainError>;
}
