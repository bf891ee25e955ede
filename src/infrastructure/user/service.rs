//! User service for fetching, creating and deleting user records

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::domain::user::{validate_password, User, UserId, UserRepository};
use crate::domain::{CallContext, DomainError};

use super::password::{PasswordHasher, Verification};

/// Plaintext behind the decoy hash verified for absent users
const DECOY_PASSWORD: &str = "usersvc-decoy-password";

/// User service enforcing ID consistency and credential checks
///
/// Holds no record state besides its collaborators; every call goes to the
/// repository. Lookups of absent users still verify the supplied password
/// against a decoy hash made by the same hasher, so they cost as much as a
/// wrong password.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("repository", &self.repository)
            .field("hasher", &"<PasswordHasher>")
            .finish()
    }
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            hasher,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Fetch a user, verifying `password` against the stored hash.
    ///
    /// A wrong password fails with the same `NotFound` as a missing user.
    pub async fn get_user(
        &self,
        ctx: &CallContext,
        id: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        debug!(user_id = %id, "Getting user");

        let stored = self.fetch_authenticated(ctx, id, password.to_string()).await?;

        Ok(stored.without_secrets())
    }

    /// Create or overwrite the user at `id`.
    ///
    /// The plaintext password is replaced by its hash before the record
    /// reaches the repository.
    pub async fn put_user(
        &self,
        ctx: &CallContext,
        id: &str,
        mut candidate: User,
    ) -> Result<User, DomainError> {
        ensure_consistent(id, &candidate)?;

        let password = candidate.take_password();
        validate_password(&password).map_err(|e| DomainError::invalid_password(e.to_string()))?;

        debug!(user_id = %id, "Putting user");

        let hashed_password = self.hash(password).await?;
        candidate.set_hashed_password(hashed_password);

        self.repository.put(ctx, &candidate).await?;

        Ok(candidate.without_secrets())
    }

    /// Delete the user at `id` once the candidate's password verifies.
    ///
    /// Returns the record as it was stored, with secrets cleared.
    pub async fn delete_user(
        &self,
        ctx: &CallContext,
        id: &str,
        mut candidate: User,
    ) -> Result<User, DomainError> {
        ensure_consistent(id, &candidate)?;

        debug!(user_id = %id, "Deleting user");

        let password = candidate.take_password();
        let stored = self.fetch_authenticated(ctx, id, password).await?;

        if !self.repository.delete(ctx, stored.id()).await? {
            // Removed by a concurrent delete after our fetch
            return Err(not_found(id));
        }

        Ok(stored.without_secrets())
    }

    /// Fetch the record at `id` and check `password` against it.
    ///
    /// Absent and invalid IDs run one decoy verification before failing.
    async fn fetch_authenticated(
        &self,
        ctx: &CallContext,
        id: &str,
        password: String,
    ) -> Result<User, DomainError> {
        match self.fetch(ctx, id).await? {
            Some(stored) => {
                self.authenticate(&stored, password).await?;
                Ok(stored)
            }
            None => {
                self.verify_decoy(password).await;
                Err(not_found(id))
            }
        }
    }

    async fn fetch(&self, ctx: &CallContext, id: &str) -> Result<Option<User>, DomainError> {
        // An ID that fails validation can never have been stored
        let Ok(user_id) = UserId::new(id) else {
            return Ok(None);
        };

        self.repository.get(ctx, &user_id).await
    }

    async fn verify_decoy(&self, password: String) {
        let hash = match self
            .decoy_hash
            .get_or_try_init(|| self.hash(DECOY_PASSWORD.to_string()))
            .await
        {
            Ok(hash) => hash.clone(),
            Err(e) => {
                warn!(error = %e, "Failed to prepare decoy password hash");
                return;
            }
        };

        let hasher = Arc::clone(&self.hasher);
        if let Err(e) = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await {
            warn!(error = %e, "Decoy verification task failed");
        }
    }

    async fn authenticate(&self, stored: &User, password: String) -> Result<(), DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let hash = stored.hashed_password().to_string();

        let verification = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| DomainError::encoding(format!("Password verification task failed: {}", e)))?;

        match verification {
            Verification::Match => Ok(()),
            Verification::Mismatch => {
                debug!(user_id = %stored.id(), "Password mismatch");
                Err(not_found(stored.id().as_str()))
            }
            Verification::Unavailable => {
                warn!(user_id = %stored.id(), "Stored password hash is unusable");
                Err(not_found(stored.id().as_str()))
            }
        }
    }

    async fn hash(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::encoding(format!("Password hashing task failed: {}", e)))?
    }
}

fn ensure_consistent(id: &str, candidate: &User) -> Result<(), DomainError> {
    if candidate.id().as_str() != id {
        return Err(DomainError::inconsistent_id(id, candidate.id().as_str()));
    }
    Ok(())
}

fn not_found(id: &str) -> DomainError {
    DomainError::not_found(format!("User '{}' not found", id))
}
