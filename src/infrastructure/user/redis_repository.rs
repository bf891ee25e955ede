//! Redis user repository implementation

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError, RedisResult};
use tracing::{debug, info, warn};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::{CallContext, DomainError};

/// Retry policy for transient Redis failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(50),
            max_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Delay to wait after the given (1-based) failed attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Configuration for the Redis user repository
#[derive(Debug, Clone)]
pub struct RedisRepositoryConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    /// Reject writes to IDs that already exist (`SET NX`) instead of
    /// overwriting them
    pub create_only: bool,
    /// Connection timeout
    pub connection_timeout: Duration,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for RedisRepositoryConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: Some("usersvc".to_string()),
            create_only: false,
            connection_timeout: Duration::from_secs(5),
            retry: RetryPolicy::default(),
        }
    }
}

impl RedisRepositoryConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Enables or disables create-if-absent writes
    pub fn with_create_only(mut self, create_only: bool) -> Self {
        self.create_only = create_only;
        self
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Sets the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Redis implementation of UserRepository
///
/// Each record is stored as its JSON wire shape under
/// `{prefix}:users:{id}`. Every operation is encode, call, decode; the
/// first failing stage ends the operation with a backend error.
#[derive(Clone)]
pub struct RedisUserRepository {
    connection: ConnectionManager,
    config: RedisRepositoryConfig,
}

impl fmt::Debug for RedisUserRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisUserRepository")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisUserRepository {
    /// Connects to Redis
    pub async fn connect(config: RedisRepositoryConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str()).map_err(|e| {
            DomainError::backend_with_source("Failed to create Redis client", e)
        })?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| {
            DomainError::backend(format!(
                "Timed out connecting to Redis after {:?}",
                config.connection_timeout
            ))
        })?
        .map_err(|e| DomainError::backend_with_source("Failed to connect to Redis", e))?;

        info!(
            create_only = config.create_only,
            "Connected to Redis user store"
        );

        Ok(Self { connection, config })
    }

    fn key(&self, id: &UserId) -> String {
        user_key(self.config.key_prefix.as_deref(), id)
    }

    /// Runs one Redis command on a fresh handle to the shared connection
    async fn call<T, F, Fut>(
        &self,
        ctx: &CallContext,
        op: &'static str,
        retryable: bool,
        command: F,
    ) -> Result<T, DomainError>
    where
        F: Fn(ConnectionManager) -> Fut + Send + Sync,
        Fut: Future<Output = RedisResult<T>> + Send,
        T: Send,
    {
        run_with_retry(ctx, &self.config.retry, op, retryable, || {
            command(self.connection.clone())
        })
        .await
    }
}

/// Runs `command` under the call context, retrying transient failures up to
/// the policy's attempt limit when `retryable` is set.
///
/// Both the command and the backoff sleeps are abandoned as soon as the
/// context is cancelled or its deadline passes.
async fn run_with_retry<T, F, Fut>(
    ctx: &CallContext,
    policy: &RetryPolicy,
    op: &'static str,
    retryable: bool,
    mut command: F,
) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let max_attempts = if retryable {
        policy.max_attempts.max(1)
    } else {
        1
    };
    let mut attempt = 1;

    loop {
        let outcome = ctx
            .run(async { Ok::<_, DomainError>(command().await) })
            .await?;

        match outcome {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_transient(&e) => {
                let delay = policy.backoff(attempt);
                warn!(op, attempt, ?delay, error = %e, "Transient Redis failure, retrying");

                ctx.run(async {
                    tokio::time::sleep(delay).await;
                    Ok::<_, DomainError>(())
                })
                .await?;
                attempt += 1;
            }
            Err(e) => {
                warn!(op, attempt, error = %e, "Redis command failed");
                return Err(DomainError::backend_with_source(
                    format!("Redis {} failed", op),
                    e,
                ));
            }
        }
    }
}

#[async_trait]
impl UserRepository for RedisUserRepository {
    async fn get(&self, ctx: &CallContext, id: &UserId) -> Result<Option<User>, DomainError> {
        let key = self.key(id);

        let raw: Option<String> = self
            .call(ctx, "GET", true, |mut conn| {
                let key = key.clone();
                async move { conn.get::<_, Option<String>>(&key).await }
            })
            .await?;

        debug!(user_id = %id, found = raw.is_some(), "Fetched user from Redis");

        raw.map(|raw| decode_user(id, &raw)).transpose()
    }

    async fn put(&self, ctx: &CallContext, user: &User) -> Result<(), DomainError> {
        let key = self.key(user.id());
        let value = encode_user(user)?;

        if self.config.create_only {
            // NX writes are not retried: a lost reply to a successful write
            // would turn the retry into a false conflict.
            let created: Option<String> = self
                .call(ctx, "SET NX", false, |mut conn| {
                    let (key, value) = (key.clone(), value.clone());
                    async move {
                        redis::cmd("SET")
                            .arg(&key)
                            .arg(&value)
                            .arg("NX")
                            .query_async(&mut conn)
                            .await
                    }
                })
                .await?;

            // Redis returns "OK" if set, None if key existed
            if created.is_none() {
                return Err(DomainError::conflict(format!(
                    "User '{}' already exists",
                    user.id()
                )));
            }
        } else {
            self.call(ctx, "SET", true, |mut conn| {
                let (key, value) = (key.clone(), value.clone());
                async move { conn.set::<_, _, ()>(&key, &value).await }
            })
            .await?;
        }

        debug!(user_id = %user.id(), "Stored user in Redis");
        Ok(())
    }

    async fn delete(&self, ctx: &CallContext, id: &UserId) -> Result<bool, DomainError> {
        let key = self.key(id);

        let deleted: i64 = self
            .call(ctx, "DEL", false, |mut conn| {
                let key = key.clone();
                async move { conn.del::<_, i64>(&key).await }
            })
            .await?;

        debug!(user_id = %id, deleted, "Deleted user from Redis");
        Ok(deleted > 0)
    }
}

fn is_transient(error: &RedisError) -> bool {
    error.is_io_error()
        || error.is_timeout()
        || error.is_connection_dropped()
        || error.is_connection_refusal()
}

fn user_key(prefix: Option<&str>, id: &UserId) -> String {
    match prefix {
        Some(prefix) => format!("{}:users:{}", prefix, id.as_str()),
        None => format!("users:{}", id.as_str()),
    }
}

fn encode_user(user: &User) -> Result<String, DomainError> {
    serde_json::to_string(user).map_err(|e| {
        DomainError::backend_with_source(format!("Failed to encode user '{}'", user.id()), e)
    })
}

fn decode_user(id: &UserId, raw: &str) -> Result<User, DomainError> {
    let user: User = serde_json::from_str(raw).map_err(|e| {
        DomainError::backend_with_source(format!("Failed to decode user '{}'", id), e)
    })?;

    if user.id() != id {
        return Err(DomainError::backend(format!(
            "Record stored under '{}' belongs to '{}'",
            id,
            user.id()
        )));
    }

    Ok(user)
}
