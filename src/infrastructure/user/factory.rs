//! Repository factory for runtime backend selection

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{RedisSettings, StorageConfig};
use crate::domain::user::UserRepository;
use crate::domain::DomainError;

use super::redis_repository::{RedisRepositoryConfig, RedisUserRepository, RetryPolicy};
use super::repository::InMemoryUserRepository;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// Remote Redis key-value store
    Redis,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "redis" => Some(Self::Redis),
            _ => None,
        }
    }
}

impl From<&RedisSettings> for RedisRepositoryConfig {
    fn from(settings: &RedisSettings) -> Self {
        Self {
            url: settings.url.clone(),
            key_prefix: settings.key_prefix.clone().filter(|p| !p.is_empty()),
            create_only: settings.create_only,
            connection_timeout: Duration::from_millis(settings.connection_timeout_ms),
            retry: RetryPolicy {
                max_attempts: settings.max_attempts.max(1),
                initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
                max_backoff: Duration::from_millis(settings.max_backoff_ms),
            },
        }
    }
}

/// Factory for creating user repositories
#[derive(Debug)]
pub struct UserRepositoryFactory;

impl UserRepositoryFactory {
    /// Creates a repository based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn UserRepository>, DomainError> {
        let storage_type = StorageType::from_str(&config.backend).ok_or_else(|| {
            DomainError::configuration(format!(
                "Unknown storage backend '{}'. Expected 'memory' or 'redis'",
                config.backend
            ))
        })?;

        info!(backend = ?storage_type, "Creating user repository");

        match storage_type {
            StorageType::InMemory => Ok(Self::create_in_memory()),
            StorageType::Redis => {
                let repository =
                    RedisUserRepository::connect(RedisRepositoryConfig::from(&config.redis))
                        .await?;
                Ok(Arc::new(repository))
            }
        }
    }

    /// Creates an in-memory repository
    pub fn create_in_memory() -> Arc<dyn UserRepository> {
        Arc::new(InMemoryUserRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from_str("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("REDIS"), Some(StorageType::Redis));
        assert_eq!(StorageType::from_str("dynamo"), None);
    }

    #[test]
    fn test_redis_settings_conversion() {
        let settings = RedisSettings {
            url: "redis://cache:6379".to_string(),
            key_prefix: Some(String::new()),
            create_only: true,
            connection_timeout_ms: 1500,
            max_attempts: 0,
            initial_backoff_ms: 10,
            max_backoff_ms: 100,
        };

        let config = RedisRepositoryConfig::from(&settings);
        assert_eq!(config.url, "redis://cache:6379");
        assert_eq!(config.key_prefix, None);
        assert!(config.create_only);
        assert_eq!(config.connection_timeout, Duration::from_millis(1500));
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.retry.max_backoff, Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_create_in_memory_from_config() {
        let config = StorageConfig::default();
        assert!(UserRepositoryFactory::create(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_backend() {
        let config = StorageConfig {
            backend: "dynamo".to_string(),
            ..Default::default()
        };

        let result = UserRepositoryFactory::create(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
