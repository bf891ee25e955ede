//! User record service
//!
//! Fetch, create and delete user records addressed by an opaque ID, with
//! writes and deletes gated by password verification:
//! - Argon2id password hashing with configurable cost
//! - In-memory or Redis storage selected by configuration
//! - HTTP API built on axum

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::user::{Argon2Hasher, UserRepositoryFactory, UserService};
use tracing::info;

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repository = UserRepositoryFactory::create(&config.storage).await?;
    let hasher = Argon2Hasher::from_config(&config.credentials)?;

    info!(
        memory_cost_kib = config.credentials.memory_cost_kib,
        time_cost = config.credentials.time_cost,
        parallelism = config.credentials.parallelism,
        "Password hashing configured"
    );

    let user_service = UserService::new(repository, Arc::new(hasher));

    Ok(AppState::new(user_service, config.server.request_timeout()))
}
