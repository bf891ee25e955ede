//! User infrastructure module
//!
//! This module provides implementations for user record management,
//! including password hashing with Argon2, the in-memory and Redis
//! repositories, the repository factory, and the user service.

mod factory;
mod password;
mod redis_repository;
mod repository;
mod service;

pub use factory::{StorageType, UserRepositoryFactory};
pub use password::{Argon2Hasher, PasswordHasher, Verification};
pub use redis_repository::{RedisRepositoryConfig, RedisUserRepository, RetryPolicy};
pub use repository::InMemoryUserRepository;
pub use service::UserService;
