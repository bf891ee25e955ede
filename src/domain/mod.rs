//! Domain layer - entities, repository traits and errors

pub mod context;
pub mod error;
pub mod user;

pub use context::CallContext;
pub use error::{BoxError, DomainError};
pub use user::{User, UserId, UserRepository};
