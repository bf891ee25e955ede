//! Shared API request/response types

pub mod error;
pub mod extract;
pub mod json;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use extract::{Path, Query};
pub use json::Json;
