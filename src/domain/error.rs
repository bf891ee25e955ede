use thiserror::Error;

/// Boxed underlying cause carried by backend failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Absent record, or a credential check that failed. The two are
    /// reported identically so callers cannot discover which IDs exist.
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Inconsistent IDs: path '{path_id}' does not match body '{body_id}'")]
    InconsistentId { path_id: String, body_id: String },

    #[error("Invalid password: {message}")]
    InvalidPassword { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Cancelled: {message}")]
    Cancelled { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn inconsistent_id(path_id: impl Into<String>, body_id: impl Into<String>) -> Self {
        Self::InconsistentId {
            path_id: path_id.into(),
            body_id: body_id.into(),
        }
    }

    pub fn invalid_password(message: impl Into<String>) -> Self {
        Self::InvalidPassword {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Backend failure wrapping the error that caused it
    pub fn backend_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
