//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID exceeds maximum length of {0} bytes")]
    IdTooLong(usize),

    #[error("User ID contains a control character")]
    InvalidIdCharacter,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

const MAX_USER_ID_LENGTH: usize = 256;

/// Validate a user ID
///
/// IDs are opaque to the service. Rules:
/// - Cannot be empty
/// - Maximum 256 bytes
/// - No control characters
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::IdTooLong(MAX_USER_ID_LENGTH));
    }

    if id.chars().any(char::is_control) {
        return Err(UserValidationError::InvalidIdCharacter);
    }

    Ok(())
}

/// Validate a plaintext password supplied on a write
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("u1").is_ok());
        assert!(validate_user_id("user-1").is_ok());
        assert!(validate_user_id("alice@example.com").is_ok());
        assert!(validate_user_id("0f8fad5b-d9cb-469f-a165-70867728950e").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_too_long() {
        let long_id = "a".repeat(257);
        assert_eq!(
            validate_user_id(&long_id),
            Err(UserValidationError::IdTooLong(256))
        );
        assert!(validate_user_id(&"a".repeat(256)).is_ok());
    }

    #[test]
    fn test_user_id_control_character() {
        assert_eq!(
            validate_user_id("user\nname"),
            Err(UserValidationError::InvalidIdCharacter)
        );
    }

    #[test]
    fn test_passwords() {
        assert!(validate_password("hunter2").is_ok());
        assert!(validate_password(" ").is_ok());
        assert_eq!(validate_password(""), Err(UserValidationError::EmptyPassword));
    }
}
