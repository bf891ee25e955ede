//! User entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_user_id, UserValidationError};

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User record
///
/// Wire shape: `{"id", "password", "hashedPassword"}`. `password` is a
/// write-path carrier only: it is accepted on input and never serialized.
/// `hashedPassword` is serialized only when set, which is how the record
/// is persisted by remote backends.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    #[serde(default, skip_serializing)]
    password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    hashed_password: String,
}

impl User {
    /// Create a user with no credential material
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            password: String::new(),
            hashed_password: String::new(),
        }
    }

    /// Create a user carrying a plaintext password for a write
    pub fn with_password(id: UserId, password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn hashed_password(&self) -> &str {
        &self.hashed_password
    }

    /// Remove and return the plaintext password, leaving it empty
    pub fn take_password(&mut self) -> String {
        std::mem::take(&mut self.password)
    }

    pub fn set_hashed_password(&mut self, hashed_password: impl Into<String>) {
        self.hashed_password = hashed_password.into();
    }

    /// The record with every secret field cleared, safe to hand to callers
    pub fn without_secrets(self) -> Self {
        Self::new(self.id)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |s: &str| if s.is_empty() { "" } else { "<redacted>" };

        f.debug_struct("User")
            .field("id", &self.id)
            .field("password", &redact(&self.password))
            .field("hashed_password", &redact(&self.hashed_password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_id(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new("u1").unwrap();
        assert_eq!(id.as_str(), "u1");
        assert_eq!(id.to_string(), "u1");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("a\u{0}b").is_err());
    }

    #[test]
    fn test_take_password_erases_plaintext() {
        let mut user = User::with_password(user_id("u1"), "hunter2");

        assert_eq!(user.take_password(), "hunter2");
        assert_eq!(user.password(), "");
        assert_eq!(user.take_password(), "");
    }

    #[test]
    fn test_without_secrets() {
        let mut user = User::with_password(user_id("u1"), "hunter2");
        user.set_hashed_password("$argon2id$...");

        let cleared = user.without_secrets();
        assert_eq!(cleared.id().as_str(), "u1");
        assert_eq!(cleared.password(), "");
        assert_eq!(cleared.hashed_password(), "");
    }

    #[test]
    fn test_serialization_never_includes_plaintext() {
        let user = User::with_password(user_id("u1"), "hunter2");

        let json = serde_json::to_string(&user).unwrap();
        assert_eq!(json, r#"{"id":"u1"}"#);
    }

    #[test]
    fn test_serialization_includes_hash_when_set() {
        let mut user = User::new(user_id("u1"));
        user.set_hashed_password("hash");

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": "u1", "hashedPassword": "hash"}));
    }

    #[test]
    fn test_deserialize_write_payload() {
        let user: User = serde_json::from_str(r#"{"id":"u1","password":"hunter2"}"#).unwrap();

        assert_eq!(user.id().as_str(), "u1");
        assert_eq!(user.password(), "hunter2");
        assert_eq!(user.hashed_password(), "");
    }

    #[test]
    fn test_deserialize_rejects_invalid_id() {
        assert!(serde_json::from_str::<User>(r#"{"id":"","password":"x"}"#).is_err());
        assert!(serde_json::from_str::<User>(r#"{"password":"x"}"#).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut user = User::with_password(user_id("u1"), "hunter2");
        user.set_hashed_password("secret-hash");

        let debug = format!("{:?}", user);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("secret-hash"));
        assert!(debug.contains("<redacted>"));
    }
}
