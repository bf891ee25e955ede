//! User record endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, Query};
use crate::domain::User;

/// Query parameters for GET /users/{id}
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetUserQuery {
    #[serde(default)]
    pub password: String,
}

/// Envelope for a returned record
///
/// `User` never serializes its plaintext password, and the service clears
/// the stored hash before returning, so only the ID goes out.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: User,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self { user }
    }
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<GetUserQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "GET user");

    let ctx = state.call_context();
    let user = state
        .user_service
        .get_user(&ctx, &id, &query.password)
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /users/{id}
pub async fn put_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<User>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "PUT user");

    let ctx = state.call_context();
    let user = state.user_service.put_user(&ctx, &id, candidate).await?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(candidate): Json<User>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = %id, "DELETE user");

    let ctx = state.call_context();
    let user = state.user_service.delete_user(&ctx, &id, candidate).await?;

    Ok(Json(UserResponse::from(user)))
}
