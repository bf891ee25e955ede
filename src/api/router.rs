use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::users;

/// Create the router with application state
///
/// - `GET    /users/{id}?password=...` fetches a user
/// - `PUT    /users/{id}` creates or replaces a user
/// - `DELETE /users/{id}` deletes a user
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::put_user)
                .delete(users::delete_user),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
