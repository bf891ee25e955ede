//! Application state for shared services

use std::time::Duration;

use crate::domain::CallContext;
use crate::infrastructure::user::UserService;

/// Application state shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_service: UserService,
    /// Deadline given to each request's call context
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(user_service: UserService, request_timeout: Duration) -> Self {
        Self {
            user_service,
            request_timeout,
        }
    }

    /// Fresh call context for one request
    pub fn call_context(&self) -> CallContext {
        CallContext::with_timeout(self.request_timeout)
    }
}
