//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::infra::Database;
use user_service_lib::UserService;

use crate::token::TokenKeys;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    /// Absent when running on in-memory storage
    pub database: Option<Database>,
    pub tokens: TokenKeys,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Option<Database>,
        tokens: TokenKeys,
    ) -> Self {
        Self {
            user_service,
            database,
            tokens,
        }
    }
}
