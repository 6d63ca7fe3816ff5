//! Shared application state

use std::sync::Arc;

use budgetool_auth::AuthService;
use budgetool_db::Database;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<Database>,
    /// Authentication services
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }
}
