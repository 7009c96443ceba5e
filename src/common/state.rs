use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared handles injected into every request handler.
///
/// The connection pool is opened once at startup and dropped on shutdown;
/// handlers never reach for a global.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
