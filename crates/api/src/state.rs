use std::sync::Arc;

use sangha_core::book_points::ClassifierConfig;

use crate::config::ServerConfig;
use crate::uploads::UploadRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sangha_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Recognized publishers and the per-title points table.
    pub classifier: Arc<ClassifierConfig>,
    /// Users with a report save currently in progress.
    pub uploads: Arc<UploadRegistry>,
}

impl AppState {
    pub fn new(pool: sangha_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            classifier: Arc::new(ClassifierConfig::default()),
            uploads: Arc::new(UploadRegistry::default()),
        }
    }
}
