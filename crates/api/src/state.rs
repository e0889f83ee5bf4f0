use std::sync::Arc;

use questline_core::clock::Clock;

use crate::config::ServerConfig;
use crate::engine::completion::CompletionOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: questline_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Source of "now" and "today". Swapped for a fixed clock in tests.
    pub clock: Arc<dyn Clock>,
    /// Transactional habit/daily/todo completion.
    pub completions: Arc<CompletionOrchestrator>,
}

impl AppState {
    pub fn new(pool: questline_db::DbPool, config: ServerConfig, clock: Arc<dyn Clock>) -> Self {
        let completions = Arc::new(CompletionOrchestrator::new(
            pool.clone(),
            Arc::clone(&clock),
            config.level_up_policy,
        ));
        Self {
            pool,
            config: Arc::new(config),
            clock,
            completions,
        }
    }
}
