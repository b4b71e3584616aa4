//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use contact_core::{MessageGateway, SqliteStore};

use crate::config::Config;
use crate::views::Views;

/// State shared across all HTTP handlers.
///
/// The gateway wraps the one store handle opened at startup; handlers never
/// open their own.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Validation-gated read/write access to stored contact messages.
    pub gateway: MessageGateway<SqliteStore>,
    /// Compiled page templates.
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<SqliteStore>) -> Result<Self, minijinja::Error> {
        Ok(Self {
            config: Arc::new(config),
            gateway: MessageGateway::new(store),
            views: Arc::new(Views::new()?),
        })
    }
}
