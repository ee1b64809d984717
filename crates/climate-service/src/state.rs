//! Application state shared across handlers.

use std::sync::Arc;

use climate_store::Store;
use tokio::sync::{Mutex, RwLock};

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// The dataset accessor. `rusqlite::Connection` is not `Sync`, so
    /// handlers take turns on the single read-only connection.
    pub store: Mutex<Store>,
    /// Configuration.
    pub config: RwLock<Config>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, config: Config) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(store),
            config: RwLock::new(config),
        })
    }
}
