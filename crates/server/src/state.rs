//! Application State
//!
//! Shared state across all handlers.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

use tourist_webhook_agent::ActionDispatcher;
use tourist_webhook_config::Settings;
use tourist_webhook_persistence::RecordStore;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    /// Record store shared with the dispatcher, also probed by `/ready`
    pub store: Arc<dyn RecordStore>,
    pub dispatcher: Arc<ActionDispatcher>,
}

impl AppState {
    pub fn new(config: Settings, store: Arc<dyn RecordStore>) -> Self {
        let query_timeout = Duration::from_millis(config.store.query_timeout_ms);
        let dispatcher = ActionDispatcher::new(store.clone(), query_timeout);

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }

    /// Deadline applied to store calls
    pub fn query_timeout(&self) -> Duration {
        self.dispatcher.resolver().deadline()
    }
}
