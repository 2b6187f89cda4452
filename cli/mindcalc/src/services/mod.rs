use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::Config;

pub mod drill_service;
pub mod problem_generator;
pub mod reporting_service;
pub mod session_recorder;
pub mod session_store;

use session_store::{MongoSessionStore, SessionStore};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SessionStore>,
    saving: AtomicBool,
}

impl AppState {
    /// MongoDB-backed state. No I/O happens until the store is first used.
    pub fn new(config: Config) -> Self {
        let store = Arc::new(MongoSessionStore::new(&config));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Self {
        Self {
            config,
            store,
            saving: AtomicBool::new(false),
        }
    }

    /// Set once a finished drill starts writing its session.
    pub fn mark_saving(&self) {
        self.saving.store(true, Ordering::SeqCst);
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }
}
