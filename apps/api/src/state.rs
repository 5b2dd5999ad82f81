use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::preferences::{PreferenceStore, Theme};
use crate::profile::bio::BioGenerator;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The researcher's session. All mutations go through `Session` methods.
    pub session: Arc<RwLock<Session>>,
    /// Pluggable bio backend. Default: `LlmBioGenerator`.
    pub bio_generator: Arc<dyn BioGenerator>,
    pub preferences: Arc<dyn PreferenceStore>,
    /// Theme as read from the store at startup, then kept in step with toggles.
    /// `None` until the user has chosen one.
    pub theme: Arc<RwLock<Option<Theme>>>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        session: Session,
        bio_generator: Arc<dyn BioGenerator>,
        preferences: Arc<dyn PreferenceStore>,
        theme: Option<Theme>,
        config: Config,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            bio_generator,
            preferences,
            theme: Arc::new(RwLock::new(theme)),
            config,
        }
    }
}
