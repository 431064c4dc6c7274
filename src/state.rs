use crate::config::Settings;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            sessions: SessionStore::new(settings.session_idle),
        }
    }
}
