//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::SessionService;

/// Application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub session_service: Arc<SessionService>,
}

impl AppState {
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }
}
