use std::sync::Arc;

use crate::auth::services::AuthService;
use crate::config::Config;

/// Shared handler state; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(config: Config, auth_service: AuthService) -> Self {
        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
        }
    }

    pub fn cookie_secure(&self) -> bool {
        self.config.cookie_secure()
    }
}
