use std::sync::Arc;

use crate::auth::TokenCodec;
use crate::config::AppConfig;
use crate::database::Store;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenCodec>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let tokens = TokenCodec::from_config(&config.security);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            store,
        }
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.config.security.bcrypt_cost
    }
}
