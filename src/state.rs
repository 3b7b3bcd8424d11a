use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::GratitudeStore;

/// Shared per-process state handed to every handler through axum's `State`.
///
/// Cloning is cheap: the store and secret sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GratitudeStore>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn GratitudeStore>, config: &AppConfig) -> Self {
        Self {
            store,
            jwt_secret: Arc::from(config.security.jwt_secret.as_str()),
        }
    }
}
