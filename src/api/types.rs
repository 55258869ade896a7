//! Shared state for the API layer.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::pipeline::structuring::GenerativeClient;

/// State shared by all handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub config: Arc<AppConfig>,
    pub client: Arc<dyn GenerativeClient + Send + Sync>,
}
