use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use portside::api::types::ApiContext;
use portside::api::server;
use portside::config::{self, AppConfig};
use portside::pipeline::structuring::GeminiClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // Fail fast on a missing credential, before accepting any request.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let addr = config.bind_addr;
    let ctx = ApiContext {
        client: Arc::new(GeminiClient::from_config(&config)),
        config: Arc::new(config),
    };

    if let Err(e) = server::serve(ctx, addr).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
