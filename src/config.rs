use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Portside";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gemini model used for document structuring.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seconds before an extraction request is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default listen port, overridable via `PORT`.
pub const DEFAULT_PORT: u16 = 8000;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "portside=info,tower_http=warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

/// Runtime configuration, resolved from the environment once at startup.
///
/// A missing API key fails here — before any request is accepted and before
/// any call to the extraction service is attempted.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    /// Transient staging area for uploaded files.
    pub uploads_dir: PathBuf,
    /// Aggregate result artifact, wiped shortly after each response.
    pub output_path: PathBuf,
    pub timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            uploads_dir: PathBuf::from("uploads"),
            output_path: PathBuf::from("output.json"),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything that mutates them lives in
    // a single test to keep the suite parallel-safe.
    #[test]
    fn from_env_resolves_environment() {
        std::env::remove_var("GOOGLE_API_KEY");
        std::env::remove_var("PORT");
        std::env::remove_var("GEMINI_MODEL");
        std::env::remove_var("GEMINI_BASE_URL");

        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var("GOOGLE_API_KEY", "   ");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        std::env::set_var("GOOGLE_API_KEY", "test-key");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_path, PathBuf::from("output.json"));

        std::env::set_var("PORT", "not-a-port");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::InvalidPort(_))
        ));

        std::env::set_var("PORT", "9100");
        std::env::set_var("GEMINI_MODEL", "gemini-2.5-pro");
        std::env::set_var("GEMINI_BASE_URL", "http://127.0.0.1:1234/v1beta");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.bind_addr.port(), 9100);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://127.0.0.1:1234/v1beta");

        std::env::remove_var("GOOGLE_API_KEY");
        std::env::remove_var("PORT");
        std::env::remove_var("GEMINI_MODEL");
        std::env::remove_var("GEMINI_BASE_URL");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_endpoint_is_https() {
        assert!(DEFAULT_BASE_URL.starts_with("https://"));
    }
}
