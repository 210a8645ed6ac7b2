use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};
use crate::shared::DocumentId;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Editor client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                server_url: Some(DEFAULT_SERVER_URL.to_string()),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `CLIENT_API_URL`, falling back to the default server
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("CLIENT_API_URL") {
            Ok(url) => Self::with_builder(AppConfig::builder().server_url(url)),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url(), path)
    }

    /// URL of the realtime stream, optionally narrowed to one document
    pub fn cable_url(&self, doc: Option<DocumentId>) -> String {
        match doc {
            Some(id) => self.api_url(&format!("/cable?doc={}", id)),
            None => self.api_url("/cable"),
        }
    }

    pub fn server_url(&self) -> &str {
        self.app.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.server_url(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_api_url() {
        let config = Config::new();
        assert_eq!(config.api_url("/docs"), "http://127.0.0.1:3000/docs");
    }

    #[test]
    fn test_cable_url() {
        let config = Config::with_builder(
            AppConfig::builder().server_url("http://docs.local:8080/".to_string()),
        )
        .unwrap();
        assert_eq!(config.cable_url(None), "http://docs.local:8080/cable");
        assert_eq!(config.cable_url(Some(3)), "http://docs.local:8080/cable?doc=3");
    }

    #[test]
    fn test_with_builder_rejects_bad_url() {
        let result = Config::with_builder(AppConfig::builder().server_url("localhost".to_string()));
        assert!(result.is_err());
    }
}
