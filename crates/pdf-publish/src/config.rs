use crate::types::{PublishError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable that overrides the configured web app URL
pub const WEB_APP_URL_ENV: &str = "PDF_PUBLISH_WEB_APP_URL";

/// Default manuscript size limit (10 MiB)
pub const DEFAULT_MAX_MANUSCRIPT_BYTES: usize = 10 * 1024 * 1024;

/// Connection settings for the ledger web app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Deployment URL of the spreadsheet web app
    pub web_app_url: String,
    pub request_timeout_secs: u64,
    pub max_manuscript_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            web_app_url: String::new(),
            request_timeout_secs: 60,
            max_manuscript_bytes: DEFAULT_MAX_MANUSCRIPT_BYTES,
        }
    }
}

impl ServiceConfig {
    pub fn new(web_app_url: impl Into<String>) -> Self {
        Self {
            web_app_url: web_app_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| PublishError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PublishError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Replace the web app URL with the environment override, if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(WEB_APP_URL_ENV) {
            if !url.trim().is_empty() {
                self.web_app_url = url.trim().to_string();
            }
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed web app URL
    pub fn url(&self) -> Result<reqwest::Url> {
        if self.web_app_url.trim().is_empty() {
            return Err(PublishError::Config(format!(
                "No web app URL configured (set {} or web_app_url)",
                WEB_APP_URL_ENV
            )));
        }
        let url = reqwest::Url::parse(self.web_app_url.trim())
            .map_err(|e| PublishError::Config(format!("Invalid web app URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PublishError::Config(format!(
                "Unsupported URL scheme: {}",
                other
            ))),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.url()?;

        if self.request_timeout_secs == 0 {
            return Err(PublishError::Config(
                "Request timeout must be at least one second".to_string(),
            ));
        }

        if self.max_manuscript_bytes == 0 {
            return Err(PublishError::Config(
                "Manuscript size limit must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
