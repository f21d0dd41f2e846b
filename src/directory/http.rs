//! HTTP directory source.

use async_trait::async_trait;
use reqwest::Client;

use crate::directory::{Directory, DirectoryError, DirectoryProvider};

/// Configuration for the hosted directory document.
#[derive(Debug, Clone)]
pub struct HttpDirectoryConfig {
    /// Document URL, e.g. `"https://console.example.com/data/admin-users.json"`.
    pub url: String,
}

/// HTTP client for the hosted directory document.
#[derive(Debug, Clone)]
pub struct HttpDirectoryProvider {
    config: HttpDirectoryConfig,
    http: Client,
}

impl HttpDirectoryProvider {
    /// Create a new provider from the given configuration.
    #[must_use]
    pub fn new(config: HttpDirectoryConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl DirectoryProvider for HttpDirectoryProvider {
    async fn load(&self) -> Result<Directory, DirectoryError> {
        let response = self.http.get(&self.config.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(DirectoryError::UnexpectedResponse(format!(
                "directory fetch failed with status {status}: {text}"
            )));
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(DirectoryError::Parse)
    }
}
