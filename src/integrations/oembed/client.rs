// src/integrations/oembed/client.rs
//
// Embed availability probe backed by the hosting provider's oEmbed endpoint
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Best effort: provider rejection and network failure are not told apart
// - Always probe the ORIGINAL link, never the constructed embed URL

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::CatalogConfig;
use crate::domain::{ClipError, ClipResult};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaybackProbe: Send + Sync {
    /// Ok when the provider reports the video as embeddable
    async fn check_playable(&self, original_url: &str) -> ClipResult<()>;
}

/// oEmbed HTTP client
pub struct OEmbedClient {
    endpoint: String,
    http_client: Client,
}

impl OEmbedClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> AppResult<Self> {
        Self::new(config.oembed_endpoint.clone(), config.http_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlaybackProbe for OEmbedClient {
    async fn check_playable(&self, original_url: &str) -> ClipResult<()> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("url", original_url), ("format", "json")])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                log::warn!("oEmbed request for {} failed: {}", original_url, e);
                ClipError::PlaybackUnavailable
            })?;

        if !response.status().is_success() {
            log::warn!(
                "oEmbed rejected {} with status {}",
                original_url,
                response.status()
            );
            return Err(ClipError::PlaybackUnavailable);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let client = OEmbedClient::from_config(&CatalogConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "https://www.youtube.com/oembed");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let client =
            OEmbedClient::new("http://127.0.0.1:9/oembed", Duration::from_millis(500)).unwrap();
        let result = client
            .check_playable("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .await;
        assert_eq!(result, Err(ClipError::PlaybackUnavailable));
    }
}
