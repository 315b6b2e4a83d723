//! Link shortener backed by the Bitly v4 API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vibe_core::config::DEFAULT_SHORTEN_TIMEOUT_SECS;
use vibe_core::error::{Result, VibeError};
use vibe_core::publish::LinkShortener;

const SHORTEN_URL: &str = "https://api-ssl.bitly.com/v4/shorten";

#[derive(Clone)]
pub struct BitlyShortener {
    client: Client,
    access_token: String,
    endpoint: String,
}

impl BitlyShortener {
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(access_token, Duration::from_secs(DEFAULT_SHORTEN_TIMEOUT_SECS))
    }

    pub fn with_timeout(access_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VibeError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            access_token: access_token.into(),
            endpoint: SHORTEN_URL.to_string(),
        })
    }

    /// Overrides the shorten endpoint, e.g. for a self-hosted instance.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    long_url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    link: String,
}

#[async_trait]
impl LinkShortener for BitlyShortener {
    async fn shorten(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&ShortenRequest { long_url: url })
            .send()
            .await
            .map_err(|err| VibeError::BackendUnavailable {
                status_code: None,
                message: format!("Bitly request failed: {err}"),
                retryable: err.is_connect() || err.is_timeout(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VibeError::BackendUnavailable {
                status_code: Some(status.as_u16()),
                message: format!("Bitly returned {status}: {body}"),
                retryable: status.is_server_error(),
            });
        }

        let parsed: ShortenResponse = response
            .json()
            .await
            .map_err(|err| VibeError::malformed(format!("Failed to parse Bitly response: {err}")))?;
        Ok(parsed.link)
    }
}
