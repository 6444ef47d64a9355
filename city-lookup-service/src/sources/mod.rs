//! Clients for the third-party services a lookup draws on.
//!
//! All calls share one `reqwest::Client` so connections are pooled across
//! requests. Each source lives in its own module and adds its methods to
//! [`UpstreamClient`].

pub mod air_quality;
pub mod clock;
pub mod geocoder;
pub mod news;
pub mod places;
pub mod weather;

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::config::UpstreamConfig;
use crate::error::UpstreamError;

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self { http, config })
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }
        Ok(response)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let bytes = self
            .fetch(url)
            .await?
            .bytes()
            .await
            .map_err(UpstreamError::Transport)?;

        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    pub(crate) async fn get_text(&self, url: &str) -> Result<String, UpstreamError> {
        self.fetch(url)
            .await?
            .text()
            .await
            .map_err(UpstreamError::Transport)
    }
}
