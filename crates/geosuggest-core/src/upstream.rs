// crates/geosuggest-core/src/upstream.rs
#![cfg(feature = "http")]

//! # HTTP Upstream
//!
//! [`PlaceSource`] backed by a Nominatim-compatible search endpoint.

use crate::config::SuggestConfig;
use crate::error::Result;
use crate::model::{QueryDescriptor, RawPlace};
use crate::traits::PlaceSource;
use async_trait::async_trait;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
}

impl HttpSource {
    /// Client with the configured `User-Agent` and per-request timeout.
    pub fn new(config: &SuggestConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wrap an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PlaceSource for HttpSource {
    async fn fetch(&self, descriptor: &QueryDescriptor) -> Result<Vec<RawPlace>> {
        let body = self
            .http
            .get(&descriptor.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
