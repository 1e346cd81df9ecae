use std::time::Duration;

use super::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Plain reqwest client with connect and overall timeouts.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// # Errors
    ///
    /// Returns an error if the TLS backend or resolver can't be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
