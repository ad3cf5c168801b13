use async_trait::async_trait;
use reqwest::Client;

use crate::config::EngineConfig;
use crate::error::{CollectionError, Result};
use crate::providers::Transport;

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CollectionError::Transport(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(CollectionError::Transport(format!(
                "HTTP error! status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| CollectionError::Transport(format!("Reading body from {} failed: {}", url, e)))
    }
}
