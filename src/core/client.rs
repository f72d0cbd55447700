use crate::core::{ProviderResponse, QuoteRequestDocument, QuoteTransport};
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const API_KEY_HEADER: &str = "api_key";

/// Single-shot HTTP client for the provider's `/quote` endpoint.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    client: Client,
    timeout: Duration,
}

impl QuoteClient {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(base_url: &str) -> String {
        format!("{}/quote", base_url.trim_end_matches('/'))
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if e.is_connect() {
            TransportError::Connection(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl QuoteTransport for QuoteClient {
    async fn quote(
        &self,
        base_url: &str,
        api_key: &str,
        document: &QuoteRequestDocument,
    ) -> Result<ProviderResponse, TransportError> {
        let endpoint = Self::endpoint(base_url);
        let body = serde_json::to_string(document).map_err(|e| {
            TransportError::Request(format!("cannot serialize quote request: {}", e))
        })?;

        tracing::debug!("Making quote request to: {}", endpoint);
        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!("Quote response status: {}", status);

        let text = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str::<ProviderResponse>(&text)
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}
