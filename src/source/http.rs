//! HTTP page source backed by `reqwest`

use crate::core::error::FetchError;
use crate::source::{ApiPage, PageSource};
use async_trait::async_trait;

/// Public character endpoint
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/character";

/// Fetches pages with `GET {base_url}?page={n}`
///
/// Timeouts and retries are left to the supplied `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies, TLS)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpPageSource {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, page: u32) -> Result<ApiPage, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network {
            page,
            message: e.to_string(),
        };

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                page,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(network)?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Malformed {
            page,
            message: e.to_string(),
        })
    }
}
