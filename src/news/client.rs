//! HTTP client for the Inshorts-style headline source.
//!
//! The source answers `GET <base>?category=<tag>` with `{ "data": [ ... ] }`.
//! No retries are attempted; callers decide how a failure is surfaced.

use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::core::models::{Category, Headline, NewsResponse};
use crate::errors::RelayError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NewsClient {
    http: Client,
    base_url: String,
}

impl NewsClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Builds `<base>?category=<tag>`, keeping any query the base already has.
    pub fn category_url(&self, category: Category) -> Result<Url, RelayError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            RelayError::HttpError(format!("Invalid news source URL '{}': {e}", self.base_url))
        })?;
        url.query_pairs_mut()
            .append_pair("category", category.as_str());
        Ok(url)
    }

    /// Fetches the headline list for `category`.
    ///
    /// # Errors
    ///
    /// `RelayError::UpstreamStatus` carries the status and body of a non-2xx
    /// answer; transport and decoding problems map to `HttpError`/`ParseError`.
    pub async fn fetch(&self, category: Category) -> Result<NewsResponse, RelayError> {
        let url = self.category_url(category)?;
        info!(%url, "Fetching headlines");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(
                "News source request failed: status={} body={}",
                status, body
            );
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let parsed: NewsResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed)
    }

    /// The first headline for `category`, or `None` when the source has none.
    pub async fn latest(&self, category: Category) -> Result<Option<Headline>, RelayError> {
        let response = self.fetch(category).await?;
        Ok(response.first().cloned())
    }
}
