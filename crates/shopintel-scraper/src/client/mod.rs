//! HTTP page fetcher for storefront pages and the `products.json` endpoint.

mod origin;

use std::time::Duration;

use reqwest::Client;
use scraper::Html;

use crate::error::ScraperError;

pub use origin::{brand_name_from_url, StoreUrl};

/// A successfully fetched page body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

impl Page {
    /// Parses the body into a DOM tree.
    ///
    /// `Html` is not `Send`; keep the returned tree out of scope at every
    /// `.await` so callers' futures stay `Send`.
    #[must_use]
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Thin wrapper over `reqwest::Client` with a fixed timeout and `User-Agent`.
///
/// Issues a single GET per call: no retries, default redirect policy.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
}

impl StorefrontClient {
    /// Creates a `StorefrontClient` with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the page, or `None` on any transport error,
    /// timeout, or non-2xx status.
    pub async fn fetch_page(&self, url: &str) -> Option<Page> {
        match self.fetch_text(url).await {
            Ok(body) => Some(Page {
                url: url.to_owned(),
                body,
            }),
            Err(e) => {
                tracing::debug!(url, error = %e, "page fetch failed; treating as absent");
                None
            }
        }
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS, timeout, or body decode failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/json;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}
