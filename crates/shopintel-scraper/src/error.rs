use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid store URL \"{store_url}\": {reason}")]
    InvalidStoreUrl { store_url: String, reason: String },

    #[error("storefront unreachable: {store_url}")]
    StorefrontUnreachable { store_url: String },

    #[error("invalid CSS selector for {name} (\"{selector}\"): {reason}")]
    InvalidSelector {
        name: &'static str,
        selector: String,
        reason: String,
    },
}
