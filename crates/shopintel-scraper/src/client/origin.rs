//! Storefront root URL validation and relative-link resolution.

use std::fmt;

use reqwest::Url;

use crate::error::ScraperError;

/// A validated storefront root: absolute `http`/`https` URL with a host and
/// no trailing slash.
///
/// The path is preserved, so `https://shop.example.com/en` stays a distinct
/// root from `https://shop.example.com`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrl {
    raw: String,
    parsed: Url,
}

impl StoreUrl {
    /// Validates `input` as a storefront root.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidStoreUrl`] if `input` is not an absolute
    /// `http`/`https` URL with a host.
    pub fn parse(input: &str) -> Result<Self, ScraperError> {
        let trimmed = input.trim().trim_end_matches('/');
        let invalid = |reason: String| ScraperError::InvalidStoreUrl {
            store_url: input.to_owned(),
            reason,
        };

        let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "scheme must be http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(Self {
            raw: trimmed.to_owned(),
            parsed,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Appends a well-known subpath (e.g. `/pages/faq`) to the root.
    #[must_use]
    pub fn join_path(&self, subpath: &str) -> String {
        format!("{}{subpath}", self.raw)
    }

    /// Resolves an href found on a storefront page against the root.
    ///
    /// Returns `None` for hrefs that cannot form a valid URL.
    #[must_use]
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.parsed.join(href).ok().map(String::from)
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Derives a brand name from the first label of a storefront's hostname.
///
/// `https://gymshark.myshopify.com` → `gymshark`. A leading `www.` is kept,
/// so `https://www.allbirds.com` yields `www`.
#[must_use]
pub fn brand_name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?;
    host.split('.')
        .next()
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_trailing_slash() {
        let url = StoreUrl::parse("https://memy.co.in/").unwrap();
        assert_eq!(url.as_str(), "https://memy.co.in");
    }

    #[test]
    fn parse_keeps_path() {
        let url = StoreUrl::parse("https://shop.example.com/en/").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/en");
    }

    #[test]
    fn parse_rejects_relative_input() {
        let err = StoreUrl::parse("memy.co.in").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidStoreUrl { .. }));
    }

    #[test]
    fn parse_rejects_non_http_scheme() {
        let err = StoreUrl::parse("ftp://memy.co.in").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidStoreUrl { ref reason, .. } if reason.contains("ftp"))
        );
    }

    #[test]
    fn join_path_concatenates_subpath() {
        let url = StoreUrl::parse("https://memy.co.in").unwrap();
        assert_eq!(
            url.join_path("/pages/faq"),
            "https://memy.co.in/pages/faq"
        );
    }

    #[test]
    fn resolve_handles_relative_and_absolute_hrefs() {
        let url = StoreUrl::parse("https://memy.co.in").unwrap();
        assert_eq!(
            url.resolve("/pages/contact").as_deref(),
            Some("https://memy.co.in/pages/contact")
        );
        assert_eq!(
            url.resolve("https://blog.memy.co.in/").as_deref(),
            Some("https://blog.memy.co.in/")
        );
        assert_eq!(
            url.resolve("//www.instagram.com/memy").as_deref(),
            Some("https://www.instagram.com/memy")
        );
        assert_eq!(url.resolve("   "), None);
    }

    #[test]
    fn brand_name_uses_first_host_label() {
        assert_eq!(
            brand_name_from_url("https://gymshark.myshopify.com/").as_deref(),
            Some("gymshark")
        );
        assert_eq!(
            brand_name_from_url("https://www.allbirds.com").as_deref(),
            Some("www")
        );
        assert_eq!(brand_name_from_url("not a url"), None);
    }
}
