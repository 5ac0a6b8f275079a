//! Competitor discovery through a web search endpoint.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Url;
use scraper::{Html, Selector};
use shopintel_core::selectors::DiscoveryConfig;
use shopintel_core::BrandContext;

use crate::assemble::BrandAssembler;

/// Finds competitor storefronts for a brand and assembles each one.
#[derive(Debug, Clone)]
pub struct CompetitorDiscoverer {
    discovery: DiscoveryConfig,
    delay: Duration,
}

impl CompetitorDiscoverer {
    /// `delay` is the pause between successive competitor assemblies.
    #[must_use]
    pub fn new(discovery: DiscoveryConfig, delay: Duration) -> Self {
        Self { discovery, delay }
    }

    /// Searches for competitors of `brand_name` and assembles up to
    /// `max_results` of them, in search-result order.
    ///
    /// A failed search yields an empty list. Competitors that fail to
    /// assemble are logged and skipped.
    pub async fn discover(&self, brand_name: &str, assembler: &BrandAssembler) -> Vec<BrandContext> {
        let query = self.discovery.query_for(brand_name);
        let search_url =
            match Url::parse_with_params(&self.discovery.search_url, &[("q", query.as_str())]) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        search_url = %self.discovery.search_url,
                        error = %e,
                        "invalid search endpoint; skipping competitor discovery"
                    );
                    return Vec::new();
                }
            };

        let body = match assembler.client().fetch_text(search_url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(brand = brand_name, error = %e, "competitor search failed");
                return Vec::new();
            }
        };

        let links = competitor_links(
            &body,
            &self.discovery.storefront_marker,
            self.discovery.max_results,
        );
        tracing::info!(brand = brand_name, found = links.len(), "competitor links found");

        let mut competitors = Vec::with_capacity(links.len());
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }
            match assembler.assemble(link).await {
                Ok(brand) => competitors.push(brand),
                Err(e) => {
                    tracing::warn!(competitor = %link, error = %e, "skipping competitor");
                }
            }
        }
        competitors
    }
}

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

/// Absolute result links containing `marker`, deduplicated, first `max` kept.
#[must_use]
pub fn competitor_links(html: &str, marker: &str, max: usize) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();
    for href in doc
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
    {
        if links.len() == max {
            break;
        }
        if href.starts_with("http") && href.contains(marker) && !links.iter().any(|l| l == href) {
            links.push(href.to_owned());
        }
    }
    links
}
