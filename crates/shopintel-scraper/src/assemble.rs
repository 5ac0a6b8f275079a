//! Assembles one storefront into a [`BrandContext`].

use scraper::Html;
use shopintel_core::selectors::{SelectorConfig, StorefrontPaths};
use shopintel_core::BrandContext;
use tracing::Instrument;

use crate::catalog::catalog_from_json;
use crate::client::{StoreUrl, StorefrontClient};
use crate::error::ScraperError;
use crate::extract::{self, CompiledSelectors};

/// Runs every field extractor against a single storefront root.
///
/// Stages run sequentially; each one degrades to an absent or empty field on
/// its own failure. Only a missing root page aborts the whole assembly.
#[derive(Debug)]
pub struct BrandAssembler {
    client: StorefrontClient,
    paths: StorefrontPaths,
    selectors: CompiledSelectors,
}

impl BrandAssembler {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any CSS selector in
    /// `config` fails to parse.
    pub fn new(client: StorefrontClient, config: &SelectorConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            client,
            paths: config.paths.clone(),
            selectors: CompiledSelectors::compile(config)?,
        })
    }

    #[must_use]
    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// Fetches and extracts everything known about the storefront at `url`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidStoreUrl`] if `url` is not an absolute
    ///   `http`/`https` URL.
    /// - [`ScraperError::StorefrontUnreachable`] if the root page cannot be
    ///   fetched (transport error, timeout, or non-2xx status).
    pub async fn assemble(&self, url: &str) -> Result<BrandContext, ScraperError> {
        let root = StoreUrl::parse(url)?;
        let span = tracing::info_span!("assemble", store_url = %root);
        self.assemble_root(root).instrument(span).await
    }

    async fn assemble_root(&self, root: StoreUrl) -> Result<BrandContext, ScraperError> {
        let Some(home) = self.client.fetch_page(root.as_str()).await else {
            tracing::warn!("storefront root unreachable");
            return Err(ScraperError::StorefrontUnreachable {
                store_url: root.as_str().to_owned(),
            });
        };

        let mut brand = BrandContext::empty(root.as_str());

        brand.product_catalog = match self
            .client
            .fetch_text(&root.join_path(&self.paths.catalog))
            .await
        {
            Ok(body) => catalog_from_json(&root, &body),
            Err(e) => {
                tracing::debug!(error = %e, "catalog fetch failed; leaving catalog empty");
                Vec::new()
            }
        };

        {
            let doc = home.document();
            brand.hero_products = extract::hero_products(&doc, &root, &self.selectors.hero);
            brand.social_handles = extract::social_handles(&doc, &root, &self.selectors.social);
            brand.important_links =
                extract::important_links(&doc, &root, &self.selectors.links);
        }

        let policy = &self.selectors.policy_content;
        brand.privacy_policy = self
            .extract_page(&root, &self.paths.privacy_policy, |doc| {
                extract::first_text(doc, policy)
            })
            .await
            .flatten();
        brand.return_policy = self
            .extract_page(&root, &self.paths.return_policy, |doc| {
                extract::first_text(doc, policy)
            })
            .await
            .flatten();

        brand.faqs = self
            .extract_page(&root, &self.paths.faq, |doc| {
                extract::faqs(doc, &self.selectors.faq)
            })
            .await
            .unwrap_or_default();

        brand.contact_details = self
            .extract_page(&root, &self.paths.contact, extract::contact_details)
            .await
            .unwrap_or_default();

        brand.brand_description = self
            .extract_page(&root, &self.paths.about, |doc| {
                extract::first_text(doc, &self.selectors.about_content)
            })
            .await
            .flatten();

        tracing::info!(
            catalog = brand.product_catalog.len(),
            hero = brand.hero_products.len(),
            faqs = brand.faqs.len(),
            social = brand.social_handles.len(),
            emails = brand.contact_details.emails.len(),
            phones = brand.contact_details.phone_numbers.len(),
            links = brand.important_links.len(),
            privacy_policy = brand.privacy_policy.is_some(),
            return_policy = brand.return_policy.is_some(),
            description = brand.brand_description.is_some(),
            "brand assembled"
        );

        Ok(brand)
    }

    /// Fetches `{root}{subpath}` and runs `extract` over it; `None` when the
    /// page is unavailable.
    async fn extract_page<T>(
        &self,
        root: &StoreUrl,
        subpath: &str,
        extract: impl FnOnce(&Html) -> T,
    ) -> Option<T> {
        let page = self.client.fetch_page(&root.join_path(subpath)).await?;
        Some(extract(&page.document()))
    }
}
