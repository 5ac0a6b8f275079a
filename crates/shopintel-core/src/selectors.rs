//! CSS selectors, link allow-list, and well-known storefront subpaths.
//!
//! Every value has a built-in default matching the common Shopify theme
//! layout. A YAML file can override any subset of them so site-specific
//! selector sets can be added without touching extractor code:
//!
//! ```yaml
//! paths:
//!   return_policy: /policies/refunded-policy
//! faq:
//!   item: ".faq-item, .accordion, .collapsible"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub paths: StorefrontPaths,
    pub hero: HeroSelectors,
    /// Content container on privacy/return policy pages.
    pub policy_content: String,
    /// Content container on the about page.
    pub about_content: String,
    pub faq: FaqSelectors,
    pub links: LinkSelectors,
    pub discovery: DiscoveryConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            paths: StorefrontPaths::default(),
            hero: HeroSelectors::default(),
            policy_content: ".policy-content, .main-content".to_string(),
            about_content: ".about-content, .main-content".to_string(),
            faq: FaqSelectors::default(),
            links: LinkSelectors::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// Well-known subpaths relative to the storefront root. Each starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontPaths {
    pub catalog: String,
    pub privacy_policy: String,
    pub return_policy: String,
    pub faq: String,
    pub contact: String,
    pub about: String,
}

impl Default for StorefrontPaths {
    fn default() -> Self {
        Self {
            catalog: "/products.json".to_string(),
            privacy_policy: "/policies/privacy-policy".to_string(),
            return_policy: "/policies/refund-policy".to_string(),
            faq: "/pages/faq".to_string(),
            contact: "/pages/contact".to_string(),
            about: "/pages/about".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSelectors {
    pub card: String,
    pub title: String,
    pub title_fallback: String,
    pub price: String,
    pub price_fallback: String,
    pub link: String,
}

impl Default for HeroSelectors {
    fn default() -> Self {
        Self {
            card: ".product-card, .featured-product".to_string(),
            title: ".product-title".to_string(),
            title_fallback: "h3".to_string(),
            price: ".product-price".to_string(),
            price_fallback: ".price".to_string(),
            link: "a[href*='/products/']".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqSelectors {
    pub item: String,
    pub question: String,
    pub answer: String,
}

impl Default for FaqSelectors {
    fn default() -> Self {
        Self {
            item: ".faq-item, .accordion".to_string(),
            question: ".faq-question, .accordion-title".to_string(),
            answer: ".faq-answer, .accordion-content".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSelectors {
    pub anchors: String,
    /// Lower-case labels that may appear as keys in the important-links map.
    pub allowed_labels: Vec<String>,
}

impl Default for LinkSelectors {
    fn default() -> Self {
        Self {
            anchors: "a[href*='/pages/'], a[href*='track'], a[href*='contact'], a[href*='blog']"
                .to_string(),
            allowed_labels: vec![
                "order tracking".to_string(),
                "contact us".to_string(),
                "blogs".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub search_url: String,
    /// Search query; `{brand}` is replaced with the brand name.
    pub query_template: String,
    /// Substring a result href must contain to count as a storefront.
    pub storefront_marker: String,
    pub max_results: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.com/search".to_string(),
            query_template: "site:*.myshopify.com {brand} competitors".to_string(),
            storefront_marker: ".myshopify.com".to_string(),
            max_results: 3,
        }
    }
}

impl DiscoveryConfig {
    #[must_use]
    pub fn query_for(&self, brand_name: &str) -> String {
        self.query_template.replace("{brand}", brand_name)
    }
}

/// Load and validate a selector configuration from a YAML file.
///
/// Keys absent from the file keep their built-in defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_selector_config(path: &Path) -> Result<SelectorConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SelectorFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_selector_config(&content)
}

/// Parse and validate a selector configuration from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_selector_config(yaml: &str) -> Result<SelectorConfig, ConfigError> {
    let config: SelectorConfig = serde_yaml::from_str(yaml)?;
    validate_selector_config(&config)?;
    Ok(config)
}

fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    let paths = &config.paths;
    for (name, value) in [
        ("paths.catalog", &paths.catalog),
        ("paths.privacy_policy", &paths.privacy_policy),
        ("paths.return_policy", &paths.return_policy),
        ("paths.faq", &paths.faq),
        ("paths.contact", &paths.contact),
        ("paths.about", &paths.about),
    ] {
        if !value.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{name} must start with '/', got '{value}'"
            )));
        }
    }

    let hero = &config.hero;
    let faq = &config.faq;
    for (name, value) in [
        ("hero.card", &hero.card),
        ("hero.title", &hero.title),
        ("hero.title_fallback", &hero.title_fallback),
        ("hero.price", &hero.price),
        ("hero.price_fallback", &hero.price_fallback),
        ("hero.link", &hero.link),
        ("policy_content", &config.policy_content),
        ("about_content", &config.about_content),
        ("faq.item", &faq.item),
        ("faq.question", &faq.question),
        ("faq.answer", &faq.answer),
        ("links.anchors", &config.links.anchors),
        ("discovery.storefront_marker", &config.discovery.storefront_marker),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{name} must be non-empty")));
        }
    }

    if config.links.allowed_labels.is_empty() {
        return Err(ConfigError::Validation(
            "links.allowed_labels must list at least one label".to_string(),
        ));
    }
    if let Some(label) = config
        .links
        .allowed_labels
        .iter()
        .find(|l| l.trim() != l.as_str() || l.to_lowercase() != **l)
    {
        return Err(ConfigError::Validation(format!(
            "links.allowed_labels entries must be trimmed lower-case text, got '{label}'"
        )));
    }

    if !config.discovery.query_template.contains("{brand}") {
        return Err(ConfigError::Validation(
            "discovery.query_template must contain a {brand} placeholder".to_string(),
        ));
    }
    if config.discovery.max_results == 0 {
        return Err(ConfigError::Validation(
            "discovery.max_results must be at least 1".to_string(),
        ));
    }

    Ok(())
}
