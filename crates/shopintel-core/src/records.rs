//! Records produced by one storefront scrape.
//!
//! Everything here is best-effort data: optional fields stay `None` when the
//! storefront did not expose them, and sequences stay empty. Nothing is
//! synthesized to fill a gap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A product from either the `products.json` catalog or a hero section on the
/// storefront homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Storefront-assigned id, stored as a string to avoid precision loss.
    /// `None` when the storefront did not expose one; such products are
    /// identified by their position in the enclosing sequence.
    pub id: Option<String>,
    pub title: String,
    /// Price exactly as the storefront rendered it (e.g. `"12.99"` or `"$12.99"`).
    pub price: Option<String>,
    /// Raw `body_html` for catalog products; hero products carry no description.
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
    Tiktok,
}

impl Platform {
    /// Classification order used when an href could match more than one platform.
    pub const ALL: [Platform; 3] = [Platform::Instagram, Platform::Facebook, Platform::Tiktok];

    /// Domain substring that identifies a link to this platform.
    #[must_use]
    pub fn domain(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram.com",
            Platform::Facebook => "facebook.com",
            Platform::Tiktok => "tiktok.com",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            "tiktok" => Ok(Platform::Tiktok),
            other => Err(format!("unknown social platform '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandle {
    pub platform: Platform,
    pub url: String,
}

/// Emails and phone numbers scraped from the contact page. Order follows the
/// page text; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
}

impl ContactDetail {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phone_numbers.is_empty()
    }
}

/// Lower-cased link label → absolute URL.
pub type ImportantLinks = BTreeMap<String, String>;

/// The complete normalized output of one storefront scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandContext {
    /// Storefront root with any trailing slash removed.
    pub store_url: String,
    pub product_catalog: Vec<Product>,
    pub hero_products: Vec<Product>,
    pub privacy_policy: Option<String>,
    pub return_policy: Option<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub social_handles: Vec<SocialHandle>,
    pub contact_details: ContactDetail,
    pub brand_description: Option<String>,
    #[serde(default)]
    pub important_links: ImportantLinks,
}

impl BrandContext {
    /// An empty record for `store_url`, to be filled stage by stage.
    #[must_use]
    pub fn empty(store_url: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            product_catalog: Vec::new(),
            hero_products: Vec::new(),
            privacy_policy: None,
            return_policy: None,
            faqs: Vec::new(),
            social_handles: Vec::new(),
            contact_details: ContactDetail::default(),
            brand_description: None,
            important_links: ImportantLinks::new(),
        }
    }
}
