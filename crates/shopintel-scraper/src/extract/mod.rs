//! Field extractors: pure functions from a parsed storefront page to records.
//!
//! None of these return `Result`. A selector that matches nothing, or an
//! element missing a required child, simply contributes no data.

mod contact;
mod faq;
mod hero;
mod links;
mod social;

use scraper::{ElementRef, Html, Selector};
use shopintel_core::selectors::SelectorConfig;

use crate::error::ScraperError;

pub use contact::{contact_details, contact_details_from_text};
pub use faq::faqs;
pub use hero::hero_products;
pub use links::important_links;
pub use social::{classify_platform, social_handles};

/// Hero-section selectors, compiled.
#[derive(Debug)]
pub struct HeroSelectors {
    pub(crate) card: Selector,
    pub(crate) title: Selector,
    pub(crate) title_fallback: Selector,
    pub(crate) price: Selector,
    pub(crate) price_fallback: Selector,
    pub(crate) link: Selector,
}

#[derive(Debug)]
pub struct FaqSelectors {
    pub(crate) item: Selector,
    pub(crate) question: Selector,
    pub(crate) answer: Selector,
}

#[derive(Debug)]
pub struct LinkSelectors {
    pub(crate) anchors: Selector,
    pub(crate) allowed_labels: Vec<String>,
}

/// Every CSS selector the extractors need, parsed once from a
/// [`SelectorConfig`].
#[derive(Debug)]
pub struct CompiledSelectors {
    pub hero: HeroSelectors,
    pub policy_content: Selector,
    pub about_content: Selector,
    pub faq: FaqSelectors,
    pub links: LinkSelectors,
    pub social: Selector,
}

impl CompiledSelectors {
    /// Parses all selectors in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] naming the first config key
    /// whose value is not valid CSS.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ScraperError> {
        let hero = &config.hero;
        let faq = &config.faq;
        Ok(Self {
            hero: HeroSelectors {
                card: compile("hero.card", &hero.card)?,
                title: compile("hero.title", &hero.title)?,
                title_fallback: compile("hero.title_fallback", &hero.title_fallback)?,
                price: compile("hero.price", &hero.price)?,
                price_fallback: compile("hero.price_fallback", &hero.price_fallback)?,
                link: compile("hero.link", &hero.link)?,
            },
            policy_content: compile("policy_content", &config.policy_content)?,
            about_content: compile("about_content", &config.about_content)?,
            faq: FaqSelectors {
                item: compile("faq.item", &faq.item)?,
                question: compile("faq.question", &faq.question)?,
                answer: compile("faq.answer", &faq.answer)?,
            },
            links: LinkSelectors {
                anchors: compile("links.anchors", &config.links.anchors)?,
                allowed_labels: config.links.allowed_labels.clone(),
            },
            social: compile("social", &social::anchor_selector())?,
        })
    }
}

impl Default for CompiledSelectors {
    fn default() -> Self {
        Self::compile(&SelectorConfig::default()).expect("built-in selectors are valid CSS")
    }
}

fn compile(name: &'static str, css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        name,
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Concatenated descendant text of `el`, trimmed.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

/// Trimmed text of the first element matching `selector`, in document order.
///
/// `None` when nothing matches or the text is blank.
#[must_use]
pub fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}
