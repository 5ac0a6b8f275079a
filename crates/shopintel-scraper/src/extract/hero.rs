use scraper::{ElementRef, Html, Selector};
use shopintel_core::Product;

use super::{element_text, HeroSelectors};
use crate::client::StoreUrl;

/// Products featured on the storefront homepage.
///
/// Every matching card yields one product: a missing title or price reads as
/// `""`, a missing product link leaves `url` unset. The storefront id comes
/// from the card's `data-product-id` attribute when the theme renders one.
#[must_use]
pub fn hero_products(doc: &Html, root: &StoreUrl, sel: &HeroSelectors) -> Vec<Product> {
    doc.select(&sel.card)
        .map(|card| {
            let title = first_of(card, &sel.title, &sel.title_fallback)
                .map(element_text)
                .unwrap_or_default();
            let price = first_of(card, &sel.price, &sel.price_fallback)
                .map(element_text)
                .unwrap_or_default();
            let url = card
                .select(&sel.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .and_then(|href| root.resolve(href));
            let id = card
                .value()
                .attr("data-product-id")
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned);

            Product {
                id,
                title,
                price: Some(price),
                description: None,
                url,
            }
        })
        .collect()
}

fn first_of<'a>(
    card: ElementRef<'a>,
    primary: &Selector,
    fallback: &Selector,
) -> Option<ElementRef<'a>> {
    card.select(primary)
        .next()
        .or_else(|| card.select(fallback).next())
}
