use scraper::Html;
use shopintel_core::ImportantLinks;

use super::{element_text, LinkSelectors};
use crate::client::StoreUrl;

/// Navigation links whose visible label is on the allow-list, keyed by the
/// lower-cased label. A label seen twice keeps its last href.
#[must_use]
pub fn important_links(doc: &Html, root: &StoreUrl, sel: &LinkSelectors) -> ImportantLinks {
    let mut links = ImportantLinks::new();
    for anchor in doc.select(&sel.anchors) {
        let label = element_text(anchor).to_lowercase();
        if !sel.allowed_labels.iter().any(|allowed| *allowed == label) {
            continue;
        }
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| root.resolve(href))
        else {
            continue;
        };
        links.insert(label, url);
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CompiledSelectors;

    fn extract(html: &str) -> ImportantLinks {
        let root = StoreUrl::parse("https://memy.co.in/").unwrap();
        important_links(
            &Html::parse_document(html),
            &root,
            &CompiledSelectors::default().links,
        )
    }

    #[test]
    fn keeps_allow_listed_labels_with_absolute_urls() {
        let got = extract(
            r#"<nav>
                 <a href="/pages/track-order"> Order Tracking </a>
                 <a href="/pages/contact">CONTACT US</a>
                 <a href="https://memy.co.in/blogs/news">Blogs</a>
               </nav>"#,
        );
        assert_eq!(got.len(), 3);
        assert_eq!(got["order tracking"], "https://memy.co.in/pages/track-order");
        assert_eq!(got["contact us"], "https://memy.co.in/pages/contact");
        assert_eq!(got["blogs"], "https://memy.co.in/blogs/news");
    }

    #[test]
    fn labels_outside_allow_list_add_nothing() {
        let got = extract(
            r#"<a href="/pages/about">About Us</a>
               <a href="/pages/shipping">Shipping</a>
               <a href="/blogs/news">Read our blog</a>"#,
        );
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn allow_listed_label_on_unmatched_href_is_ignored() {
        let got = extract(r#"<a href="/collections/all">Blogs</a>"#);
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn last_occurrence_wins() {
        let got = extract(
            r#"<header><a href="/pages/contact">Contact Us</a></header>
               <footer><a href="/pages/contact-footer">Contact us</a></footer>"#,
        );
        assert_eq!(got["contact us"], "https://memy.co.in/pages/contact-footer");
    }
}
