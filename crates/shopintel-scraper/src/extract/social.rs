use scraper::{Html, Selector};
use shopintel_core::{Platform, SocialHandle};

use crate::client::StoreUrl;

/// `a[href*='instagram.com'], a[href*='facebook.com'], a[href*='tiktok.com']`
pub(super) fn anchor_selector() -> String {
    Platform::ALL
        .iter()
        .map(|p| format!("a[href*='{}']", p.domain()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Platform for an href already known to contain one of the platform domains.
///
/// Checked in [`Platform::ALL`] order; anything that is neither Instagram nor
/// Facebook is classified as TikTok.
#[must_use]
pub fn classify_platform(href: &str) -> Platform {
    if href.contains(Platform::Instagram.domain()) {
        Platform::Instagram
    } else if href.contains(Platform::Facebook.domain()) {
        Platform::Facebook
    } else {
        Platform::Tiktok
    }
}

/// Social profile links found anywhere on the page, in document order.
#[must_use]
pub fn social_handles(doc: &Html, root: &StoreUrl, anchors: &Selector) -> Vec<SocialHandle> {
    doc.select(anchors)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let url = root.resolve(href)?;
            Some(SocialHandle {
                platform: classify_platform(href),
                url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CompiledSelectors;

    #[test]
    fn selector_lists_every_platform() {
        assert_eq!(
            anchor_selector(),
            "a[href*='instagram.com'], a[href*='facebook.com'], a[href*='tiktok.com']"
        );
    }

    #[test]
    fn classifies_in_priority_order() {
        assert_eq!(
            classify_platform("https://www.instagram.com/memy"),
            Platform::Instagram
        );
        assert_eq!(
            classify_platform("https://www.facebook.com/memy"),
            Platform::Facebook
        );
        assert_eq!(
            classify_platform("https://www.tiktok.com/@memy"),
            Platform::Tiktok
        );
        // A share link mentioning both goes to the higher-priority platform.
        assert_eq!(
            classify_platform("https://facebook.com/sharer?u=https://instagram.com/p/1"),
            Platform::Instagram
        );
    }

    #[test]
    fn extracts_handles_in_document_order() {
        let root = StoreUrl::parse("https://memy.co.in").unwrap();
        let doc = Html::parse_document(
            r#"<footer>
                 <a href="https://www.facebook.com/memy">fb</a>
                 <a href="https://twitter.com/memy">x</a>
                 <a href="//www.instagram.com/memy">ig</a>
                 <a href="https://www.tiktok.com/@memy">tt</a>
               </footer>"#,
        );
        let sel = CompiledSelectors::default();
        let handles = social_handles(&doc, &root, &sel.social);
        let got: Vec<_> = handles
            .iter()
            .map(|h| (h.platform, h.url.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                (Platform::Facebook, "https://www.facebook.com/memy"),
                (Platform::Instagram, "https://www.instagram.com/memy"),
                (Platform::Tiktok, "https://www.tiktok.com/@memy"),
            ]
        );
    }
}
