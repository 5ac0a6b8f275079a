use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shopintel_core::ContactDetail;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});
// Bare 10-digit number, or a 1-3 digit international prefix followed by 10 digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{10}\b|\+\d{1,3}\s?\d{10}\b").expect("valid phone regex")
});

const HIDDEN_TEXT_PARENTS: [&str; 3] = ["script", "style", "noscript"];

/// Emails and phone numbers from the page's visible text.
#[must_use]
pub fn contact_details(doc: &Html) -> ContactDetail {
    contact_details_from_text(&visible_text(doc))
}

/// Emails and phone numbers matched in `text`, in order of appearance.
///
/// Matches are shape-only; nothing is deduplicated or validated further.
#[must_use]
pub fn contact_details_from_text(text: &str) -> ContactDetail {
    ContactDetail {
        emails: EMAIL_RE
            .find_iter(text)
            .map(|m| m.as_str().to_owned())
            .collect(),
        phone_numbers: PHONE_RE
            .find_iter(text)
            .map(|m| m.as_str().to_owned())
            .collect(),
    }
}

/// All text nodes outside `script`/`style`/`noscript`, trimmed and joined
/// with single spaces so adjacent elements do not fuse into one token.
fn visible_text(doc: &Html) -> String {
    doc.root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_TEXT_PARENTS.contains(&el.name()))
            });
            let trimmed = text.trim();
            (!hidden && !trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
