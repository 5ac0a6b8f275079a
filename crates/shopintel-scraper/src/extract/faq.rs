use scraper::Html;
use shopintel_core::Faq;

use super::{element_text, FaqSelectors};

/// Question/answer pairs from the FAQ page.
///
/// A container yields a FAQ only when it has both a question and an answer
/// element; partial containers are skipped.
#[must_use]
pub fn faqs(doc: &Html, sel: &FaqSelectors) -> Vec<Faq> {
    doc.select(&sel.item)
        .filter_map(|item| {
            let question = item.select(&sel.question).next()?;
            let answer = item.select(&sel.answer).next()?;
            Some(Faq {
                question: element_text(question),
                answer: element_text(answer),
            })
        })
        .collect()
}
