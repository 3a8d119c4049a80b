//! Markup parsing into a queryable document tree.
//!
//! Parsing is lenient per standard HTML5 error recovery — broken markup
//! still yields a tree. Note that `scraper` types are `!Send`; a
//! [`ParsedDocument`] must stay inside one synchronous stretch of the
//! pipeline and never be held across an await point.

use crate::error::{ScanError, ScanResult};
use scraper::Html;

/// An in-memory document tree derived from exactly one fetch result.
/// Discarded after classification.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    pub(crate) fn html(&self) -> &Html {
        &self.html
    }
}

/// Parse raw markup into a [`ParsedDocument`].
///
/// Only catastrophic input raises [`ScanError::Parse`]: the HTML5 parser
/// recovers from malformed markup, so the sole hard failure is markup with
/// no text at all.
pub fn parse(markup: &str) -> ScanResult<ParsedDocument> {
    if markup.trim().is_empty() {
        return Err(ScanError::Parse("empty markup".into()));
    }
    Ok(ParsedDocument {
        html: Html::parse_document(markup),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_markup_rejected() {
        assert!(matches!(parse(""), Err(ScanError::Parse(_))));
        assert!(matches!(parse("   \n\t"), Err(ScanError::Parse(_))));
    }

    #[test]
    fn test_malformed_markup_recovers() {
        // Unclosed tags still produce a queryable tree
        let doc = parse(r#"<div><p>hello<div><input type="password">"#).unwrap();
        let sel = scraper::Selector::parse("input").unwrap();
        assert!(doc.html().select(&sel).next().is_some());
    }

    #[test]
    fn test_plain_text_parses() {
        // Bare text is wrapped in an implied html/body tree
        let doc = parse("just some text").unwrap();
        let root = doc.html().root_element();
        assert_eq!(root.value().name(), "html");
    }
}
