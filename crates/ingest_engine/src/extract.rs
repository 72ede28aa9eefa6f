use ingest_core::ExtractedMetadata;

use crate::config::DEFAULT_EXCERPT_CHARS;
use crate::document::ParsedDocument;

const TRUNCATED_MARKER: &str = "...";

pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, document: &ParsedDocument) -> ExtractedMetadata;
}

/// Prioritized-source extractor. Each field takes the first source that
/// yields a non-empty value:
/// - title: `<title>`, `<h1>`, `<h2>`
/// - meta title: `og:title`, `name=title`
/// - meta description: `name=description`, `og:description`
/// - featured image: `og:image`, `name=image`, first `<img src>`
/// - tags: `name=keywords`, comma separated
/// - excerpt: meta description, else the first `<p>` cut to `max_excerpt_chars`
#[derive(Debug, Clone, Copy)]
pub struct SignalExtractor {
    max_excerpt_chars: usize,
}

impl SignalExtractor {
    pub fn new(max_excerpt_chars: usize) -> Self {
        Self { max_excerpt_chars }
    }
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_CHARS)
    }
}

impl MetadataExtractor for SignalExtractor {
    fn extract(&self, document: &ParsedDocument) -> ExtractedMetadata {
        let title = first_text(document, "title")
            .or_else(|| first_text(document, "h1"))
            .or_else(|| first_text(document, "h2"));

        let meta_description = meta_content(document, "name", "description")
            .or_else(|| meta_content(document, "property", "og:description"));

        let meta_title = meta_content(document, "property", "og:title")
            .or_else(|| meta_content(document, "name", "title"));

        let featured_image = meta_content(document, "property", "og:image")
            .or_else(|| meta_content(document, "name", "image"))
            .or_else(|| first_image_src(document));

        let excerpt = meta_description.clone().or_else(|| {
            first_text(document, "p").map(|text| truncate_chars(text, self.max_excerpt_chars))
        });

        let mut metadata = ExtractedMetadata {
            title,
            meta_title,
            meta_description,
            excerpt,
            featured_image,
            tags: Vec::new(),
        };
        if let Some(keywords) = meta_content(document, "name", "keywords") {
            metadata.set_tags(keywords.split(','));
        }
        metadata
    }
}

/// Text of the first `tag` element; empty text counts as absent.
fn first_text(document: &ParsedDocument, tag: &str) -> Option<String> {
    document
        .find(tag)
        .map(|element| element.text())
        .filter(|text| !text.is_empty())
}

fn meta_content(document: &ParsedDocument, key: &str, value: &str) -> Option<String> {
    document
        .elements()
        .filter(|element| element.tag == "meta")
        .filter(|element| {
            element
                .attr(key)
                .is_some_and(|found| found.trim().eq_ignore_ascii_case(value))
        })
        .find_map(|element| non_empty(element.attr("content")))
}

fn first_image_src(document: &ParsedDocument) -> Option<String> {
    document
        .elements()
        .filter(|element| element.tag == "img")
        .find_map(|element| non_empty(element.attr("src")))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{TRUNCATED_MARKER}", &text[..end]),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn short_text_is_not_marked() {
        assert_eq!(truncate_chars("hello".to_string(), 5), "hello");
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        assert_eq!(truncate_chars("héllo wörld".to_string(), 4), "héll...");
    }
}
