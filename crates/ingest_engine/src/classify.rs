use std::sync::LazyLock;

use regex::Regex;

use crate::config::ClassifierThresholds;

static TAG_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile tag regex - this is a bug"));

const DOCUMENT_MARKERS: &[&str] = &["<!doctype", "<html", "<body", "<head"];
const META_MARKERS: &[&str] = &["<meta", "<title"];
const BLOCK_MARKERS: &[&str] = &["<div", "<section", "<article"];
const LANDMARK_MARKERS: &[&str] = &["<header>", "<footer>", "<main>"];

/// Every signal the classifier looked at, for callers that want to explain
/// a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub looks_like_html: bool,
    pub is_full_document: bool,
    pub has_meta_signals: bool,
    pub has_block_containers: bool,
    pub has_semantic_landmarks: bool,
    pub is_large: bool,
    pub tag_count: usize,
}

impl Classification {
    pub fn should_auto_convert(&self) -> bool {
        self.looks_like_html
            && (self.is_full_document
                || self.has_meta_signals
                || self.has_block_containers
                || self.has_semantic_landmarks
                || self.is_large)
    }
}

/// Decides from the raw text alone whether a paste looks like a whole page
/// (or a sizeable structured fragment) rather than a hand-typed snippet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    thresholds: ClassifierThresholds,
}

impl Classifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, raw: &str) -> Classification {
        let tag_count = TAG_SHAPE.find_iter(raw).count();
        let looks_like_html = tag_count > 0;
        if !looks_like_html {
            return Classification::default();
        }

        let lower = raw.to_ascii_lowercase();
        let contains_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

        Classification {
            looks_like_html,
            is_full_document: contains_any(DOCUMENT_MARKERS),
            has_meta_signals: contains_any(META_MARKERS),
            has_block_containers: contains_any(BLOCK_MARKERS),
            has_semantic_landmarks: contains_any(LANDMARK_MARKERS),
            is_large: raw.chars().count() > self.thresholds.min_length
                && tag_count > self.thresholds.min_tag_count,
            tag_count,
        }
    }

    pub fn should_auto_convert(&self, raw: &str) -> bool {
        self.classify(raw).should_auto_convert()
    }
}

/// Document-shell markers, case-insensitive. Also picks the parse mode.
pub(crate) fn is_full_document(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    DOCUMENT_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::{is_full_document, Classifier};
    use crate::config::ClassifierThresholds;

    #[test]
    fn short_inline_snippet_is_left_alone() {
        let classifier = Classifier::default();
        assert!(!classifier.should_auto_convert("<b>hi</b>"));
        assert!(!classifier.should_auto_convert("<p>one</p><p>two</p>"));
    }

    #[test]
    fn full_document_converts() {
        let html = "<!DOCTYPE html><html><body><p>x</p></body></html>";
        assert!(Classifier::default().should_auto_convert(html));
    }

    #[test]
    fn plain_text_never_converts() {
        let classifier = Classifier::default();
        assert!(!classifier.should_auto_convert(""));
        assert!(!classifier.should_auto_convert("<html without a closing bracket"));
        assert!(!classifier.classify("a < b").looks_like_html);
    }

    #[test]
    fn each_structural_signal_is_enough() {
        let classifier = Classifier::default();
        assert!(classifier.should_auto_convert("<title>x</title>"));
        assert!(classifier.should_auto_convert("<div>x</div>"));
        assert!(classifier.should_auto_convert("<ARTICLE>x</ARTICLE>"));
        assert!(classifier.should_auto_convert("<main>x</main>"));
    }

    #[test]
    fn large_fragment_needs_length_and_tag_count() {
        let classifier = Classifier::default();
        let many_tags = "<p>word</p>".repeat(60);
        assert!(classifier.classify(&many_tags).is_large);
        assert!(classifier.should_auto_convert(&many_tags));

        let long_but_few_tags = format!("<p>{}</p>", "word ".repeat(200));
        assert!(!classifier.classify(&long_but_few_tags).is_large);
        assert!(!classifier.should_auto_convert(&long_but_few_tags));
    }

    #[test]
    fn thresholds_are_configurable() {
        let classifier = Classifier::new(ClassifierThresholds {
            min_length: 10,
            min_tag_count: 2,
        });
        assert!(classifier.should_auto_convert("<p>a</p><p>b</p><p>c</p>"));
    }

    #[test]
    fn document_markers_ignore_case() {
        assert!(is_full_document("<!doctype html><p>x</p>"));
        assert!(is_full_document("<HTML><p>x</p></HTML>"));
        assert!(!is_full_document("<p>x</p>"));
    }
}
