use std::borrow::Cow;

use url::Url;

use crate::config::OutputPolicy;
use crate::document::{Element, Node, ParsedDocument};

const DEFAULT_ALT: &str = "Image";

/// How the normalizer treats one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
    /// Dropped together with its children.
    Suppress,
    /// Tag dropped, children kept.
    Unwrap,
    /// Re-emitted under the given name when the children are non-empty.
    Preserve(&'static str),
    /// `<a href>` when both the link and its text survive, else the text only.
    Anchor,
    /// `<img src alt>` when `src` survives, else nothing.
    Image,
    /// Void element, children ignored.
    Void(&'static str),
}

const SUPPRESSED: &[&str] = &["style", "script", "meta", "head", "title"];

const UNWRAPPED: &[&str] = &[
    "div", "section", "article", "main", "body", "header", "footer", "span",
];

// (input tag, emitted tag)
const PRESERVED: &[(&str, &str)] = &[
    ("h1", "h1"),
    ("h2", "h2"),
    ("h3", "h3"),
    ("h4", "h4"),
    ("h5", "h5"),
    ("h6", "h6"),
    ("p", "p"),
    ("li", "li"),
    ("ul", "ul"),
    ("ol", "ol"),
    ("blockquote", "blockquote"),
    ("strong", "strong"),
    ("b", "strong"),
    ("em", "em"),
    ("i", "em"),
    ("code", "code"),
    ("pre", "pre"),
    ("table", "table"),
    ("thead", "thead"),
    ("tbody", "tbody"),
    ("tr", "tr"),
    ("td", "td"),
    ("th", "th"),
];

const VOID: &[&str] = &["br", "hr"];

/// Looks up the policy for a lower-case tag name. Unknown tags unwrap, so
/// their text is never lost.
pub fn tag_policy(tag: &str) -> TagPolicy {
    if SUPPRESSED.contains(&tag) {
        return TagPolicy::Suppress;
    }
    if UNWRAPPED.contains(&tag) {
        return TagPolicy::Unwrap;
    }
    if let Some((_, emitted)) = PRESERVED.iter().find(|(name, _)| *name == tag) {
        return TagPolicy::Preserve(*emitted);
    }
    if let Some(void) = VOID.iter().find(|name| **name == tag) {
        return TagPolicy::Void(*void);
    }
    match tag {
        "a" => TagPolicy::Anchor,
        "img" => TagPolicy::Image,
        _ => TagPolicy::Unwrap,
    }
}

/// Output of one subtree, plus whether the source had whitespace at its edges.
#[derive(Debug, Default)]
struct Rendered {
    html: String,
    space_before: bool,
    space_after: bool,
}

impl Rendered {
    fn tight(html: String) -> Self {
        Self {
            html,
            space_before: false,
            space_after: false,
        }
    }

    /// Wraps non-empty content; empty content stays empty so the element is
    /// dropped, but its whitespace still separates the neighbours.
    fn wrap(self, wrapper: impl FnOnce(&str) -> String) -> Self {
        if self.html.is_empty() {
            return self;
        }
        Self {
            html: wrapper(&self.html),
            ..self
        }
    }
}

/// Rewrites a parsed tree into the restricted vocabulary.
///
/// Output is not whitespace-canonical; run it through
/// [`crate::canonicalize`] before storing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    policy: OutputPolicy,
}

impl Normalizer {
    pub fn new(policy: OutputPolicy) -> Self {
        Self { policy }
    }

    pub fn normalize(&self, document: &ParsedDocument) -> String {
        self.render_nodes(&document.nodes).html
    }

    // Siblings are joined with one space only where the source had whitespace
    // at the boundary, so `un<em>believ</em>able` stays one word.
    fn render_nodes(&self, nodes: &[Node]) -> Rendered {
        let mut out = Rendered::default();
        let mut pending_space = false;
        for node in nodes {
            let piece = self.render_node(node);
            if piece.html.is_empty() {
                pending_space |= piece.space_before || piece.space_after;
                continue;
            }
            if out.html.is_empty() {
                out.space_before = pending_space || piece.space_before;
            } else if pending_space || piece.space_before {
                out.html.push(' ');
            }
            out.html.push_str(&piece.html);
            pending_space = piece.space_after;
        }
        if out.html.is_empty() {
            out.space_before = pending_space;
        }
        out.space_after = pending_space;
        out
    }

    fn render_node(&self, node: &Node) -> Rendered {
        match node {
            Node::Text(text) => {
                let trimmed = text.trim();
                Rendered {
                    html: self.text(trimmed).into_owned(),
                    space_before: text.starts_with(char::is_whitespace),
                    space_after: text.ends_with(char::is_whitespace),
                }
            }
            Node::Element(element) => self.render_element(element),
        }
    }

    fn render_element(&self, element: &Element) -> Rendered {
        match tag_policy(&element.tag) {
            TagPolicy::Suppress => Rendered::default(),
            TagPolicy::Unwrap => self.render_nodes(&element.children),
            TagPolicy::Preserve(tag) => {
                let inner = self.render_nodes(&element.children);
                inner.wrap(|html| format!("<{tag}>{html}</{tag}>"))
            }
            TagPolicy::Anchor => {
                let inner = self.render_nodes(&element.children);
                match self.url_attr(element, "href", false) {
                    Some(href) => inner.wrap(|html| format!(r#"<a href="{href}">{html}</a>"#)),
                    None => inner,
                }
            }
            TagPolicy::Image => match self.url_attr(element, "src", true) {
                Some(src) => {
                    let alt = element
                        .attr("alt")
                        .map(str::trim)
                        .filter(|alt| !alt.is_empty())
                        .unwrap_or(DEFAULT_ALT);
                    Rendered::tight(format!(r#"<img src="{src}" alt="{}">"#, self.attr_value(alt)))
                }
                None => Rendered::default(),
            },
            TagPolicy::Void(tag) => Rendered::tight(format!("<{tag}>")),
        }
    }

    fn url_attr(&self, element: &Element, name: &str, allow_data_image: bool) -> Option<String> {
        let value = element.attr(name).map(str::trim).filter(|v| !v.is_empty())?;
        if self.policy.sanitize_urls && is_unsafe_url(value, allow_data_image) {
            return None;
        }
        Some(self.attr_value(value).into_owned())
    }

    fn text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.policy.escape_text {
            html_escape::encode_text(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    fn attr_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if self.policy.escape_text {
            html_escape::encode_double_quoted_attribute(value)
        } else {
            Cow::Borrowed(value)
        }
    }
}

/// Script-capable schemes. Relative references never parse as absolute URLs
/// and are always accepted.
fn is_unsafe_url(value: &str, allow_data_image: bool) -> bool {
    let Ok(url) = Url::parse(value) else {
        return false;
    };
    match url.scheme() {
        "javascript" | "vbscript" => true,
        "data" => !(allow_data_image && url.path().to_ascii_lowercase().starts_with("image/")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_unsafe_url, tag_policy, Normalizer, TagPolicy};
    use crate::document::{Element, Node, ParsedDocument};

    fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    fn element(tag: &str, children: Vec<Node>) -> Node {
        Node::Element(children.into_iter().fold(Element::new(tag), Element::with_child))
    }

    #[test]
    fn siblings_join_only_on_source_whitespace() {
        let doc = ParsedDocument::new(vec![element(
            "p",
            vec![
                text("un"),
                element("i", vec![text("believ")]),
                text("able "),
                element("b", vec![text("x")]),
            ],
        )]);
        assert_eq!(
            Normalizer::default().normalize(&doc),
            "<p>un<em>believ</em>able <strong>x</strong></p>"
        );
    }

    #[test]
    fn dropped_elements_still_separate_words() {
        let doc = ParsedDocument::new(vec![element(
            "p",
            vec![text("a"), element("script", vec![text("x()")]), text(" b")],
        )]);
        assert_eq!(Normalizer::default().normalize(&doc), "<p>a b</p>");
    }

    #[test]
    fn document_chrome_is_suppressed() {
        for tag in ["style", "script", "meta", "head", "title"] {
            assert_eq!(tag_policy(tag), TagPolicy::Suppress, "{tag}");
        }
    }

    #[test]
    fn structural_wrappers_unwrap() {
        for tag in ["div", "section", "article", "main", "body", "header", "footer", "span"] {
            assert_eq!(tag_policy(tag), TagPolicy::Unwrap, "{tag}");
        }
    }

    #[test]
    fn presentational_tags_map_to_semantic_ones() {
        assert_eq!(tag_policy("b"), TagPolicy::Preserve("strong"));
        assert_eq!(tag_policy("i"), TagPolicy::Preserve("em"));
        assert_eq!(tag_policy("h4"), TagPolicy::Preserve("h4"));
        assert_eq!(tag_policy("td"), TagPolicy::Preserve("td"));
    }

    #[test]
    fn attribute_and_void_entries() {
        assert_eq!(tag_policy("a"), TagPolicy::Anchor);
        assert_eq!(tag_policy("img"), TagPolicy::Image);
        assert_eq!(tag_policy("br"), TagPolicy::Void("br"));
        assert_eq!(tag_policy("hr"), TagPolicy::Void("hr"));
    }

    #[test]
    fn unknown_tags_unwrap() {
        assert_eq!(tag_policy("nav"), TagPolicy::Unwrap);
        assert_eq!(tag_policy("custom-widget"), TagPolicy::Unwrap);
    }

    #[test]
    fn script_schemes_are_unsafe() {
        assert!(is_unsafe_url("javascript:alert(1)", false));
        assert!(is_unsafe_url("JavaScript:alert(1)", false));
        assert!(is_unsafe_url("vbscript:msgbox", false));
        assert!(is_unsafe_url("data:text/html,<p>x</p>", true));
    }

    #[test]
    fn ordinary_urls_are_safe() {
        assert!(!is_unsafe_url("https://x.com/a?b=c", false));
        assert!(!is_unsafe_url("/relative/path", false));
        assert!(!is_unsafe_url("mailto:a@b.c", false));
        assert!(!is_unsafe_url("data:image/png;base64,AAAA", true));
        assert!(is_unsafe_url("data:image/png;base64,AAAA", false));
    }
}
