use ego_tree::NodeRef;
use scraper::Html;

use crate::classify::is_full_document;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::EngineError;

/// Owned markup tree node. Comments, doctypes and processing instructions are
/// not represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with a lower-case tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Descendant text in document order, trimmed at both ends.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in Descendants::new(&self.children) {
            if let Node::Text(content) = node {
                text.push_str(content);
            }
        }
        text.trim().to_string()
    }
}

/// A parsed paste. Lives for one conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDocument {
    pub nodes: Vec<Node>,
}

impl ParsedDocument {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Elements in document (pre-)order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        Descendants::new(&self.nodes).filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|element| element.tag == tag)
    }
}

/// Pre-order walk with an explicit stack, so traversal depth is not bounded by
/// the call stack.
struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Descendants<'a> {
    fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Element(element) = node {
            self.stack.extend(element.children.iter().rev());
        }
        Some(node)
    }
}

/// Turns raw markup into a [`ParsedDocument`]. Implementations must not panic
/// on malformed input; a best-effort tree is expected.
pub trait HtmlParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, EngineError>;
}

/// html5ever-backed parser (through `scraper`).
///
/// Full documents are parsed with document semantics, everything else as a
/// body fragment. Trees deeper than `max_depth` are rejected.
#[derive(Debug, Clone, Copy)]
pub struct ScraperParser {
    max_depth: usize,
}

impl ScraperParser {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for ScraperParser {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl HtmlParser for ScraperParser {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, EngineError> {
        let full_document = is_full_document(raw);
        let html = if full_document {
            Html::parse_document(raw)
        } else {
            Html::parse_fragment(raw)
        };

        let mut nodes = Vec::new();
        for child in html.tree.root().children() {
            lower_into(child, 1, self.max_depth, &mut nodes)?;
        }

        let document = ParsedDocument::new(nodes);
        // html5ever synthesizes the document shell even for plain text. A shell
        // the paste wrote itself is real markup, even around a text-only body.
        let has_markup = full_document
            || document
                .elements()
                .any(|element| !matches!(element.tag.as_str(), "html" | "head" | "body"));
        if !has_markup {
            return Err(EngineError::NoMarkup);
        }
        Ok(document)
    }
}

fn lower_into(
    node: NodeRef<'_, scraper::Node>,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Node>,
) -> Result<(), EngineError> {
    if depth > max_depth {
        return Err(EngineError::TooDeep { max_depth });
    }
    match node.value() {
        scraper::Node::Text(text) => {
            let content: &str = text;
            out.push(Node::Text(content.to_string()));
        }
        scraper::Node::Element(element) => {
            let mut lowered = Element::new(element.name().to_ascii_lowercase());
            lowered.attrs = element
                .attrs()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect();
            for child in node.children() {
                lower_into(child, depth + 1, max_depth, &mut lowered.children)?;
            }
            out.push(Node::Element(lowered));
        }
        scraper::Node::Document | scraper::Node::Fragment => {
            for child in node.children() {
                lower_into(child, depth, max_depth, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}
