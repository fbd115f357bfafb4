//! Resolved node tree
//!
//! A [`Node`] tree is the output of resolution. It never contains component
//! calls; converting it to a string (via `Display`) yields the rendered markup.

use std::fmt;

use indexmap::IndexMap;

use crate::renderer::{Chunks, HtmlConfig};

/// Elements that never have children and are emitted without a closing tag.
///
/// See <https://developer.mozilla.org/en-US/docs/Glossary/Void_element>
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose body is raw text rather than markup.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// A node in a resolved tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with a tag name, attributes and children
    Element(Element),
    /// Text content, escaped when serialized
    Text(String),
    /// Trusted markup, emitted verbatim
    Safe(String),
    /// A sequence of nodes with no wrapping tag
    Fragment(Vec<Node>),
    /// `<!--...-->`
    Comment(String),
    /// `<!DOCTYPE ...>`
    Doctype(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn safe(markup: impl Into<String>) -> Self {
        Node::Safe(markup.into())
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Fragment(children.into_iter().collect())
    }

    /// Stream the serialized markup as a sequence of chunks
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self, HtmlConfig::default())
    }

    /// Stream the serialized markup with a custom output configuration
    pub fn chunks_with(&self, config: HtmlConfig) -> Chunks<'_> {
        Chunks::new(self, config)
    }

    /// Serialize with a custom output configuration
    pub fn render(&self, config: HtmlConfig) -> String {
        self.chunks_with(config).collect()
    }

    /// Get the element if this node is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Append this node to `out`, splicing fragments into the list
    pub(crate) fn flatten_into(self, out: &mut Vec<Node>) {
        match self {
            Node::Fragment(children) => {
                for child in children {
                    child.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(&chunk)?;
        }
        Ok(())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An attribute value on a resolved element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Plain text, escaped for attribute context when serialized
    Text(String),
    /// Pre-sanitized value, emitted verbatim inside the quotes
    Safe(String),
    /// Boolean attribute, emitted as a bare name
    Flag,
}

/// An HTML or SVG element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: IndexMap<String, AttrValue>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set a text attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::Text(value.into()));
        self
    }

    /// Set a boolean attribute
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), AttrValue::Flag);
        self
    }

    /// Append a child node
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        child.into().flatten_into(&mut self.children);
        self
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    pub fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.contains(&self.tag.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(Node::text("a < b & c").to_string(), "a &lt; b &amp; c");
    }

    #[test]
    fn test_safe_is_verbatim() {
        assert_eq!(Node::safe("<b>&</b>").to_string(), "<b>&</b>");
    }

    #[test]
    fn test_fragment_has_no_wrapper() {
        let node = Node::fragment([Node::text("a"), Element::new("br").into(), Node::text("b")]);
        assert_eq!(node.to_string(), "a<br />b");
    }

    #[test]
    fn test_element_builder() {
        let el = Element::new("input").with_attr("type", "checkbox").with_flag("checked");
        assert_eq!(Node::from(el).to_string(), r#"<input type="checkbox" checked />"#);
    }

    #[test]
    fn test_with_child_flattens_fragments() {
        let el = Element::new("ul").with_child(Node::fragment([
            Element::new("li").with_child(Node::text("a")).into(),
            Node::fragment([Element::new("li").with_child(Node::text("b")).into()]),
        ]));
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn test_comment_and_doctype() {
        let node = Node::fragment([
            Node::Doctype("html".to_string()),
            Node::Comment(" note ".to_string()),
        ]);
        assert_eq!(node.to_string(), "<!DOCTYPE html><!-- note -->");
    }
}
