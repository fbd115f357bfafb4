//! Markup serialization as a pull-based chunk stream

use std::fmt::Write;

use crate::node::{AttrValue, Element, Node};

use super::escape::{escape_attr, escape_comment, escape_raw_text, escape_text};
use super::HtmlConfig;

enum Frame<'a> {
    Node(&'a Node),
    RawText(&'a Element),
    Close(&'a str),
}

/// Iterator over the serialized chunks of a node tree.
///
/// Each element yields its open tag, the chunks of its children and its close
/// tag separately; concatenating every chunk gives the full markup.
pub struct Chunks<'a> {
    stack: Vec<Frame<'a>>,
    config: HtmlConfig,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Node, config: HtmlConfig) -> Self {
        Self {
            stack: vec![Frame::Node(root)],
            config,
        }
    }

    fn push_children(&mut self, children: &'a [Node]) {
        self.stack.extend(children.iter().rev().map(Frame::Node));
    }

    fn open_tag(&self, el: &Element) -> String {
        let mut out = String::with_capacity(el.tag.len() + 2);
        out.push('<');
        out.push_str(&el.tag);
        write_attributes(&mut out, el);
        if el.is_void() && self.config.self_closing_void {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            match self.stack.pop()? {
                Frame::Close(tag) => return Some(format!("</{}>", tag)),
                Frame::RawText(el) => {
                    // joined before escaping so no close tag can span two children
                    let body: String = el
                        .children
                        .iter()
                        .map(|child| match child {
                            Node::Text(text) | Node::Safe(text) => text.as_str(),
                            // resolution only lets text into raw-text elements
                            _ => "",
                        })
                        .collect();
                    return Some(escape_raw_text(&el.tag, &body));
                }
                Frame::Node(node) => match node {
                    Node::Text(text) => return Some(escape_text(text).into_owned()),
                    Node::Safe(markup) => return Some(markup.clone()),
                    Node::Comment(text) => return Some(format!("<!--{}-->", escape_comment(text))),
                    Node::Doctype(text) => return Some(format!("<!DOCTYPE {}>", text)),
                    Node::Fragment(children) => self.push_children(children),
                    Node::Element(el) => {
                        let open = self.open_tag(el);
                        if el.is_void() {
                            return Some(open);
                        }
                        self.stack.push(Frame::Close(&el.tag));
                        if el.is_raw_text() {
                            if !el.children.is_empty() {
                                self.stack.push(Frame::RawText(el));
                            }
                        } else {
                            self.push_children(&el.children);
                        }
                        return Some(open);
                    }
                },
            }
        }
    }
}

fn write_attributes(out: &mut String, el: &Element) {
    for (name, value) in &el.attrs {
        // writing into a String cannot fail
        let _ = match value {
            AttrValue::Flag => write!(out, " {}", name),
            AttrValue::Text(text) => write!(out, " {}=\"{}\"", name, escape_attr(text)),
            AttrValue::Safe(markup) => write!(out, " {}=\"{}\"", name, markup),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunks(node: &Node) -> Vec<String> {
        node.chunks().collect()
    }

    #[test]
    fn test_element_chunks() {
        let node: Node = Element::new("div")
            .with_attr("id", "main")
            .with_child(Node::text("Hello"))
            .into();
        assert_eq!(chunks(&node), vec![r#"<div id="main">"#, "Hello", "</div>"]);
    }

    #[test]
    fn test_empty_element_yields_open_and_close() {
        let node: Node = Element::new("rect").into();
        assert_eq!(chunks(&node), vec!["<rect>", "</rect>"]);
        assert_eq!(node.to_string(), "<rect></rect>");
    }

    #[test]
    fn test_void_element_single_chunk() {
        let node: Node = Element::new("br").with_attr("class", "break").into();
        assert_eq!(chunks(&node), vec![r#"<br class="break" />"#]);
    }

    #[test]
    fn test_void_element_html_style() {
        let node: Node = Element::new("hr").into();
        assert_eq!(node.render(HtmlConfig::new().with_self_closing_void(false)), "<hr>");
    }

    #[test]
    fn test_raw_text_single_chunk() {
        let node: Node = Element::new("script")
            .with_child(Node::text("if (a < b) { go('</script>'); }"))
            .into();
        assert_eq!(
            chunks(&node),
            vec!["<script>", "if (a < b) { go('<\\/script>'); }", "</script>"]
        );
    }

    #[test]
    fn test_raw_text_close_split_across_children() {
        let node: Node = Element::new("script")
            .with_child(Node::safe("var s = '<"))
            .with_child(Node::text("/script><b>';"))
            .into();
        assert_eq!(node.to_string(), r"<script>var s = '<\/script><b>';</script>");
    }

    #[test]
    fn test_attribute_escaping() {
        let mut el = Element::new("a").with_attr("title", r#"say "hi" & bye"#);
        el.attrs
            .insert("data-raw".to_string(), AttrValue::Safe("&amp;".to_string()));
        assert_eq!(
            Node::from(el).to_string(),
            r#"<a title="say &quot;hi&quot; &amp; bye" data-raw="&amp;"></a>"#
        );
    }

    #[test]
    fn test_nested_fragments_are_transparent() {
        let node: Node = Element::new("ul")
            .with_child(Element::new("li").with_child(Node::text("A")))
            .into();
        let wrapped = Node::fragment([Node::fragment([node]), Node::text("!")]);
        assert_eq!(chunks(&wrapped), vec!["<ul>", "<li>", "A", "</li>", "</ul>", "!"]);
    }
}
