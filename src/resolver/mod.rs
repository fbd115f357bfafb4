//! Resolution engine
//!
//! Walks a provisional tree depth-first and produces a final [`Node`] tree
//! with no component calls left in it. The children of a call are resolved
//! before the call itself, so a component only ever sees finished nodes.

mod error;
mod normalize;

pub use error::{BindingError, NormalizationError, Origin};

use indexmap::IndexMap;
use tracing::trace;

use crate::node::{AttrValue, Element, Node};
use crate::parser::{self, ComponentCall, TAttr, TNode, TPart};
use crate::template::{Template, Value};
use crate::{RenderConfig, RenderError};

use normalize::{attribute_value, comment_text};

pub(crate) struct Resolver {
    config: RenderConfig,
}

impl Resolver {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Parse and resolve a template.
    ///
    /// A single root node is returned as-is; several roots come back as a
    /// fragment.
    pub fn resolve(&self, template: Template) -> Result<Node, RenderError> {
        let tree = parser::parse(template, &self.config)?;
        let mut nodes = self.resolve_children(tree)?;
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return Ok(node);
            }
        }
        Ok(Node::Fragment(nodes))
    }

    /// Resolve sibling nodes, splicing fragments into the list
    fn resolve_children(&self, nodes: Vec<TNode>) -> Result<Vec<Node>, RenderError> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.resolve_node(node)?.flatten_into(&mut out);
        }
        Ok(out)
    }

    fn resolve_node(&self, node: TNode) -> Result<Node, RenderError> {
        match node {
            // literal markup is trusted and keeps its written form
            TNode::Text(text) => Ok(Node::Safe(text)),
            TNode::Doctype(doctype) => Ok(Node::Doctype(doctype)),
            TNode::Comment(parts) => resolve_comment(parts),
            TNode::Value { value, expression } => {
                self.normalize(value, &Origin::Interpolation(expression))
            }
            TNode::Element {
                tag,
                attrs,
                children,
            } => self.resolve_element(tag, attrs, children),
            TNode::Call(call) => self.resolve_call(call),
        }
    }

    fn resolve_call(&self, call: ComponentCall) -> Result<Node, RenderError> {
        let children = self.resolve_children(call.children)?;
        match call.target {
            Value::Component(component) => {
                let result = component.invoke(call.props, children)?;
                self.normalize(result, &Origin::Component(component.name().to_string()))
            }
            target => {
                if !call.props.is_empty() || !children.is_empty() {
                    trace!(
                        expression = %call.expression,
                        props = call.props.len(),
                        children = children.len(),
                        "discarding props and children of a non-callable tag"
                    );
                }
                self.normalize(target, &Origin::Interpolation(call.expression))
            }
        }
    }

    fn resolve_element(
        &self,
        tag: String,
        attrs: IndexMap<String, TAttr>,
        children: Vec<TNode>,
    ) -> Result<Node, RenderError> {
        let mut resolved = IndexMap::with_capacity(attrs.len());
        for (name, attr) in attrs {
            let value = match attr {
                TAttr::Text(text) => Some(AttrValue::Safe(text.replace('"', "&quot;"))),
                TAttr::Flag => Some(AttrValue::Flag),
                TAttr::Dynamic(value) => attribute_value(&name, value)?,
            };
            if let Some(value) = value {
                resolved.insert(name, value);
            }
        }

        let element = Element {
            tag,
            attrs: resolved,
            children: self.resolve_children(children)?,
        };

        if element.is_raw_text() {
            let misplaced = element
                .children
                .iter()
                .find(|child| !matches!(child, Node::Text(_) | Node::Safe(_)));
            if let Some(child) = misplaced {
                return Err(NormalizationError::RawTextContent {
                    tag: element.tag.clone(),
                    kind: node_kind(child),
                }
                .into());
            }
        }
        Ok(Node::Element(element))
    }
}

fn resolve_comment(parts: Vec<TPart>) -> Result<Node, RenderError> {
    let mut text = String::new();
    for part in parts {
        match part {
            TPart::Text(literal) => text.push_str(&literal),
            TPart::Value(value) => text.push_str(&comment_text(value)?),
        }
    }
    Ok(Node::Comment(text))
}

fn node_kind(node: &Node) -> &'static str {
    match node {
        Node::Element(_) => "element",
        Node::Text(_) | Node::Safe(_) => "text",
        Node::Fragment(_) => "fragment",
        Node::Comment(_) => "comment",
        Node::Doctype(_) => "doctype",
    }
}
