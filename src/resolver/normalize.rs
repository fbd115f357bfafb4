//! Normalization of embedded values and component results into nodes

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::node::{AttrValue, Node};
use crate::template::{Seq, Value};
use crate::RenderError;

use super::{NormalizationError, Origin, Resolver};

impl Resolver {
    /// Turn a value into a node by case analysis on its shape
    pub(super) fn normalize(&self, value: Value, origin: &Origin) -> Result<Node, RenderError> {
        match value {
            Value::Node(node) => Ok(node),
            Value::Text(text) => Ok(Node::Text(text)),
            Value::Safe(markup) => Ok(Node::Safe(markup)),
            Value::Int(i) => Ok(Node::Text(i.to_string())),
            Value::Float(x) => Ok(Node::Text(x.to_string())),
            Value::Null | Value::Bool(false) => Ok(Node::Fragment(Vec::new())),
            Value::Template(template) => {
                debug!(%origin, "re-entering nested template");
                // nested templates always start from an HTML root
                Resolver::new(self.config.with_svg(false)).resolve(template)
            }
            Value::Seq(seq) => self.normalize_seq(&seq, origin),
            Value::Component(component) => {
                let result = component.invoke(IndexMap::new(), Vec::new())?;
                self.normalize(result, &Origin::Component(component.name().to_string()))
            }
            other @ (Value::Bool(true) | Value::Any(_)) => Err(NormalizationError::Unrecognized {
                kind: other.kind(),
                origin: origin.clone(),
            }
            .into()),
        }
    }

    fn normalize_seq(&self, seq: &Seq, origin: &Origin) -> Result<Node, RenderError> {
        let items = seq.take().ok_or_else(|| NormalizationError::Exhausted {
            origin: origin.clone(),
        })?;
        let mut nodes = Vec::new();
        for item in items {
            self.normalize(item, origin)?.flatten_into(&mut nodes);
        }
        trace!(%origin, nodes = nodes.len(), "consumed lazy sequence");
        Ok(Node::Fragment(nodes))
    }
}

/// Attribute value for an interpolation; `None` omits the attribute
pub(super) fn attribute_value(
    name: &str,
    value: Value,
) -> Result<Option<AttrValue>, NormalizationError> {
    match value {
        Value::Text(text) => Ok(Some(AttrValue::Text(text))),
        Value::Safe(markup) => Ok(Some(AttrValue::Safe(markup))),
        Value::Int(i) => Ok(Some(AttrValue::Text(i.to_string()))),
        Value::Float(x) => Ok(Some(AttrValue::Text(x.to_string()))),
        Value::Bool(true) => Ok(Some(AttrValue::Flag)),
        Value::Bool(false) | Value::Null => Ok(None),
        other => Err(NormalizationError::Attribute {
            name: name.to_string(),
            kind: other.kind(),
        }),
    }
}

/// Comment text for an interpolation
pub(super) fn comment_text(value: Value) -> Result<String, NormalizationError> {
    match value {
        Value::Text(text) | Value::Safe(text) => Ok(text),
        Value::Int(i) => Ok(i.to_string()),
        Value::Float(x) => Ok(x.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(NormalizationError::Comment { kind: other.kind() }),
    }
}
