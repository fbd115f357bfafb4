//! Tree builder: matches open and close items into a provisional tree

use indexmap::IndexMap;
use tracing::trace;

use crate::error::ParseError;
use crate::node::VOID_ELEMENTS;
use crate::renderer::escape::unescape;
use crate::template::{Interpolation, Value};
use crate::RenderConfig;

use super::ast::*;
use super::names::NameCase;

/// An element or component call whose close has not been seen yet
struct Frame {
    open: Open,
    children: Vec<TNode>,
    span: Span,
    /// SVG context outside this frame, restored when it closes
    outer_svg: bool,
}

enum Open {
    Element {
        tag: String,
        attrs: IndexMap<String, TAttr>,
    },
    Call {
        target: Value,
        expression: String,
        props: IndexMap<String, Value>,
    },
}

impl Open {
    fn describe(&self) -> String {
        match self {
            Open::Element { tag, .. } => tag.clone(),
            Open::Call { expression, .. } => format!("{{{}}}", expression),
        }
    }
}

struct TreeBuilder {
    slots: Vec<Option<Interpolation>>,
    case: NameCase,
    svg: bool,
    stack: Vec<Frame>,
    root: Vec<TNode>,
}

/// Build the provisional tree, moving each interpolation into its position
pub fn build(
    items: Vec<Spanned<Item>>,
    interpolations: Vec<Interpolation>,
    config: &RenderConfig,
) -> Result<Vec<TNode>, Vec<ParseError>> {
    let mut builder = TreeBuilder {
        slots: interpolations.into_iter().map(Some).collect(),
        case: NameCase {
            preserve: config.preserve_case,
        },
        svg: config.svg,
        stack: Vec::new(),
        root: Vec::new(),
    };

    for item in items {
        builder.item(item).map_err(|e| vec![e])?;
    }
    builder.finish()
}

impl TreeBuilder {
    fn slot(&mut self, index: usize) -> Interpolation {
        self.slots
            .get_mut(index)
            .and_then(Option::take)
            .unwrap_or_default()
    }

    fn push(&mut self, node: TNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn item(&mut self, item: Spanned<Item>) -> Result<(), ParseError> {
        let span = item.span;
        match item.node {
            Item::Open {
                name,
                attrs,
                self_closing,
            } => match name.node {
                Name::Literal(tag) => self.open_element(&tag, attrs, self_closing, span),
                Name::Slot(index) => self.open_call(index, attrs, self_closing, span),
            },
            Item::Close { name } => match name.node {
                Name::Literal(tag) => self.close_element(&tag, span),
                Name::Slot(index) => self.close_call(index, span),
            },
            Item::Text(text) => {
                self.push(TNode::Text(text));
                Ok(())
            }
            Item::Slot(index) => {
                let Interpolation { value, expression } = self.slot(index);
                self.push(TNode::Value { value, expression });
                Ok(())
            }
            Item::Comment(parts) => {
                let parts: Vec<TPart> = parts
                    .into_iter()
                    .map(|part| match part {
                        Part::Text(text) => TPart::Text(text),
                        Part::Slot(index) => TPart::Value(self.slot(index).value),
                    })
                    .collect();
                self.push(TNode::Comment(parts));
                Ok(())
            }
            Item::Doctype(doctype) => {
                self.push(TNode::Doctype(doctype));
                Ok(())
            }
        }
    }

    fn open_element(
        &mut self,
        raw: &str,
        attrs: Vec<Spanned<Attr>>,
        self_closing: bool,
        span: Span,
    ) -> Result<(), ParseError> {
        let outer_svg = self.svg;
        let svg = outer_svg || raw.eq_ignore_ascii_case("svg");
        let tag = self.case.tag(raw, svg);

        let mut map = IndexMap::with_capacity(attrs.len());
        for attr in attrs {
            let (raw, value) = self.attribute(attr)?;
            let name = self.case.attribute(&raw, svg);
            let value = match value {
                AttrValue::Flag => TAttr::Flag,
                AttrValue::Literal(text) => TAttr::Text(text),
                AttrValue::Dynamic(value) => TAttr::Dynamic(value),
            };
            // last write wins, at the position of the last write
            map.shift_remove(&name);
            map.insert(name, value);
        }

        let void = !svg && VOID_ELEMENTS.contains(&tag.as_str());
        if self_closing || void {
            self.push(TNode::Element {
                tag,
                attrs: map,
                children: Vec::new(),
            });
        } else {
            self.svg = svg;
            self.stack.push(Frame {
                open: Open::Element { tag, attrs: map },
                children: Vec::new(),
                span,
                outer_svg,
            });
        }
        Ok(())
    }

    fn open_call(
        &mut self,
        index: usize,
        attrs: Vec<Spanned<Attr>>,
        self_closing: bool,
        span: Span,
    ) -> Result<(), ParseError> {
        let Interpolation {
            value: target,
            expression,
        } = self.slot(index);

        let mut props = IndexMap::with_capacity(attrs.len());
        for attr in attrs {
            let (raw, value) = self.attribute(attr)?;
            let prop = self.case.prop(&raw);
            let value = match value {
                AttrValue::Flag => Value::Bool(true),
                AttrValue::Literal(text) => Value::Text(unescape(&text).into_owned()),
                AttrValue::Dynamic(value) => value,
            };
            props.shift_remove(&prop);
            props.insert(prop, value);
        }

        if self_closing {
            self.push(TNode::Call(ComponentCall {
                target,
                expression,
                props,
                children: Vec::new(),
            }));
        } else {
            self.stack.push(Frame {
                open: Open::Call {
                    target,
                    expression,
                    props,
                },
                children: Vec::new(),
                span,
                outer_svg: self.svg,
            });
        }
        Ok(())
    }

    /// Take one attribute's name as written and its value
    fn attribute(&mut self, attr: Spanned<Attr>) -> Result<(String, AttrValue), ParseError> {
        let raw = match attr.node.name.node {
            Name::Literal(raw) => raw,
            Name::Slot(index) => {
                return Err(ParseError::DynamicAttributeName {
                    span: attr.node.name.span,
                    expression: self.slot(index).expression,
                })
            }
        };
        let value = match attr.node.value {
            AttrSource::Flag => AttrValue::Flag,
            AttrSource::Literal(text) => AttrValue::Literal(text),
            AttrSource::Slot(index) => AttrValue::Dynamic(self.slot(index).value),
            AttrSource::Mixed(_) => {
                return Err(ParseError::MixedAttributeValue {
                    span: attr.span,
                    name: raw,
                })
            }
        };
        Ok((raw, value))
    }

    fn close_element(&mut self, raw: &str, span: Span) -> Result<(), ParseError> {
        let Some(frame) = self.stack.last() else {
            if self.is_void(raw) {
                trace!(tag = raw, "ignoring close of void element");
                return Ok(());
            }
            return Err(ParseError::UnexpectedClose {
                span,
                tag: raw.to_string(),
            });
        };

        match &frame.open {
            Open::Element { tag, .. } if tag.eq_ignore_ascii_case(raw) => {
                self.pop();
                Ok(())
            }
            _ if self.is_void(raw) => {
                trace!(tag = raw, "ignoring close of void element");
                Ok(())
            }
            open => Err(ParseError::MismatchedTag {
                span,
                expected: open.describe(),
                found: raw.to_string(),
            }),
        }
    }

    fn close_call(&mut self, index: usize, span: Span) -> Result<(), ParseError> {
        let close = self.slot(index);
        let Some(frame) = self.stack.last() else {
            return Err(ParseError::UnexpectedClose {
                span,
                tag: format!("{{{}}}", close.expression),
            });
        };

        match &frame.open {
            Open::Call { target, .. } if target.same_as(&close.value) => {
                self.pop();
                Ok(())
            }
            Open::Call { expression, .. } => Err(ParseError::MismatchedComponent {
                span,
                expected: expression.clone(),
                found: close.expression,
            }),
            Open::Element { tag, .. } => Err(ParseError::MismatchedTag {
                span,
                expected: tag.clone(),
                found: format!("{{{}}}", close.expression),
            }),
        }
    }

    fn is_void(&self, raw: &str) -> bool {
        !self.svg && VOID_ELEMENTS.contains(&raw.to_ascii_lowercase().as_str())
    }

    /// Close the innermost frame and attach it to its parent
    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        self.svg = frame.outer_svg;
        let node = match frame.open {
            Open::Element { tag, attrs } => TNode::Element {
                tag,
                attrs,
                children: frame.children,
            },
            Open::Call {
                target,
                expression,
                props,
            } => TNode::Call(ComponentCall {
                target,
                expression,
                props,
                children: frame.children,
            }),
        };
        self.push(node);
    }

    fn finish(self) -> Result<Vec<TNode>, Vec<ParseError>> {
        if self.stack.is_empty() {
            return Ok(self.root);
        }
        Err(self
            .stack
            .iter()
            .rev()
            .map(|frame| ParseError::UnclosedTag {
                span: frame.span.clone(),
                tag: frame.open.describe(),
            })
            .collect())
    }
}

enum AttrValue {
    Flag,
    Literal(String),
    Dynamic(Value),
}
