//! Syntax types for template markup
//!
//! Parsing happens in two stages. The grammar turns tokens into a flat list
//! of [`Item`]s that still refer to interpolations by index; the tree builder
//! then matches open and close tags and moves the embedded values into a
//! provisional tree of [`TNode`]s.

use indexmap::IndexMap;

use crate::template::Value;

/// Byte range in the template's diagnostic source
pub type Span = std::ops::Range<usize>;

/// Syntax node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A tag or attribute name: literal text, or an interpolation
#[derive(Debug, Clone, PartialEq)]
pub enum Name {
    Literal(String),
    Slot(usize),
}

/// A piece of quoted attribute or comment content
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Slot(usize),
}

/// Where an attribute's value comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AttrSource {
    /// Bare attribute with no `=`
    Flag,
    Literal(String),
    /// A single interpolation, quoted or not
    Slot(usize),
    /// Literal text and interpolations in one quoted value
    Mixed(Vec<Part>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: Spanned<Name>,
    pub value: AttrSource,
}

/// A flat markup item
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Open {
        name: Spanned<Name>,
        attrs: Vec<Spanned<Attr>>,
        self_closing: bool,
    },
    Close {
        name: Spanned<Name>,
    },
    Text(String),
    /// An interpolation in content position
    Slot(usize),
    Comment(Vec<Part>),
    Doctype(String),
}

/// Provisional tree node, before component calls are resolved
#[derive(Debug)]
pub enum TNode {
    Element {
        tag: String,
        attrs: IndexMap<String, TAttr>,
        children: Vec<TNode>,
    },
    /// Literal text, as written in the template
    Text(String),
    /// An embedded value in content position
    Value { value: Value, expression: String },
    Comment(Vec<TPart>),
    Doctype(String),
    Call(ComponentCall),
}

/// Attribute value on a provisional element
#[derive(Debug)]
pub enum TAttr {
    /// Literal value, as written in the template
    Text(String),
    Flag,
    Dynamic(Value),
}

#[derive(Debug)]
pub enum TPart {
    Text(String),
    Value(Value),
}

/// A dynamic tag position awaiting resolution
#[derive(Debug)]
pub struct ComponentCall {
    /// The value in tag-name position, callable or not
    pub target: Value,
    pub expression: String,
    pub props: IndexMap<String, Value>,
    pub children: Vec<TNode>,
}
