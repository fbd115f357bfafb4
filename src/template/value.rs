//! Embedded values

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::component::Component;
use crate::node::{Element, Node};

use super::Template;

/// A value embedded in a [`Template`] or passed as a component prop
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Plain text, escaped on output
    Text(String),
    /// Pre-sanitized markup, never escaped
    Safe(String),
    Node(Node),
    Template(Template),
    Component(Component),
    Seq(Seq),
    /// Opaque host data; legal as a prop, never renderable
    Any(Rc<dyn Any>),
}

impl Value {
    /// Wrap an iterator as a single-pass lazy sequence
    pub fn seq<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: 'static,
        I::Item: Into<Value> + 'static,
    {
        Value::Seq(Seq::new(items))
    }

    /// Trusted markup that is emitted verbatim
    pub fn safe(markup: impl Into<String>) -> Self {
        Value::Safe(markup.into())
    }

    /// Opaque host data for components that downcast it themselves
    pub fn any<T: Any>(data: T) -> Self {
        Value::Any(Rc::new(data))
    }

    /// Short name of the value's shape, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Safe(_) => "safe markup",
            Value::Node(_) => "node",
            Value::Template(_) => "template",
            Value::Component(_) => "component",
            Value::Seq(_) => "sequence",
            Value::Any(_) => "opaque",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Safe(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Value::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Downcast opaque host data
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Any(data) => data.downcast_ref(),
            _ => None,
        }
    }

    /// Whether two values denote the same embedded object.
    ///
    /// Components, sequences and opaque data compare by identity; everything
    /// else compares by value.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) | (Value::Safe(a), Value::Safe(b)) => a == b,
            (Value::Node(a), Value::Node(b)) => a == b,
            (Value::Template(a), Value::Template(b)) => {
                a.strings() == b.strings()
                    && a.interpolations().len() == b.interpolations().len()
                    && a.interpolations()
                        .iter()
                        .zip(b.interpolations())
                        .all(|(x, y)| x.value.same_as(&y.value))
            }
            (Value::Component(a), Value::Component(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Any(a), Value::Any(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Safe(s) => f.debug_tuple("Safe").field(s).finish(),
            Value::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Value::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Value::Component(c) => f.debug_tuple("Component").field(c).finish(),
            Value::Seq(seq) => f.debug_tuple("Seq").field(seq).finish(),
            Value::Any(_) => f.write_str("Any(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        // values above i64::MAX saturate
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        Value::Node(node.clone())
    }
}

impl From<Element> for Value {
    fn from(el: Element) -> Self {
        Value::Node(Node::Element(el))
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Value::Node(Node::Fragment(nodes))
    }
}

impl From<Template> for Value {
    fn from(template: Template) -> Self {
        Value::Template(template)
    }
}

impl From<Component> for Value {
    fn from(component: Component) -> Self {
        Value::Component(component)
    }
}

impl From<&Component> for Value {
    fn from(component: &Component) -> Self {
        Value::Component(component.clone())
    }
}

impl From<Seq> for Value {
    fn from(seq: Seq) -> Self {
        Value::Seq(seq)
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

type BoxedIter = Box<dyn Iterator<Item = Value>>;

/// A single-pass lazy sequence.
///
/// Clones share the underlying iterator, so however many times a `Seq` is
/// embedded, its items are pulled at most once.
#[derive(Clone)]
pub struct Seq {
    iter: Rc<RefCell<Option<BoxedIter>>>,
}

impl Seq {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::IntoIter: 'static,
        I::Item: Into<Value> + 'static,
    {
        let iter: BoxedIter = Box::new(items.into_iter().map(Into::into));
        Self {
            iter: Rc::new(RefCell::new(Some(iter))),
        }
    }

    /// Take the iterator, leaving the sequence consumed
    pub(crate) fn take(&self) -> Option<BoxedIter> {
        self.iter.borrow_mut().take()
    }

    pub fn is_consumed(&self) -> bool {
        self.iter.borrow().is_none()
    }

    pub fn ptr_eq(&self, other: &Seq) -> bool {
        Rc::ptr_eq(&self.iter, &other.iter)
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_single_pass() {
        let seq = Seq::new(["a", "b"]);
        let shared = seq.clone();
        let items: Vec<_> = seq.take().into_iter().flatten().collect();
        assert_eq!(items.len(), 2);
        assert!(shared.is_consumed());
        assert!(shared.take().is_none());
    }

    #[test]
    fn test_option_conversion() {
        assert!(matches!(Value::from(None::<&str>), Value::Null));
        assert!(matches!(Value::from(Some(3)), Value::Int(3)));
    }

    #[test]
    fn test_same_as_uses_identity_for_seq() {
        let a = Value::seq(Vec::<Node>::new());
        let b = Value::seq(Vec::<Node>::new());
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_same_as_compares_scalars_by_value() {
        assert!(Value::from("x").same_as(&Value::from("x")));
        assert!(!Value::from("x").same_as(&Value::safe("x")));
        assert!(!Value::from(1).same_as(&Value::from(1.0)));
    }

    #[test]
    fn test_downcast_any() {
        let value = Value::any(vec![1u8, 2]);
        assert_eq!(value.downcast_ref::<Vec<u8>>(), Some(&vec![1u8, 2]));
        assert_eq!(value.kind(), "opaque");
    }
}
