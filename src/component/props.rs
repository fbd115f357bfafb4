//! Bound component arguments

use indexmap::IndexMap;

use crate::node::Node;
use crate::template::Value;

/// Arguments passed to a component body.
///
/// Declared parameters come first in declaration order, followed by any
/// catch-all props in call-site order. `children` is `Some` exactly when the
/// component declares a children slot, even when nothing was nested.
#[derive(Debug, Clone, Default)]
pub struct Props {
    values: IndexMap<String, Value>,
    children: Option<Vec<Node>>,
}

impl Props {
    pub(crate) fn new(values: IndexMap<String, Value>, children: Option<Vec<Node>>) -> Self {
        Self { values, children }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get a prop as a string slice, if it holds text
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Move a prop out
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn children(&self) -> Option<&[Node]> {
        self.children.as_deref()
    }

    /// Move the children out, leaving an empty slot behind
    pub fn take_children(&mut self) -> Option<Vec<Node>> {
        self.children.as_mut().map(std::mem::take)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
