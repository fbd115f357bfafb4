//! Declared component interfaces and prop binding

use indexmap::IndexMap;
use tracing::trace;

use crate::node::Node;
use crate::resolver::BindingError;
use crate::template::Value;

use super::Props;

/// Name of the reserved prop that carries nested content
pub const CHILDREN: &str = "children";

/// A declared parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    /// Value used when the call site omits the prop; `None` means required
    pub default: Option<Value>,
}

/// A component's declared interface: ordered parameters, whether it takes
/// children, and whether it accepts undeclared props.
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<Param>,
    children: bool,
    rest: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter with no default
    pub fn required(self, name: impl Into<String>) -> Self {
        self.param(name.into(), None)
    }

    /// Declare a parameter with a default value
    pub fn optional(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(name.into(), Some(default.into()))
    }

    /// Accept nested content as the `children` prop
    pub fn children(mut self) -> Self {
        self.children = true;
        self
    }

    /// Accept props that are not declared, in call-site order
    pub fn rest(mut self) -> Self {
        self.rest = true;
        self
    }

    fn param(mut self, name: String, default: Option<Value>) -> Self {
        if name == CHILDREN {
            self.children = true;
            return self;
        }
        self.params.retain(|p| p.name != name);
        self.params.push(Param { name, default });
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn accepts_children(&self) -> bool {
        self.children
    }

    pub fn accepts_rest(&self) -> bool {
        self.rest
    }

    /// Match a call site's props and resolved children against this
    /// signature.
    pub(crate) fn bind(
        &self,
        component: &str,
        mut supplied: IndexMap<String, Value>,
        children: Vec<Node>,
    ) -> Result<Props, BindingError> {
        if supplied.contains_key(CHILDREN) {
            return Err(BindingError::ReservedChildren {
                component: component.to_string(),
            });
        }

        let mut values = IndexMap::with_capacity(self.params.len());
        for param in &self.params {
            let value = match (supplied.shift_remove(&param.name), &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(BindingError::MissingProp {
                        component: component.to_string(),
                        prop: param.name.clone(),
                    })
                }
            };
            values.insert(param.name.clone(), value);
        }

        if let Some(prop) = supplied.keys().next() {
            if !self.rest {
                return Err(BindingError::UnknownProp {
                    component: component.to_string(),
                    prop: prop.clone(),
                });
            }
        }
        values.extend(supplied);

        let children = if self.children {
            Some(children)
        } else {
            if !children.is_empty() {
                trace!(component, dropped = children.len(), "discarding undeclared children");
            }
            None
        };

        Ok(Props::new(values, children))
    }
}
