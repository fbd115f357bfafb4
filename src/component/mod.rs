//! Component callables
//!
//! A [`Component`] is a named function placed at a dynamic tag position.
//! Its [`Signature`] is declared once, next to the body, and drives prop
//! binding at every call site.
//!
//! # Example
//!
//! ```rust
//! use tdom::{render, t, Component, Signature};
//!
//! let heading = Component::new(
//!     "Heading",
//!     Signature::new().optional("title", "My Title"),
//!     |props| Ok(t!("<h1>" {props.get("title")} "</h1>")),
//! );
//!
//! let markup = render(t!("<" {&heading} " />")).unwrap();
//! assert_eq!(markup, "<h1>My Title</h1>");
//! ```

mod props;
mod signature;

pub use props::Props;
pub use signature::{Param, Signature};

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::node::Node;
use crate::template::Value;
use crate::RenderError;

type Body = dyn Fn(Props) -> Result<Value, RenderError>;

struct ComponentInner {
    name: String,
    signature: Signature,
    body: Box<Body>,
}

/// A callable that can stand in place of a tag name.
///
/// Cloning is cheap and keeps identity: a clone can close a tag opened
/// with the component it was cloned from.
#[derive(Clone)]
pub struct Component {
    inner: Rc<ComponentInner>,
}

impl Component {
    pub fn new<F, R>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(Props) -> Result<R, RenderError> + 'static,
        R: Into<Value>,
    {
        Self {
            inner: Rc::new(ComponentInner {
                name: name.into(),
                signature,
                body: Box::new(move |props| body(props).map(Into::into)),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn signature(&self) -> &Signature {
        &self.inner.signature
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Bind the call site's props and children, then run the body
    pub(crate) fn invoke(
        &self,
        supplied: IndexMap<String, Value>,
        children: Vec<Node>,
    ) -> Result<Value, RenderError> {
        let props = self.signature().bind(self.name(), supplied, children)?;
        debug!(component = %self.name(), props = props.len(), "invoking component");
        (self.inner.body)(props)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.inner.name)
            .field("signature", &self.inner.signature)
            .finish_non_exhaustive()
    }
}
