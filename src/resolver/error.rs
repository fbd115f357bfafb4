//! Resolution error types

use std::fmt;

use thiserror::Error;

/// Where a value being normalized came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Returned by the named component
    Component(String),
    /// Embedded directly, with its expression marker
    Interpolation(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Component(name) => write!(f, "component `{}`", name),
            Origin::Interpolation(expression) => write!(f, "interpolation `{{{}}}`", expression),
        }
    }
}

/// Errors matching a call site's props against a component signature
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("component `{component}` has no prop named `{prop}`")]
    UnknownProp { component: String, prop: String },

    #[error("component `{component}` requires prop `{prop}`")]
    MissingProp { component: String, prop: String },

    #[error("component `{component}` was given `children` as an attribute")]
    ReservedChildren { component: String },
}

/// Errors turning a value into nodes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("{origin} produced a {kind} value, which cannot be rendered")]
    Unrecognized { kind: &'static str, origin: Origin },

    #[error("lazy sequence from {origin} was already consumed")]
    Exhausted { origin: Origin },

    #[error("attribute `{name}` cannot take a {kind} value")]
    Attribute { name: String, kind: &'static str },

    #[error("<{tag}> may only contain text, found {kind}")]
    RawTextContent { tag: String, kind: &'static str },

    #[error("comments may only contain text, found {kind}")]
    Comment { kind: &'static str },
}
