//! tdom - Templates that compile to markup trees
//!
//! This library parses literal-plus-interpolation templates into a node
//! tree, resolves component calls placed at dynamic tag positions, and
//! serializes the result as escaped HTML.
//!
//! # Example
//!
//! ```rust
//! use tdom::{render, t};
//!
//! let name = "<World>";
//! let markup = render(t!("<p class=\"greeting\">Hello " {name} "</p>")).unwrap();
//! assert_eq!(markup, r#"<p class="greeting">Hello &lt;World&gt;</p>"#);
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod node;
pub mod parser;
pub mod renderer;
pub mod resolver;
pub mod template;

pub use component::{Component, Param, Props, Signature};
pub use config::ConfigError;
pub use error::ParseError;
pub use node::{AttrValue, Element, Node};
pub use renderer::{Chunks, HtmlConfig};
pub use resolver::{BindingError, NormalizationError, Origin};
pub use template::{Interpolation, Seq, Template, TemplateBuilder, Value};

use resolver::Resolver;
use thiserror::Error;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during parsing or tree building
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Props at a call site did not fit the component signature
    #[error("binding error: {0}")]
    Binding(#[from] BindingError),

    /// A value could not be turned into nodes
    #[error("normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    /// Failure raised by a component body
    #[error("component error: {0}")]
    User(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RenderError {
    /// Wrap an application error raised inside a component
    pub fn user(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        RenderError::User(error.into())
    }
}

impl From<Vec<ParseError>> for RenderError {
    fn from(errors: Vec<ParseError>) -> Self {
        RenderError::Parse(errors)
    }
}

impl From<ParseError> for RenderError {
    fn from(error: ParseError) -> Self {
        RenderError::Parse(vec![error])
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Start in the SVG context, restoring mixed-case SVG names at the root
    pub svg: bool,
    /// Keep tag and attribute names exactly as written
    pub preserve_case: bool,
    /// Serialization options
    pub html: HtmlConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the root context is SVG
    pub fn with_svg(mut self, svg: bool) -> Self {
        self.svg = svg;
        self
    }

    /// Enable or disable case normalization of names
    pub fn with_preserve_case(mut self, preserve_case: bool) -> Self {
        self.preserve_case = preserve_case;
        self
    }

    /// Set the serialization options
    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = html;
        self
    }
}

/// Resolve a template into a node tree in the HTML context
///
/// A template with one root node returns that node; several roots come
/// back as a [`Node::Fragment`].
///
/// # Example
///
/// ```rust
/// use tdom::{html, t, Node, Value};
///
/// let items = Value::seq(["a", "b"].map(|i| t!("<li>" {i} "</li>")));
/// let list = html(t!("<ul>" {items} "</ul>")).unwrap();
/// assert!(matches!(list, Node::Element(ref ul) if ul.children.len() == 2));
/// assert_eq!(list.to_string(), "<ul><li>a</li><li>b</li></ul>");
/// ```
pub fn html(template: impl Into<Template>) -> Result<Node, RenderError> {
    html_with_config(template, &RenderConfig::default())
}

/// Resolve a template into a node tree in the SVG context
///
/// Known SVG names such as `viewBox` and `clipPath` keep their case.
///
/// ```rust
/// use tdom::{svg, t};
///
/// let node = svg(t!("<clipPath id=\"c\"></clipPath>")).unwrap();
/// assert_eq!(node.to_string(), r#"<clipPath id="c"></clipPath>"#);
/// ```
pub fn svg(template: impl Into<Template>) -> Result<Node, RenderError> {
    html_with_config(template, &RenderConfig::default().with_svg(true))
}

/// Resolve a template with custom configuration
pub fn html_with_config(
    template: impl Into<Template>,
    config: &RenderConfig,
) -> Result<Node, RenderError> {
    Resolver::new(*config).resolve(template.into())
}

/// Render a template to markup with default configuration
///
/// This is the main entry point for the library. It parses the template,
/// resolves components, and serializes the tree.
///
/// # Example
///
/// ```rust
/// use tdom::{render, t};
///
/// let title = "Tom & Jerry";
/// let markup = render(t!("<h1 title=" {title} ">" {title} "</h1>")).unwrap();
/// assert_eq!(markup, r#"<h1 title="Tom &amp; Jerry">Tom &amp; Jerry</h1>"#);
/// ```
pub fn render(template: impl Into<Template>) -> Result<String, RenderError> {
    render_with_config(template, &RenderConfig::default())
}

/// Render a template to markup with custom configuration
///
/// # Example
///
/// ```rust
/// use tdom::{render_with_config, HtmlConfig, RenderConfig};
///
/// let config = RenderConfig::new().with_html(HtmlConfig::new().with_self_closing_void(false));
/// let markup = render_with_config("<p>a<br />b</p>", &config).unwrap();
/// assert_eq!(markup, "<p>a<br>b</p>");
/// ```
pub fn render_with_config(
    template: impl Into<Template>,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let node = html_with_config(template, config)?;
    Ok(node.render(config.html))
}
