//! Template model
//!
//! A [`Template`] is the engine's only input: literal markup strings
//! interleaved with embedded [`Value`]s. There is always exactly one more
//! string than there are interpolations, so a template with no embedded
//! values is a single string.
//!
//! # Example
//!
//! ```rust
//! use tdom::t;
//!
//! let name = "World";
//! let template = t!("<p>Hello " {name} "!</p>");
//! assert_eq!(template.strings(), &["<p>Hello ", "!</p>"]);
//! assert_eq!(template.source(), "<p>Hello {name}!</p>");
//! ```

mod value;

pub use value::{Seq, Value};

/// An embedded value together with the expression that produced it.
///
/// The expression is kept for diagnostics only.
#[derive(Debug, Clone, Default)]
pub struct Interpolation {
    pub value: Value,
    pub expression: String,
}

/// Static markup strings interleaved with embedded values
#[derive(Debug, Clone)]
pub struct Template {
    strings: Vec<String>,
    interpolations: Vec<Interpolation>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            strings: vec![String::new()],
            interpolations: Vec::new(),
        }
    }
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// A template with no embedded values
    pub fn literal(markup: impl Into<String>) -> Self {
        Self {
            strings: vec![markup.into()],
            interpolations: Vec::new(),
        }
    }

    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn interpolations(&self) -> &[Interpolation] {
        &self.interpolations
    }

    /// Diagnostic source text with `{expression}` in place of each value.
    ///
    /// Parse error spans are byte ranges into this string.
    pub fn source(&self) -> String {
        let mut out = String::with_capacity(self.source_len());
        for (i, string) in self.strings.iter().enumerate() {
            out.push_str(string);
            if let Some(interpolation) = self.interpolations.get(i) {
                out.push('{');
                out.push_str(&interpolation.expression);
                out.push('}');
            }
        }
        out
    }

    pub(crate) fn source_len(&self) -> usize {
        self.strings.iter().map(String::len).sum::<usize>()
            + self
                .interpolations
                .iter()
                .map(|i| i.expression.len() + 2)
                .sum::<usize>()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Interpolation>) {
        (self.strings, self.interpolations)
    }
}

impl From<&str> for Template {
    fn from(markup: &str) -> Self {
        Template::literal(markup)
    }
}

impl From<String> for Template {
    fn from(markup: String) -> Self {
        Template::literal(markup)
    }
}

/// Incremental [`Template`] construction, used by the [`t!`](crate::t) macro
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    template: Template,
}

impl TemplateBuilder {
    /// Append literal markup
    pub fn text(mut self, markup: &str) -> Self {
        if let Some(last) = self.template.strings.last_mut() {
            last.push_str(markup);
        }
        self
    }

    /// Append an embedded value with no expression marker
    pub fn value(self, value: impl Into<Value>) -> Self {
        self.interpolate(value, "")
    }

    /// Append an embedded value, recording the expression that produced it
    pub fn interpolate(mut self, value: impl Into<Value>, expression: &str) -> Self {
        self.template.interpolations.push(Interpolation {
            value: value.into(),
            expression: expression.to_string(),
        });
        self.template.strings.push(String::new());
        self
    }

    pub fn build(self) -> Template {
        self.template
    }
}

/// Build a [`Template`] from string literals and braced expressions.
///
/// ```rust
/// use tdom::{t, render};
///
/// let items = 3;
/// let markup = render(t!("<span class=\"count\">" {items} "</span>")).unwrap();
/// assert_eq!(markup, r#"<span class="count">3</span>"#);
/// ```
#[macro_export]
macro_rules! t {
    (@acc $builder:expr ;) => {
        $builder.build()
    };
    (@acc $builder:expr ; $lit:literal $($rest:tt)*) => {
        $crate::t!(@acc $builder.text($lit) ; $($rest)*)
    };
    (@acc $builder:expr ; { $value:expr } $($rest:tt)*) => {
        $crate::t!(@acc $builder.interpolate($value, stringify!($value)) ; $($rest)*)
    };
    ($($tokens:tt)*) => {
        $crate::t!(@acc $crate::Template::builder() ; $($tokens)*)
    };
}
