//! Configuration for HTML output

/// Configuration options for serialized markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlConfig {
    /// Emit void elements as `<br />` rather than `<br>`
    pub self_closing_void: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            self_closing_void: true,
        }
    }
}

impl HtmlConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether void elements carry a trailing slash
    pub fn with_self_closing_void(mut self, self_closing: bool) -> Self {
        self.self_closing_void = self_closing;
        self
    }
}
