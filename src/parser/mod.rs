//! Parser for template markup
//!
//! Lexing, item grammar and tree building run in sequence and turn a
//! [`Template`] into a provisional tree whose dynamic tag positions still
//! hold the embedded values.

pub mod ast;
mod builder;
mod grammar;
pub mod lexer;
mod names;

pub use ast::*;
pub use names::kebab_to_snake;

use crate::error::ParseError;
use crate::template::Template;
use crate::RenderConfig;

/// Parse a template into a provisional tree
pub fn parse(template: Template, config: &RenderConfig) -> Result<Vec<TNode>, Vec<ParseError>> {
    let tokens = lexer::lex(&template);
    let items = grammar::parse_items(tokens, template.source_len())?;
    let (_, interpolations) = template.into_parts();
    builder::build(items, interpolations, config)
}
