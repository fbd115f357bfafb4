//! Error types for template parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in the template's diagnostic source
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedTag {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("closing tag </{{{found}}}> does not match component opened as <{{{expected}}}>")]
    MismatchedComponent {
        span: Span,
        expected: String,
        found: String,
    },

    #[error("<{tag}> is never closed")]
    UnclosedTag { span: Span, tag: String },

    #[error("closing tag </{tag}> has no matching open tag")]
    UnexpectedClose { span: Span, tag: String },

    #[error("attribute `{name}` mixes literal text with an interpolation")]
    MixedAttributeValue { span: Span, name: String },

    #[error("attribute name cannot be an interpolation ({{{expression}}})")]
    DynamicAttributeName { span: Span, expression: String },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::MismatchedTag { span, .. }
            | ParseError::MismatchedComponent { span, .. }
            | ParseError::UnclosedTag { span, .. }
            | ParseError::UnexpectedClose { span, .. }
            | ParseError::MixedAttributeValue { span, .. }
            | ParseError::DynamicAttributeName { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne.
    ///
    /// `source` is the template's [`source`](crate::Template::source) text.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span().clone();
        let (message, label) = match self {
            ParseError::Syntax {
                message, expected, ..
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (message.clone(), format!("{}{}", message, expected_str))
            }
            other => (other.to_string(), other.label().to_string()),
        };

        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = Report::build(ReportKind::Error, filename, span.start)
            .with_message(message)
            .with_label(
                Label::new((filename, span))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn label(&self) -> &'static str {
        match self {
            ParseError::Syntax { .. } => "here",
            ParseError::MismatchedTag { .. } | ParseError::MismatchedComponent { .. } => {
                "mismatched close"
            }
            ParseError::UnclosedTag { .. } => "opened here",
            ParseError::UnexpectedClose { .. } => "nothing to close",
            ParseError::MixedAttributeValue { .. } => "use a single interpolation",
            ParseError::DynamicAttributeName { .. } => "dynamic name",
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of template".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        // Format expected tokens nicely
        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of template".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    match tok {
        Token::TagOpen => "'<'".to_string(),
        Token::CloseTagOpen => "'</'".to_string(),
        Token::TagEnd => "'>'".to_string(),
        Token::SelfClose => "'/>'".to_string(),
        Token::Eq => "'='".to_string(),
        Token::Name(s) => format!("name '{}'", s),
        Token::Quoted(s) => format!("quoted value \"{}\"", s),
        Token::QuoteOpen | Token::QuoteClose => "quote".to_string(),
        Token::QuotedText(s) => format!("quoted text \"{}\"", s),
        Token::Text(s) => format!("text \"{}\"", s),
        Token::CommentOpen => "'<!--'".to_string(),
        Token::CommentText(_) => "comment text".to_string(),
        Token::CommentClose => "'-->'".to_string(),
        Token::Doctype(_) => "doctype".to_string(),
        Token::Slot(index) => format!("interpolation #{}", index),
        Token::Unknown(s) => format!("'{}'", s),
    }
}
