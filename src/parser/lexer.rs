//! Lexer for template markup using logos
//!
//! Markup is lexed one literal string at a time, with the lexer mode carried
//! across interpolations so that a value can sit in content, tag, quoted
//! attribute or comment position.

use logos::Logos;

use crate::node::RAW_TEXT_ELEMENTS;
use crate::template::Template;

/// Byte range in the template's diagnostic source
pub type Span = std::ops::Range<usize>;

/// Tokens recognized between tags
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum ContentToken {
    #[token("<!--")]
    CommentOpen,
    #[regex(r"<![dD][oO][cC][tT][yY][pP][eE][^>]*>")]
    Doctype,
    #[token("</")]
    CloseTagOpen,
    #[token("<")]
    TagOpen,
    #[regex(r"[^<]+")]
    Text,
}

/// Tokens recognized inside a tag
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum TagToken {
    #[token(">")]
    End,
    #[token("/>")]
    SelfEnd,
    #[token("=")]
    Eq,
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Quoted,
    // an opening quote with no closing quote in the same string
    #[token("\"")]
    DoubleOpen,
    #[token("'")]
    SingleOpen,
    #[regex(r#"[^ \t\n\r\f"'<>=/]+"#)]
    Name,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `<`
    TagOpen,
    /// `</`
    CloseTagOpen,
    /// `>`
    TagEnd,
    /// `/>`
    SelfClose,
    /// `=`
    Eq,
    Name(String),
    /// A complete quoted attribute value, as written
    Quoted(String),
    /// Opening quote of a value that continues past an interpolation
    QuoteOpen,
    QuotedText(String),
    QuoteClose,
    /// Content text, as written
    Text(String),
    CommentOpen,
    CommentText(String),
    CommentClose,
    /// `<!DOCTYPE ...>`, holding what follows the keyword
    Doctype(String),
    /// The interpolation at this index
    Slot(usize),
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Content,
    Tag,
    Quoted(char),
    Comment,
    RawText(String),
}

/// What has been seen of the tag currently being lexed
#[derive(Debug, Default)]
struct TagState {
    closing: bool,
    named: bool,
    name: Option<String>,
    /// The last token was `=`, so an unquoted value may follow
    after_eq: bool,
}

struct Lexer {
    tokens: Vec<(Token, Span)>,
    mode: Mode,
    tag: TagState,
}

/// Lex a template into tokens with spans into [`Template::source`]
pub fn lex(template: &Template) -> Vec<(Token, Span)> {
    let mut lexer = Lexer {
        tokens: Vec::new(),
        mode: Mode::Content,
        tag: TagState::default(),
    };

    let mut offset = 0;
    for (index, string) in template.strings().iter().enumerate() {
        lexer.chunk(string, offset);
        offset += string.len();
        if let Some(interpolation) = template.interpolations().get(index) {
            let len = interpolation.expression.len() + 2;
            lexer.slot(index, offset..offset + len);
            offset += len;
        }
    }
    lexer.tokens
}

impl Lexer {
    fn push(&mut self, token: Token, span: Span) {
        self.tokens.push((token, span));
    }

    fn chunk(&mut self, chunk: &str, base: usize) {
        let mut pos = 0;
        while pos < chunk.len() {
            let rest = &chunk[pos..];
            let at = base + pos;
            pos += match self.mode.clone() {
                Mode::Content => self.content(rest, at),
                Mode::Tag => self.tag(rest, at),
                Mode::Quoted(quote) => self.quoted(quote, rest, at),
                Mode::Comment => self.comment(rest, at),
                Mode::RawText(tag) => self.raw_text(&tag, rest, at),
            };
        }
    }

    fn slot(&mut self, index: usize, span: Span) {
        if self.mode == Mode::Tag {
            self.tag.named = true;
            self.tag.after_eq = false;
        }
        self.push(Token::Slot(index), span);
    }

    fn content(&mut self, rest: &str, at: usize) -> usize {
        let mut lex = ContentToken::lexer(rest);
        let Some(result) = lex.next() else {
            return rest.len();
        };
        let span = lex.span();
        let slice = lex.slice();
        let abs = at + span.start..at + span.end;
        let token = match result {
            Ok(ContentToken::Text) => Token::Text(slice.to_string()),
            Ok(ContentToken::TagOpen) => {
                self.open_tag(false);
                Token::TagOpen
            }
            Ok(ContentToken::CloseTagOpen) => {
                self.open_tag(true);
                Token::CloseTagOpen
            }
            Ok(ContentToken::CommentOpen) => {
                self.mode = Mode::Comment;
                Token::CommentOpen
            }
            Ok(ContentToken::Doctype) => {
                // strip `<!DOCTYPE` and `>`
                Token::Doctype(slice[9..slice.len() - 1].trim().to_string())
            }
            Err(()) => Token::Unknown(slice.to_string()),
        };
        self.push(token, abs);
        span.end
    }

    fn open_tag(&mut self, closing: bool) {
        self.mode = Mode::Tag;
        self.tag = TagState {
            closing,
            ..TagState::default()
        };
    }

    fn tag(&mut self, rest: &str, at: usize) -> usize {
        if std::mem::take(&mut self.tag.after_eq) {
            if let Some(consumed) = self.unquoted_value(rest, at) {
                return consumed;
            }
        }

        let mut lex = TagToken::lexer(rest);
        let Some(result) = lex.next() else {
            // only whitespace left in this string
            return rest.len();
        };
        let span = lex.span();
        let slice = lex.slice();
        let abs = at + span.start..at + span.end;
        let token = match result {
            Ok(TagToken::End) => {
                self.mode = self.after_tag();
                Token::TagEnd
            }
            Ok(TagToken::SelfEnd) => {
                self.mode = Mode::Content;
                Token::SelfClose
            }
            Ok(TagToken::Eq) => {
                self.tag.after_eq = true;
                Token::Eq
            }
            Ok(TagToken::Quoted) => Token::Quoted(slice[1..slice.len() - 1].to_string()),
            Ok(TagToken::DoubleOpen) => {
                self.mode = Mode::Quoted('"');
                Token::QuoteOpen
            }
            Ok(TagToken::SingleOpen) => {
                self.mode = Mode::Quoted('\'');
                Token::QuoteOpen
            }
            Ok(TagToken::Name) => {
                if !self.tag.named {
                    self.tag.named = true;
                    self.tag.name = Some(slice.to_ascii_lowercase());
                }
                Token::Name(slice.to_string())
            }
            Err(()) => Token::Unknown(slice.to_string()),
        };
        self.push(token, abs);
        span.end
    }

    /// Lex an unquoted attribute value, which unlike a name may contain `/`.
    ///
    /// A trailing `/` directly before `>` is left for the self-closing `/>`.
    /// Returns `None` when the value is quoted or missing.
    fn unquoted_value(&mut self, rest: &str, at: usize) -> Option<usize> {
        let start = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
        let value = &rest[start..];
        if value.is_empty() {
            // the value may still come from an interpolation
            self.tag.after_eq = true;
            return Some(rest.len());
        }
        let end = value
            .find(|c: char| c.is_ascii_whitespace() || matches!(c, '>' | '<' | '"' | '\'' | '`'))
            .unwrap_or(value.len());
        if end == 0 {
            return None;
        }
        let mut len = end;
        if len > 1 && value[..len].ends_with('/') && value[len..].starts_with('>') {
            len -= 1;
        }
        self.push(
            Token::Name(value[..len].to_string()),
            at + start..at + start + len,
        );
        Some(start + len)
    }

    /// Mode after `>`: raw text for the body of `<script>` and `<style>`
    fn after_tag(&self) -> Mode {
        match &self.tag.name {
            Some(name) if !self.tag.closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) => {
                Mode::RawText(name.clone())
            }
            _ => Mode::Content,
        }
    }

    fn quoted(&mut self, quote: char, rest: &str, at: usize) -> usize {
        match rest.find(quote) {
            Some(end) => {
                if end > 0 {
                    self.push(Token::QuotedText(rest[..end].to_string()), at..at + end);
                }
                self.push(Token::QuoteClose, at + end..at + end + 1);
                self.mode = Mode::Tag;
                end + 1
            }
            None => {
                self.push(Token::QuotedText(rest.to_string()), at..at + rest.len());
                rest.len()
            }
        }
    }

    fn comment(&mut self, rest: &str, at: usize) -> usize {
        match rest.find("-->") {
            Some(end) => {
                if end > 0 {
                    self.push(Token::CommentText(rest[..end].to_string()), at..at + end);
                }
                self.push(Token::CommentClose, at + end..at + end + 3);
                self.mode = Mode::Content;
                end + 3
            }
            None => {
                self.push(Token::CommentText(rest.to_string()), at..at + rest.len());
                rest.len()
            }
        }
    }

    fn raw_text(&mut self, tag: &str, rest: &str, at: usize) -> usize {
        let needle = format!("</{}", tag);
        // ASCII lowercasing keeps byte offsets aligned with `rest`
        match rest.to_ascii_lowercase().find(&needle) {
            Some(end) => {
                if end > 0 {
                    self.push(Token::Text(rest[..end].to_string()), at..at + end);
                }
                self.mode = Mode::Content;
                end
            }
            None => {
                self.push(Token::Text(rest.to_string()), at..at + rest.len());
                rest.len()
            }
        }
    }
}
