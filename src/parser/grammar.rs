//! Markup item grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a lexed token stream into flat markup items
pub fn parse_items(
    tokens: Vec<(Token, std::ops::Range<usize>)>,
    len: usize,
) -> Result<Vec<Spanned<Item>>, Vec<ParseError>> {
    let token_iter = tokens
        .into_iter()
        .map(|(tok, span)| (tok, SimpleSpan::from(span)));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    items_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

/// A quoted value made of a single piece is not mixed
fn collapse_parts(parts: Vec<Part>) -> AttrSource {
    match parts.as_slice() {
        [] => AttrSource::Literal(String::new()),
        [Part::Text(text)] => AttrSource::Literal(text.clone()),
        [Part::Slot(index)] => AttrSource::Slot(*index),
        _ => AttrSource::Mixed(parts),
    }
}

fn items_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Spanned<Item>>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let slot = select! {
        Token::Slot(index) => index,
    };

    let ident = select! {
        Token::Name(s) => s,
    };

    // Tag and attribute names share a shape
    let name = choice((ident.clone().map(Name::Literal), slot.clone().map(Name::Slot)))
        .map_with(|n, e| Spanned::new(n, span_range(&e.span())));

    let quoted_part = choice((
        select! { Token::QuotedText(s) => Part::Text(s) },
        slot.clone().map(Part::Slot),
    ));

    let value = choice((
        select! { Token::Quoted(s) => AttrSource::Literal(s) },
        quoted_part
            .repeated()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::QuoteOpen), just(Token::QuoteClose))
            .map(collapse_parts),
        ident.map(AttrSource::Literal),
        slot.clone().map(AttrSource::Slot),
    ));

    let attr = name
        .clone()
        .then(just(Token::Eq).ignore_then(value).or_not())
        .map_with(|(name, value), e| {
            Spanned::new(
                Attr {
                    name,
                    value: value.unwrap_or(AttrSource::Flag),
                },
                span_range(&e.span()),
            )
        });

    let open = just(Token::TagOpen)
        .ignore_then(name.clone())
        .then(attr.repeated().collect::<Vec<_>>())
        .then(choice((
            just(Token::TagEnd).to(false),
            just(Token::SelfClose).to(true),
        )))
        .map(|((name, attrs), self_closing)| Item::Open {
            name,
            attrs,
            self_closing,
        });

    let close = just(Token::CloseTagOpen)
        .ignore_then(name)
        .then_ignore(just(Token::TagEnd))
        .map(|name| Item::Close { name });

    let comment = choice((
        select! { Token::CommentText(s) => Part::Text(s) },
        slot.map(Part::Slot),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .delimited_by(just(Token::CommentOpen), just(Token::CommentClose))
    .map(Item::Comment);

    let leaf = select! {
        Token::Text(s) => Item::Text(s),
        Token::Doctype(s) => Item::Doctype(s),
        Token::Slot(index) => Item::Slot(index),
    };

    choice((open, close, comment, leaf))
        .map_with(|item, e| Spanned::new(item, span_range(&e.span())))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}
