//! Context-sensitive escaping and character reference decoding

use std::borrow::Cow;

/// Escape text for a text-node context
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape text for a double-quoted attribute value
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        _ => None,
    })
}

/// Escape comment text so it cannot close the comment early.
///
/// Comment text may not start with `>` or `->`, contain `<!--`, `-->` or
/// `--!>`, or end with `<!-` or `-`.
pub fn escape_comment(s: &str) -> Cow<'_, str> {
    let leading = s.starts_with('>') || s.starts_with("->");
    let inner = ["<!--", "-->", "--!>"].iter().any(|seq| s.contains(seq));
    let trailing = s.ends_with('-');
    if !(leading || inner || trailing) {
        return Cow::Borrowed(s);
    }

    let mut out = s
        .replace("<!--", "&lt;!--")
        .replace("-->", "--&gt;")
        .replace("--!>", "--!&gt;");
    if out.starts_with('>') {
        out.replace_range(..1, "&gt;");
    } else if out.starts_with("->") {
        out.replace_range(..2, "-&gt;");
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    Cow::Owned(out)
}

/// Neutralize any `</tag` sequence inside a raw-text element body
pub fn escape_raw_text(tag: &str, text: &str) -> String {
    let needle = format!("</{}", tag.to_ascii_lowercase());
    // ASCII lowercasing keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (idx, _) in lower.match_indices(&needle) {
        out.push_str(&text[last..idx]);
        out.push_str("<\\/");
        last = idx + 2;
    }
    out.push_str(&text[last..]);
    out
}

fn escape_with(s: &str, replace: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    if !s.chars().any(|c| replace(c).is_some()) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match replace(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode character references in literal template text.
///
/// Unknown named references are kept as written.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_reference(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode one reference at the start of `s`, returning the char and its byte length
fn decode_reference(s: &str) -> Option<(char, usize)> {
    const MAX_REFERENCE: usize = 10;

    let semi = s.char_indices().take(MAX_REFERENCE).find(|&(_, c)| c == ';')?.0;
    let body = &s[1..semi];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let digits = body.strip_prefix('#')?;
            // from_str_radix would also take a leading sign
            let code = match digits.strip_prefix(['x', 'X']) {
                Some(hex) if hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                None if digits.bytes().all(|b| b.is_ascii_digit()) => digits.parse::<u32>().ok()?,
                _ => return None,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 1))
}
