//! Placeholder token scanning and substitution.
//!
//! A token is `{{NAME}}` where `NAME` is an uppercase identifier
//! (`[A-Z][A-Z0-9_]*`) sitting directly against the braces. Anything else
//! containing `{{` is ordinary text - template files regularly carry
//! literal double braces, e.g. JSX object literals like
//! `style={{ padding: '2rem' }}`.

use crate::template::tokens::Substitutions;

/// A `{{NAME}}` occurrence in template text.
///
/// `start..end` is the byte range of the whole delimited span, braces
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

fn is_token_start(c: u8) -> bool {
    c.is_ascii_uppercase()
}

fn is_token_char(c: u8) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == b'_'
}

/// Try to parse a token at byte offset `start` (which must point at `{{`).
/// Returns the token name and the byte offset just past the closing `}}`.
fn token_at(content: &str, start: usize) -> Option<(String, usize)> {
    let body = content[start..].strip_prefix("{{")?;
    let bytes = body.as_bytes();

    let mut len = 0;
    while len < bytes.len() {
        let c = bytes[len];
        let ok = if len == 0 {
            is_token_start(c)
        } else {
            is_token_char(c)
        };
        if !ok {
            break;
        }
        len += 1;
    }

    if len == 0 || !body[len..].starts_with("}}") {
        return None;
    }

    Some((body[..len].to_string(), start + 2 + len + 2))
}

/// Find every token occurrence in `content`, in order.
pub fn scan(content: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = content[pos..].find("{{") {
        let start = pos + offset;
        match token_at(content, start) {
            Some((name, end)) => {
                spans.push(TokenSpan { name, start, end });
                pos = end;
            }
            None => {
                // Step one byte so overlapping braces like `{{{NAME}}` are
                // still found ('{' is a single byte, so this stays on a
                // char boundary)
                pos = start + 1;
            }
        }
    }

    spans
}

/// Replace every token span using `lookup`. Replacement values are
/// inserted literally and never re-scanned. Returns the name of the first
/// token `lookup` cannot resolve.
pub fn substitute_with<F>(content: &str, lookup: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let spans = scan(content);
    if spans.is_empty() {
        return Ok(content.to_string());
    }

    let mut out = String::with_capacity(content.len());
    let mut pos = 0;
    for span in &spans {
        let value = lookup(&span.name).ok_or_else(|| span.name.clone())?;
        out.push_str(&content[pos..span.start]);
        out.push_str(&value);
        pos = span.end;
    }
    out.push_str(&content[pos..]);
    Ok(out)
}

/// Replace every token span with its mapped value. Returns the name of
/// the first token that has no substitution.
pub fn substitute(content: &str, subs: &Substitutions) -> Result<String, String> {
    substitute_with(content, |name| subs.get(name).map(str::to_string))
}
