//! JSON repair engine.
//!
//! A single forward scan tracks a stack of open container kinds and whether
//! the next string is a property name or a value. Property names run
//! unmodified to their next unescaped quote; values go through the boundary
//! locator, then literalization and escaping. Non-string literals are copied
//! verbatim by the default arm of the scan loop.

use crate::error::{Error, Result};
use crate::escape::{escape_double_quotes, literalize_backslashes};
use crate::line_endings::line_of;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

struct JsonScanner<'a> {
    input: &'a str,
    pos: usize,
    out: String,
    changes: Vec<String>,
    stack: Vec<Container>,
    expecting_value: bool,
}

/// Repairs quoting in one LF-normalized JSON document.
pub(crate) fn repair(input: &str) -> Result<(String, Vec<String>)> {
    JsonScanner::new(input).run()
}

impl<'a> JsonScanner<'a> {
    fn new(input: &'a str) -> Self {
        JsonScanner {
            input,
            pos: 0,
            out: String::with_capacity(input.len()),
            changes: Vec::new(),
            stack: Vec::new(),
            // A bare root value may be a string.
            expecting_value: true,
        }
    }

    fn run(mut self) -> Result<(String, Vec<String>)> {
        while self.pos < self.input.len() {
            let ch = self.input[self.pos..]
                .chars()
                .next()
                .ok_or_else(|| Error::Message("scan position off char boundary".into()))?;
            match ch {
                '{' => {
                    self.stack.push(Container::Object);
                    self.expecting_value = false;
                    self.emit(ch);
                }
                '[' => {
                    self.stack.push(Container::Array);
                    self.expecting_value = true;
                    self.emit(ch);
                }
                '}' | ']' => {
                    self.stack.pop();
                    self.expecting_value = false;
                    self.emit(ch);
                }
                ':' => {
                    self.expecting_value = true;
                    self.emit(ch);
                }
                ',' => {
                    self.expecting_value = !matches!(self.stack.last(), Some(Container::Object));
                    self.emit(ch);
                }
                '"' => {
                    if self.expecting_value {
                        self.rewrite_value()?;
                        self.expecting_value = false;
                    } else {
                        self.copy_name()?;
                    }
                }
                other => self.emit(other),
            }
        }
        Ok((self.out, self.changes))
    }

    fn emit(&mut self, ch: char) {
        self.out.push(ch);
        self.pos += ch.len_utf8();
    }

    /// Copies a property name verbatim through its next unescaped quote.
    fn copy_name(&mut self) -> Result<()> {
        let open = self.pos;
        let close = unescaped_quotes_from(self.input, open + 1)
            .into_iter()
            .next()
            .ok_or_else(|| Error::unterminated(line_of(self.input, open)))?;
        self.out.push_str(&self.input[open..=close]);
        self.pos = close + 1;
        Ok(())
    }

    /// Locates a value string's true close, literalizes and escapes its
    /// content, and replaces the span.
    fn rewrite_value(&mut self) -> Result<()> {
        let open = self.pos;
        let close = locate_value_close(self.input, open + 1)
            .ok_or_else(|| Error::unterminated(line_of(self.input, open)))?;
        let raw = &self.input[open + 1..close];
        let escaped = escape_double_quotes(&literalize_backslashes(raw));
        if escaped != raw {
            self.changes.push(format!(
                "line {}: escaped stray quotes in string value",
                line_of(self.input, open)
            ));
        }
        self.out.push('"');
        self.out.push_str(&escaped);
        self.out.push('"');
        self.pos = close + 1;
        Ok(())
    }
}

/// Byte positions of quotes not immediately preceded by a backslash,
/// starting at `start`.
fn unescaped_quotes_from(text: &str, start: usize) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut positions = Vec::new();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'"' && (i == 0 || bytes[i - 1] != b'\\') {
            positions.push(i);
        }
        i += 1;
    }
    positions
}

fn skip_ws(text: &str, mut pos: usize) -> usize {
    let bytes = text.as_bytes();
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\n' | b'\r') {
        pos += 1;
    }
    pos
}

fn is_structural(byte: u8) -> bool {
    matches!(byte, b'{' | b'}' | b'[' | b']' | b',' | b':' | b'"')
}

fn is_value_start(byte: u8) -> bool {
    matches!(byte, b'"' | b'{' | b'[' | b'-' | b'0'..=b'9' | b't' | b'f' | b'n')
}

/// A quote is a boundary candidate when, after optional whitespace, it is
/// followed by end-of-input, `}`, `]`, `,`, or `:`.
fn is_boundary_candidate(text: &str, quote_pos: usize) -> bool {
    let next = skip_ws(text, quote_pos + 1);
    match text.as_bytes().get(next) {
        None => true,
        Some(b'}') | Some(b']') | Some(b',') | Some(b':') => true,
        _ => false,
    }
}

/// Finds the true closing quote of a value string opening just before
/// `start`.
///
/// When no quote precedes the first boundary candidate the candidate is
/// taken directly — the cheap path for already-valid input. Otherwise the
/// preference order distinguishes a real closure from content that merely
/// resembles one (e.g. `"arr[0]"`):
///
/// 1. candidate followed by `,`, whitespace, then `"`
/// 2. candidate followed by `,` then a value-starting character
/// 3. candidate at end of input
/// 4. candidate followed by `}`/`]` itself followed only by whitespace or
///    another structural character
///
/// No rule matching ⇒ the last candidate; no candidate at all ⇒ the last
/// quote found anywhere; no quote ⇒ `None`.
fn locate_value_close(text: &str, start: usize) -> Option<usize> {
    let positions = unescaped_quotes_from(text, start);
    let candidates: Vec<usize> = positions
        .iter()
        .copied()
        .filter(|&p| is_boundary_candidate(text, p))
        .collect();

    let (&first_candidate, &first_quote) = match (candidates.first(), positions.first()) {
        (Some(c), Some(q)) => (c, q),
        (None, Some(_)) => return positions.last().copied(),
        _ => return None,
    };
    if first_quote == first_candidate {
        return Some(first_candidate);
    }

    let bytes = text.as_bytes();
    let followed_by_comma_then = |p: usize, pred: &dyn Fn(u8) -> bool| -> bool {
        let next = skip_ws(text, p + 1);
        if bytes.get(next) != Some(&b',') {
            return false;
        }
        let after_comma = skip_ws(text, next + 1);
        bytes.get(after_comma).is_some_and(|&b| pred(b))
    };

    let rule_a = |p: &&usize| followed_by_comma_then(**p, &|b| b == b'"');
    let rule_b = |p: &&usize| followed_by_comma_then(**p, &is_value_start);
    let rule_c = |p: &&usize| skip_ws(text, **p + 1) >= bytes.len();
    let rule_d = |p: &&usize| {
        let next = skip_ws(text, **p + 1);
        if !matches!(bytes.get(next), Some(b'}') | Some(b']')) {
            return false;
        }
        let after_closer = skip_ws(text, next + 1);
        match bytes.get(after_closer) {
            None => true,
            Some(&b) => is_structural(b),
        }
    };

    if let Some(&p) = candidates.iter().find(rule_a) {
        return Some(p);
    }
    if let Some(&p) = candidates.iter().find(rule_b) {
        return Some(p);
    }
    if let Some(&p) = candidates.iter().find(rule_c) {
        return Some(p);
    }
    if let Some(&p) = candidates.iter().find(rule_d) {
        return Some(p);
    }
    candidates.last().copied()
}
