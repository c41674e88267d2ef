//! YAML repair engine.
//!
//! Scans LF-normalized text line by line. A line that opens a quoted value
//! (`key: "`, `key: '`, `- "`, `- '`) is checked for a same-line close; if
//! the close cannot be confirmed the engine carries a [`MultilineValue`]
//! through subsequent lines until the multi-line locator confirms a close or
//! input ends, at which point the buffered content is force-closed.
//!
//! The close-confirmation heuristics live in standalone predicates
//! ([`single_line_close`], [`multiline_close`], [`is_key_line`]) so the edge
//! cases — prose that resembles a key, timestamps, markdown markers — can be
//! regression-tested without driving the whole engine.

use crate::error::Result;
use crate::escape::{escape_double_quotes, escape_single_quotes, literalize_backslashes};

/// Carry state for a quoted value whose opening line had no confirmed close.
///
/// A plain value threaded through the line loop; created when a value opens,
/// cleared on close, force-closed at end of input.
#[derive(Debug)]
struct MultilineValue {
    quote: char,
    start_line: usize,
    key_prefix: String,
    buffer: Vec<String>,
}

/// A line that introduces a quoted value.
struct Opening<'a> {
    /// Everything up to and including the opening quote.
    prefix: &'a str,
    quote: char,
    /// Everything after the opening quote.
    remainder: &'a str,
}

/// Repairs quoting in one LF-normalized YAML document.
///
/// Returns the rewritten text plus one change entry per repaired value.
pub(crate) fn repair(input: &str) -> Result<(String, Vec<String>)> {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut changes: Vec<String> = Vec::new();
    let mut open: Option<MultilineValue> = None;

    for (idx, line) in lines.iter().enumerate() {
        if let Some(mut state) = open.take() {
            match multiline_close(line, state.quote) {
                Some(close) => {
                    state.buffer.push(line[..close].to_string());
                    let raw = state.buffer.join("\n");
                    let escaped = escape_value(&raw, state.quote);
                    if escaped != raw {
                        changes.push(format!(
                            "line {}: escaped stray quotes in multi-line {} value",
                            state.start_line,
                            quote_name(state.quote)
                        ));
                    }
                    let trailer = &line[close + 1..];
                    let rebuilt =
                        format!("{}{}{}{}", state.key_prefix, escaped, state.quote, trailer);
                    out.extend(rebuilt.split('\n').map(str::to_string));
                }
                None => {
                    state.buffer.push((*line).to_string());
                    open = Some(state);
                }
            }
            continue;
        }

        let Some(opening) = match_opening(line) else {
            out.push((*line).to_string());
            continue;
        };

        let next = lines.get(idx + 1).copied();
        match single_line_close(opening.remainder, opening.quote, next) {
            Some(close) => {
                let raw = &opening.remainder[..close];
                let escaped = escape_value(raw, opening.quote);
                if escaped != raw {
                    changes.push(format!(
                        "line {}: escaped stray quotes in {} value",
                        idx + 1,
                        quote_name(opening.quote)
                    ));
                }
                let trailer = &opening.remainder[close + 1..];
                out.push(format!(
                    "{}{}{}{}",
                    opening.prefix, escaped, opening.quote, trailer
                ));
            }
            None => {
                open = Some(MultilineValue {
                    quote: opening.quote,
                    start_line: idx + 1,
                    key_prefix: opening.prefix.to_string(),
                    buffer: vec![opening.remainder.to_string()],
                });
            }
        }
    }

    // Safety net: input ended inside a quoted value.
    if let Some(state) = open {
        let raw = state.buffer.join("\n");
        let escaped = escape_value(&raw, state.quote);
        changes.push(format!(
            "line {}: closed unterminated {} value at end of input",
            state.start_line,
            quote_name(state.quote)
        ));
        let rebuilt = format!("{}{}{}", state.key_prefix, escaped, state.quote);
        out.extend(rebuilt.split('\n').map(str::to_string));
    }

    Ok((out.join("\n"), changes))
}

fn quote_name(quote: char) -> &'static str {
    if quote == '"' {
        "double-quoted"
    } else {
        "single-quoted"
    }
}

fn escape_value(raw: &str, quote: char) -> String {
    if quote == '"' {
        escape_double_quotes(&literalize_backslashes(raw))
    } else {
        escape_single_quotes(raw)
    }
}

/// Matches a line that opens a quoted value: `key: "`, `key: '`, `- "`, `- '`.
///
/// Block-scalar headers (`key: |`, `key: >`) and comment lines are skipped
/// untouched. The key may itself be quoted; the colon must be followed by
/// whitespace (or end the line) to count as a key separator.
fn match_opening(line: &str) -> Option<Opening<'_>> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }

    if let Some(colon) = key_colon_index(line) {
        let key = line[..colon].trim_start();
        let key = key.strip_prefix("- ").map_or(key, str::trim_start);
        if plausible_key(key) {
            let after = &line[colon + 1..];
            let value_offset = after.len() - after.trim_start().len();
            let value = &after[value_offset..];
            if let Some(first) = value.chars().next() {
                if first == '|' || first == '>' {
                    return None;
                }
                if first == '"' || first == '\'' {
                    let quote_at = colon + 1 + value_offset;
                    return Some(Opening {
                        prefix: &line[..quote_at + 1],
                        quote: first,
                        remainder: &line[quote_at + 1..],
                    });
                }
            }
        }
    }

    // Plain array item introducing a quoted scalar: `- "…` / `- '…`.
    if let Some(rest) = trimmed.strip_prefix("- ") {
        let inner_offset = rest.len() - rest.trim_start().len();
        let inner = &rest[inner_offset..];
        let first = inner.chars().next()?;
        if first == '"' || first == '\'' {
            let quote_at = (line.len() - trimmed.len()) + 2 + inner_offset;
            return Some(Opening {
                prefix: &line[..quote_at + 1],
                quote: first,
                remainder: &line[quote_at + 1..],
            });
        }
    }

    None
}

/// A key is plausible when it carries no quote characters at all, or is a
/// fully quoted key like `"my key"`. A stray opening quote before the colon
/// means the colon sits inside a quoted scalar, not after a key.
fn plausible_key(key: &str) -> bool {
    let has_quote = key.contains('"') || key.contains('\'');
    if !has_quote {
        return true;
    }
    let mut chars = key.chars();
    match (chars.next(), key.chars().last()) {
        (Some(open), Some(close)) => {
            key.chars().count() >= 2 && (open == '"' || open == '\'') && open == close
        }
        _ => false,
    }
}

/// Finds the first colon acting as a key separator (followed by whitespace).
fn key_colon_index(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            match bytes.get(i + 1) {
                Some(b' ') | Some(b'\t') => return Some(i),
                _ => {}
            }
        }
    }
    None
}

/// Byte positions of quote characters that can delimit the value.
///
/// For double quotes a position immediately preceded by a backslash is an
/// escape and is skipped; single quotes have no backslash mechanism so every
/// occurrence counts (native `''` pairs contribute two positions, keeping
/// the parity checks honest).
fn quote_positions(text: &str, quote: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut prev: Option<char> = None;
    for (i, ch) in text.char_indices() {
        if ch == quote && !(quote == '"' && prev == Some('\\')) {
            positions.push(i);
        }
        prev = Some(ch);
    }
    positions
}

/// True when nothing meaningful follows a candidate closing quote.
fn trailing_is_insignificant(after: &str) -> bool {
    let t = after.trim_start();
    t.is_empty() || t.starts_with('#')
}

/// Single-line locator: byte offset of the confirmed closing quote, if any.
///
/// The last quote on the line is a candidate close when only whitespace or a
/// comment follows it; the candidate is confirmed by end of input, by an odd
/// quote count (the unpaired quote must be the delimiter), or by the next
/// line independently classifying as a key line.
fn single_line_close(remainder: &str, quote: char, next_line: Option<&str>) -> Option<usize> {
    let positions = quote_positions(remainder, quote);
    let last = *positions.last()?;
    if !trailing_is_insignificant(&remainder[last + quote.len_utf8()..]) {
        return None;
    }
    let confirmed = next_line.is_none()
        || positions.len() % 2 == 1
        || next_line.map_or(false, is_key_line);
    confirmed.then_some(last)
}

/// Multi-line locator: same trailing check, confirmed purely by parity.
///
/// Odd count means the last quote is the unpaired true close; even count
/// means every quote on the line pairs up internally and the value continues.
fn multiline_close(line: &str, quote: char) -> Option<usize> {
    let positions = quote_positions(line, quote);
    let last = *positions.last()?;
    if !trailing_is_insignificant(&line[last + quote.len_utf8()..]) {
        return None;
    }
    (positions.len() % 2 == 1).then_some(last)
}

/// Classifies whether a line reads as the start of a new YAML entry rather
/// than the continuation of prose inside an unterminated value.
///
/// Key lines: the `---` document separator; an array item introducing a
/// quoted value or a nested `key:`; or a `key:`-shaped line whose key stays
/// within 20 characters and 3 words and does not start with a digit (longer
/// keys, wordier keys, and digit-initial keys indicate prose or a
/// timestamp). Markdown headings and list/quote/code markers outside the
/// array-item forms are never key lines.
pub(crate) fn is_key_line(line: &str) -> bool {
    let t = line.trim();
    if t == "---" {
        return true;
    }
    if t.starts_with('#') {
        return false;
    }
    if let Some(rest) = t.strip_prefix("- ") {
        let rest = rest.trim_start();
        return rest.starts_with('"') || rest.starts_with('\'') || looks_like_key(rest);
    }
    if t.starts_with('-') || t.starts_with('*') || t.starts_with('>') || t.starts_with('`') {
        return false;
    }
    looks_like_key(t)
}

/// `key:` shape check shared by top-level lines and array items.
fn looks_like_key(t: &str) -> bool {
    let Some(idx) = t.find(':') else {
        return false;
    };
    let separator_ok = match t.as_bytes().get(idx + 1) {
        None => true,
        Some(b' ') | Some(b'\t') => true,
        _ => false,
    };
    if !separator_ok {
        return false;
    }
    let key = t[..idx].trim();
    if key.is_empty() || key.len() > 20 {
        return false;
    }
    if key.split_whitespace().count() > 3 {
        return false;
    }
    !key.chars().next().is_some_and(|c| c.is_ascii_digit())
}
