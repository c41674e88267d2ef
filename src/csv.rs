//! CSV repair engine (RFC 4180).
//!
//! A cell opens "quoted" when `"` appears at input start or right after a
//! comma or line break; anything else is an unquoted cell running to the next
//! comma or line break. Quoted cells go through the boundary locator and the
//! RFC 4180 escaper; unquoted cells containing any quote character are
//! rewrapped in quotes with every quote doubled.
//!
//! One class of input stays unresolved by design: a quoted cell whose content
//! is inherently indistinguishable from multiple adjacent cells. When the
//! row's comma count matches the header's, the locator trusts the row and
//! closes at the first definite boundary; see [`crate::rules`].

use crate::error::{Error, Result};
use crate::escape::escape_csv_quotes;
use crate::line_endings::line_of;

/// Repairs quoting in one LF-normalized CSV document.
pub(crate) fn repair(input: &str) -> Result<(String, Vec<String>)> {
    let header_commas = input
        .split('\n')
        .next()
        .map_or(0, |line| line.matches(',').count());

    let mut out = String::with_capacity(input.len());
    let mut changes: Vec<String> = Vec::new();
    let mut pos = 0;
    let mut at_cell_start = true;

    while pos < input.len() {
        if !at_cell_start {
            // Separator or trailing content after a closed cell.
            let ch = input[pos..]
                .chars()
                .next()
                .ok_or_else(|| Error::Message("scan position off char boundary".into()))?;
            out.push(ch);
            if ch == ',' || ch == '\n' {
                at_cell_start = true;
            }
            pos += ch.len_utf8();
            continue;
        }

        match input.as_bytes()[pos] {
            b'"' => {
                let line = line_of(input, pos);
                let row_commas = current_line(input, pos).matches(',').count();
                let close = locate_cell_close(input, pos + 1, row_commas, header_commas)
                    .ok_or_else(|| Error::unterminated(line))?;
                let raw = &input[pos + 1..close];
                let escaped = escape_csv_quotes(raw);
                if escaped != raw {
                    changes.push(format!("line {line}: escaped stray quotes in quoted cell"));
                }
                out.push('"');
                out.push_str(&escaped);
                out.push('"');
                pos = close + 1;
                at_cell_start = false;
            }
            b',' | b'\n' => {
                // Empty cell.
                out.push(input.as_bytes()[pos] as char);
                pos += 1;
            }
            _ => {
                let end = input[pos..]
                    .find(|c| c == ',' || c == '\n')
                    .map_or(input.len(), |offset| pos + offset);
                let cell = &input[pos..end];
                if cell.contains('"') {
                    out.push('"');
                    out.push_str(&cell.replace('"', "\"\""));
                    out.push('"');
                    changes.push(format!(
                        "line {}: wrapped unquoted cell containing quotes",
                        line_of(input, pos)
                    ));
                } else {
                    out.push_str(cell);
                }
                pos = end;
                at_cell_start = false;
            }
        }
    }

    Ok((out, changes))
}

/// The physical line containing `pos`.
fn current_line(input: &str, pos: usize) -> &str {
    let start = input[..pos].rfind('\n').map_or(0, |i| i + 1);
    let end = input[pos..]
        .find('\n')
        .map_or(input.len(), |offset| pos + offset);
    &input[start..end]
}

/// A quote is a definite boundary when followed by a comma or end of input,
/// or by a line break where what follows reads as a new row: a comma-bearing
/// line with no leading quote, or a line opening with a quoted cell that
/// itself closes before a comma or the end of the line. The latter
/// distinguishes a new row's first cell from the continuation of a broken
/// multi-line cell, which carries quotes mid-line.
fn is_definite_boundary(text: &str, quote_pos: usize) -> bool {
    match text.as_bytes().get(quote_pos + 1) {
        None => true,
        Some(b',') => true,
        Some(b'\n') => {
            let rest = &text[quote_pos + 2..];
            let next_line = rest.split('\n').next().unwrap_or("");
            if next_line.starts_with('"') {
                leads_with_closed_cell(next_line)
            } else {
                next_line.contains(',')
            }
        }
        _ => false,
    }
}

/// True when `line` opens with a quoted cell whose closing quote (skipping
/// `""` pairs) is followed by a comma or ends the line.
fn leads_with_closed_cell(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'"') {
        return false;
    }
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
                continue;
            }
            return matches!(bytes.get(i + 1), None | Some(b','));
        }
        i += 1;
    }
    false
}

/// Finds the true closing quote of a quoted cell opening just before
/// `start`.
///
/// With the row's comma count equal to the header's, the row is trusted to
/// be well-formed and the first definite boundary wins. On a mismatch, a
/// quote inside the span before the first boundary means unescaped content
/// should be absorbed into the cell, so the last definite boundary wins;
/// without such a quote the first still does. No definite boundary at all
/// falls back to the last quote found anywhere in the remaining text.
fn locate_cell_close(
    text: &str,
    start: usize,
    row_commas: usize,
    header_commas: usize,
) -> Option<usize> {
    let quotes: Vec<usize> = text
        .bytes()
        .enumerate()
        .skip(start)
        .filter_map(|(i, b)| (b == b'"').then_some(i))
        .collect();
    let definite: Vec<usize> = quotes
        .iter()
        .copied()
        .filter(|&p| is_definite_boundary(text, p))
        .collect();

    let &first = match definite.first() {
        Some(first) => first,
        None => return quotes.last().copied(),
    };
    if row_commas == header_commas {
        return Some(first);
    }
    if text[start..first].contains('"') {
        return definite.last().copied();
    }
    Some(first)
}
