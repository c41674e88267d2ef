//! Backslash literalization and the per-format quote escapers.
//!
//! All four functions take a value's raw inner content (delimiters already
//! stripped) and return the escaped form. They are deliberately tiny and
//! independent so each rule can be regression-tested in isolation.
//!
//! The guiding rule for pasted text: a backslash the user typed is a literal
//! backslash, never the start of an escape sequence. Literalization runs once,
//! before quote-escaping, for YAML double-quoted values and JSON strings.
//! YAML single-quoted values have no backslash mechanism and CSV cells treat
//! backslashes as plain data, so neither is literalized.

/// Doubles every backslash, unconditionally.
///
/// No special-casing of sequences that happen to look like valid escapes:
/// `\n` becomes `\\n`, `\"` becomes `\\"`.
#[must_use]
pub fn literalize_backslashes(content: &str) -> String {
    content.replace('\\', "\\\\")
}

/// Escapes `"` for YAML double-quoted values and JSON strings.
///
/// Every `"` not immediately preceded by a backslash gets a `\` prefix.
/// Because literalization already ran, a quote that arrived as part of a
/// pre-existing `\"` pair now follows a doubled backslash and is skipped
/// here, so reprocessed input doubles its backslashes rather than growing
/// an escape per pass.
#[must_use]
pub fn escape_double_quotes(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut prev: Option<char> = None;
    for ch in content.chars() {
        if ch == '"' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}

/// Escapes `'` for YAML single-quoted values.
///
/// A lone `'` is doubled; a quote adjacent to another quote is already part
/// of YAML's native `''` escape and is left untouched.
#[must_use]
pub fn escape_single_quotes(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    for (i, &ch) in chars.iter().enumerate() {
        if ch == '\'' {
            let prev_is_quote = i > 0 && chars[i - 1] == '\'';
            let next_is_quote = chars.get(i + 1) == Some(&'\'');
            if !prev_is_quote && !next_is_quote {
                out.push('\'');
            }
        }
        out.push(ch);
    }
    out
}

/// Escapes `"` inside a CSV cell per RFC 4180.
///
/// A pre-existing `""` pair is consumed and kept as-is; a lone `"` is
/// doubled. A cell consisting only of quote characters therefore always
/// comes out with an even, parseable count: pairs survive and the one
/// possible odd leftover gets doubled.
#[must_use]
pub fn escape_csv_quotes(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '"' {
            if chars.get(i + 1) == Some(&'"') {
                out.push_str("\"\"");
                i += 2;
                continue;
            }
            out.push_str("\"\"");
        } else {
            out.push(chars[i]);
        }
        i += 1;
    }
    out
}
