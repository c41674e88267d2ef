//! # requote
//!
//! Quote-repair preprocessing for pasted YAML, JSON, and CSV.
//!
//! ## Why?
//!
//! Text pasted from chat tools, email, or spreadsheets routinely contains
//! quote characters inside quoted string values that were never escaped:
//!
//! ```text
//! description: "she said "hi" to me"
//! ```
//!
//! A strict structural parser rejects this outright. `requote` runs *before*
//! that parser: it locates quoted value spans, disambiguates each span's true
//! closing delimiter when naive scanning is insufficient, and rewrites the
//! text so the strict parser can consume it — without altering text that is
//! already valid.
//!
//! ## Key properties
//!
//! - **Total**: [`preprocess`] never panics and never errors. Any internal
//!   fault returns the input unchanged; the real parser downstream is the
//!   authority on validity.
//! - **Conservative**: a document that needs no repair passes through
//!   byte-identical, mixed line endings included.
//! - **Line-ending preserving**: the dominant break style (CRLF > CR > LF on
//!   mixed input) is detected up front and restored everywhere in the output,
//!   including breaks inside multi-line values.
//! - **Literal paste semantics**: backslashes in repaired values are treated
//!   as literal characters, never as escape sequences. See [`rules`] for the
//!   consequences when reprocessing already-escaped text.
//!
//! ## Quick Start
//!
//! ```rust
//! use requote::{preprocess, Format};
//!
//! let fixed = preprocess(r#"description: "say "hello" world""#, Format::Yaml);
//! assert_eq!(fixed, r#"description: "say \"hello\" world""#);
//!
//! // Already-valid input is untouched.
//! let valid = r#"{"name": "Alice"}"#;
//! assert_eq!(preprocess(valid, Format::Json), valid);
//! ```
//!
//! ## Detailed results
//!
//! ```rust
//! use requote::{preprocess_with_details, Format};
//!
//! let result = preprocess_with_details("A,B\ntest \"value\",other", Format::Csv);
//! assert!(result.modified);
//! assert_eq!(result.output, "A,B\n\"test \"\"value\"\"\",other");
//! assert_eq!(result.changes.len(), 1);
//! ```
//!
//! ## What this is not
//!
//! Not a general grammar-repair tool: missing commas, unbalanced braces, and
//! structural errors unrelated to quoting are left for the downstream parser
//! to report. Field semantics are never validated. One CSV case — a cell
//! inherently indistinguishable from multiple adjacent cells — is a
//! documented limitation rather than a guess; see [`rules`].

pub mod error;
pub mod escape;
pub mod format;
pub mod line_endings;
pub mod report;
pub mod rules;

mod csv;
mod json;
mod yaml;

pub use error::{Error, Result};
pub use format::Format;
pub use line_endings::LineEndingStyle;
pub use report::PreprocessResult;

/// Repairs quoting in `content` for the declared `format`.
///
/// Always returns a string: on any internal fault the input comes back
/// unchanged. Pure function, no I/O, no shared state.
///
/// # Examples
///
/// ```rust
/// use requote::{preprocess, Format};
///
/// let fixed = preprocess("description: 'it's broken'", Format::Yaml);
/// assert_eq!(fixed, "description: 'it''s broken'");
/// ```
#[must_use]
pub fn preprocess(content: &str, format: Format) -> String {
    preprocess_with_details(content, format).output
}

/// Repairs quoting and reports what changed.
///
/// Same failure contract as [`preprocess`]: an internal fault degrades to
/// `{output: content, modified: false, changes: []}`.
///
/// Invariants: `modified` is true iff `output` differs from `content`, and
/// `changes` is non-empty iff `modified` is true.
#[must_use]
pub fn preprocess_with_details(content: &str, format: Format) -> PreprocessResult {
    match run(content, format) {
        Ok(result) => result,
        Err(_) => PreprocessResult::unchanged(content),
    }
}

fn run(content: &str, format: Format) -> Result<PreprocessResult> {
    if content.trim().is_empty() {
        return Ok(PreprocessResult::unchanged(content));
    }

    let style = LineEndingStyle::detect(content);
    let normalized = line_endings::normalize(content);

    let (repaired, changes) = match format {
        Format::Yaml => yaml::repair(&normalized)?,
        Format::Json => json::repair(&normalized)?,
        Format::Csv => csv::repair(&normalized)?,
    };

    // Nothing repaired: hand back the original bytes, mixed endings and all.
    if changes.is_empty() {
        return Ok(PreprocessResult::unchanged(content));
    }

    let output = style.restore(&repaired);
    if output == content {
        return Ok(PreprocessResult::unchanged(content));
    }
    Ok(PreprocessResult {
        output,
        modified: true,
        changes,
    })
}
