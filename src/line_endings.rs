//! Line-ending detection and restoration.
//!
//! Pasted text arrives with whatever line breaks the source application used.
//! The engines only ever scan LF-normalized text; the dispatcher detects the
//! dominant style up front and re-expands every break in the final output,
//! including breaks that sat inside a multi-line value's buffered content.

/// The dominant line-break style of one input.
///
/// Detection checks CRLF before lone CR so a `\r\n` pair is never misread as
/// a bare carriage return. On mixed input the priority is CRLF > CR > LF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEndingStyle {
    Lf,
    CrLf,
    Cr,
}

impl LineEndingStyle {
    /// Detects the dominant style; defaults to LF for break-less input.
    #[must_use]
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEndingStyle::CrLf
        } else if content.contains('\r') {
            LineEndingStyle::Cr
        } else {
            LineEndingStyle::Lf
        }
    }

    /// Returns the literal break sequence for this style.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEndingStyle::Lf => "\n",
            LineEndingStyle::CrLf => "\r\n",
            LineEndingStyle::Cr => "\r",
        }
    }

    /// Re-expands every LF in `text` to this style.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        match self {
            LineEndingStyle::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

/// 1-based line number of a byte offset in LF-normalized text.
pub(crate) fn line_of(text: &str, pos: usize) -> usize {
    text[..pos].matches('\n').count() + 1
}

/// Normalizes all break forms to LF for scanning.
#[must_use]
pub fn normalize(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
