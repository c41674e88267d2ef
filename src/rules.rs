//! Repair Rules Reference
//!
//! This module documents the behavior of the repair engines as implemented
//! by this library.
//!
//! # Overview
//!
//! The preprocessor treats pasted text as **literal**: a quote character in
//! the middle of a value is content, not a delimiter, and a backslash is a
//! backslash, not the start of an escape sequence. Each engine scans for
//! quoted value spans, decides where each span truly closes, and re-emits the
//! span with the format's proper escaping.
//!
//! # Line endings
//!
//! The dominant break style is detected once per call — CRLF is checked
//! before lone CR so a `\r\n` pair is never misread — and text is scanned in
//! LF-normalized form. The detected style is restored everywhere in the
//! output, including breaks that sat inside a multi-line value.
//!
//! # Backslash literalization
//!
//! For YAML double-quoted values and JSON strings, every backslash in a
//! value's content is doubled before quote-escaping, unconditionally. There
//! is no special-casing of sequences that look like valid escapes: the user
//! pasted `\n`, so the user gets a literal backslash-n.
//!
//! A consequence worth knowing: feeding repaired double-quoted output through
//! the preprocessor a second time doubles its backslashes again.
//!
//! ```text
//! pass 1:  say "hello"      →  say \"hello\"
//! pass 2:  say \"hello\"    →  say \\"hello\\"
//! ```
//!
//! This is deliberate. The second pass cannot know the backslashes came from
//! the first pass rather than from the user's clipboard. CSV repair and YAML
//! single-quote repair involve no backslashes and are stable under
//! reprocessing.
//!
//! # Quote escaping
//!
//! | Context | Rule |
//! |---------|------|
//! | YAML double-quoted / JSON | prefix `\` to every `"` not already preceded by a backslash |
//! | YAML single-quoted | double every `'` not adjacent to another `'` (a `''` pair is YAML's native escape) |
//! | CSV | keep pre-existing `""` pairs, double lone `"`; the quote count always comes out even |
//!
//! # YAML close confirmation
//!
//! A value's last same-line quote is only a *candidate* close; it must be
//! confirmed by one of:
//!
//! - end of input
//! - an odd quote count on the line (the unpaired quote must be the delimiter)
//! - the next line independently classifying as a key line
//!
//! Unconfirmed values buffer line by line until a later line confirms a close
//! by quote parity, or input ends and the value is force-closed from the
//! buffer.
//!
//! A *key line* is the `---` separator, an array item introducing a quoted
//! value or a nested `key:`, or a `key:`-shaped line whose key is at most 20
//! characters and 3 words and does not start with a digit. Markdown headings
//! and list/quote/code markers are never key lines; long, wordy, or
//! digit-initial "keys" read as prose or timestamps.
//!
//! # JSON boundary preference
//!
//! A quote is a boundary candidate when followed (after optional whitespace)
//! by end of input, `}`, `]`, `,`, or `:`. If no quote precedes the first
//! candidate it closes the string directly — the cheap path for valid input.
//! Otherwise candidates are preferred in order:
//!
//! 1. followed by `,`, whitespace, then `"` (a next key/value starts)
//! 2. followed by `,` then any value-starting character
//! 3. at end of input
//! 4. followed by `}`/`]` itself followed only by whitespace or another
//!    structural character — this distinguishes a real closure from content
//!    that merely resembles one, such as `"arr[0]"`
//!
//! # CSV boundary preference
//!
//! A quote is a *definite boundary* when followed by a comma or end of
//! input, or by a line break whose next line reads as a new row: a
//! comma-bearing line with no leading quote, or a line opening with a quoted
//! cell that itself closes before a comma or the end of the line. A leading
//! quote with content past its close reads as the continuation of a broken
//! multi-line cell instead. If the current row's comma count matches the
//! header's, the first definite boundary wins — the row is trusted to be
//! well-formed. On a mismatch, a quote inside the span before the first
//! boundary means unescaped content gets absorbed up to the last definite
//! boundary.
//!
//! # Known limitation
//!
//! A CSV cell whose content is inherently indistinguishable from multiple
//! adjacent cells cannot be resolved:
//!
//! ```text
//! name,note
//! x,"a","b"
//! ```
//!
//! Whether `"a","b"` is one mangled cell or two cells is unknowable from
//! the text alone. The locator closes each span at its first definite
//! boundary and leaves the extra-cell question to the downstream parser.
//! This is a documented behavior, not a bug to out-guess.
//!
//! # Failure contract
//!
//! No repair engine surfaces errors to callers. If a locator cannot place a
//! boundary, or a scan hits a state it does not understand, the dispatcher
//! returns the original input unchanged. The structural parser that runs
//! next is the single source of truth for validity; handing it the untouched
//! original on uncertainty beats emitting a corrupted rewrite.

// This module contains only documentation; no implementation code
