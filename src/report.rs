//! The detailed result returned to pipeline callers.

use serde::{Deserialize, Serialize};

/// Outcome of one preprocessing call.
///
/// Invariants upheld by the dispatcher:
///
/// - `modified` is true iff `output` differs from the input
/// - `changes` is non-empty iff `modified` is true
///
/// # Examples
///
/// ```rust
/// use requote::{preprocess_with_details, Format};
///
/// let result = preprocess_with_details("key: value", Format::Yaml);
/// assert!(!result.modified);
/// assert!(result.changes.is_empty());
/// assert_eq!(result.output, "key: value");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessResult {
    /// The repaired text, or the input verbatim when nothing was repaired.
    pub output: String,
    /// Whether `output` differs from the input.
    pub modified: bool,
    /// Human-readable description of each repaired span.
    pub changes: Vec<String>,
}

impl PreprocessResult {
    /// Builds the "nothing happened" result for the given input.
    #[must_use]
    pub fn unchanged(content: &str) -> Self {
        PreprocessResult {
            output: content.to_string(),
            modified: false,
            changes: Vec::new(),
        }
    }
}
