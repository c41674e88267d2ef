//! Input format selection.
//!
//! Callers declare which structural parser the text is destined for; the
//! declared [`Format`] picks the repair engine and the escaping rules. The
//! preprocessor never sniffs the format itself.
//!
//! ## Examples
//!
//! ```rust
//! use requote::Format;
//!
//! let f: Format = "yaml".parse().unwrap();
//! assert_eq!(f, Format::Yaml);
//! assert_eq!(f.as_str(), "yaml");
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The declared format of the pasted text.
///
/// Selects the repair engine and the quote-escaping convention:
///
/// - **Yaml**: line-oriented scan, `\"` escaping for double quotes, `''`
///   doubling for single quotes
/// - **Json**: container-aware scan, `\"` escaping
/// - **Csv**: RFC 4180 cell scan, `""` doubling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Json,
    Csv,
}

impl Format {
    /// Returns the lowercase label for this format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Parses a case-insensitive format label; `yml` is accepted as an alias
    /// for `yaml`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}
