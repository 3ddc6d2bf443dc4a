//! Source-language tags.
//!
//! Every snippet is simulated under exactly one [`Language`].  The tag selects
//! the declaration rules, output-call syntax, and interpolation markers used by
//! the pipeline (see [`crate::snippet::dialect`]).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported snippet language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    Kotlin,
    Java,
    Python,
    JavaScript,
    Swift,
}

impl Language {
    /// All languages, in table order.
    pub const ALL: [Language; 5] = [
        Language::Kotlin,
        Language::Java,
        Language::Python,
        Language::JavaScript,
        Language::Swift,
    ];

    /// Position of this language in [`Language::ALL`].
    pub fn index(self) -> usize {
        match self {
            Language::Kotlin => 0,
            Language::Java => 1,
            Language::Python => 2,
            Language::JavaScript => 3,
            Language::Swift => 4,
        }
    }

    /// The canonical upper-case tag (`KOTLIN`, `JAVA`, …).
    pub fn tag(self) -> &'static str {
        match self {
            Language::Kotlin => "KOTLIN",
            Language::Java => "JAVA",
            Language::Python => "PYTHON",
            Language::JavaScript => "JAVASCRIPT",
            Language::Swift => "SWIFT",
        }
    }

    /// Guess the language from a file name's extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "kt" | "kts" => Some(Language::Kotlin),
            "java" => Some(Language::Java),
            "py" => Some(Language::Python),
            "js" | "mjs" | "cjs" => Some(Language::JavaScript),
            "swift" => Some(Language::Swift),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a tag names no supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language '{}' is not supported", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Case-insensitive; accepts the canonical tag and common short names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kotlin" | "kt" | "kts" => Ok(Language::Kotlin),
            "java" => Ok(Language::Java),
            "python" | "py" | "python3" => Ok(Language::Python),
            "javascript" | "js" | "node" | "ecmascript" => Ok(Language::JavaScript),
            "swift" => Ok(Language::Swift),
            _ => Err(UnknownLanguage(s.to_owned())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
