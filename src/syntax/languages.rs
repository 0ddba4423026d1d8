//! Language identification and detection
//!
//! Maps file extensions to language IDs and provides language metadata.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    Python,
    Html,
    Css,
    JavaScript,
    Json,
}

impl LanguageId {
    /// All languages, in the order they appear in the language menu
    pub const ALL: [LanguageId; 5] = [
        LanguageId::Python,
        LanguageId::Html,
        LanguageId::Css,
        LanguageId::JavaScript,
        LanguageId::Json,
    ];

    /// Detect language from file extension (without the leading dot)
    ///
    /// Unknown extensions fall back to Python.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "py" => LanguageId::Python,
            "html" => LanguageId::Html,
            "css" => LanguageId::Css,
            "js" => LanguageId::JavaScript,
            "json" => LanguageId::Json,
            _ => LanguageId::default(),
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Stable identifier used in config and commands ("python", "javascript", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::Html => "html",
            LanguageId::Css => "css",
            LanguageId::JavaScript => "javascript",
            LanguageId::Json => "json",
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::Python => "Python",
            LanguageId::Html => "Html",
            LanguageId::Css => "Css",
            LanguageId::JavaScript => "Javascript",
            LanguageId::Json => "Json",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageId::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown language: {}", s))
    }
}
