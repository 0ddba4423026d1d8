//! Command-line argument parsing for the editor
//!
//! Supports:
//! - Opening files as tabs
//! - Jump to a line in the last opened file
//! - Overriding the theme and config file for one session

use clap::Parser;
use std::path::PathBuf;

use crate::syntax::LanguageId;

/// A tabbed code editor driven by line commands
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "A tabbed code editor driven by line commands")]
pub struct CliArgs {
    /// Files to open, one tab each
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Go to line N after opening
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,

    /// Theme id for this session (not persisted)
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,

    /// Highlighting language for the opened tab
    #[arg(long, value_name = "LANG", value_parser = parse_language)]
    pub language: Option<LanguageId>,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Auto-save interval in seconds (0 disables), overriding the config
    #[arg(long, value_name = "SECS")]
    pub auto_save: Option<u64>,
}

fn parse_language(s: &str) -> Result<LanguageId, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_and_line() {
        let args = CliArgs::parse_from(["quill", "a.py", "b.css", "--line", "12"]);
        assert_eq!(args.paths, vec![PathBuf::from("a.py"), PathBuf::from("b.css")]);
        assert_eq!(args.line, Some(12));
        assert_eq!(args.theme, None);
    }

    #[test]
    fn test_parse_language() {
        let args = CliArgs::parse_from(["quill", "--language", "JSON"]);
        assert_eq!(args.language, Some(LanguageId::Json));
        assert!(CliArgs::try_parse_from(["quill", "--language", "cobol"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
