//! Language profiles: ordered lexical rules per language
//!
//! Each profile is immutable data built once on first use. Rule order matters:
//! the highlighter applies rules in sequence and later rules win where their
//! spans overlap earlier ones.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::highlights::TokenCategory;
use super::languages::LanguageId;

/// A single named token rule
#[derive(Debug)]
pub struct TokenRule {
    pub category: TokenCategory,
    pub pattern: Regex,
}

impl TokenRule {
    /// Compile a rule. Patterns are compiled in multi-line mode so `^`/`$`
    /// anchor at line boundaries.
    ///
    /// Panics on a malformed pattern: rule tables are static data and every
    /// builtin profile is compiled in tests.
    fn new(category: TokenCategory, pattern: &str) -> Self {
        let pattern = Regex::new(&format!("(?m){}", pattern))
            .unwrap_or_else(|e| panic!("invalid {} rule {:?}: {}", category, pattern, e));
        Self { category, pattern }
    }
}

/// Ordered token rules for one language
#[derive(Debug)]
pub struct LanguageProfile {
    pub id: LanguageId,
    rules: Vec<TokenRule>,
    reserved_words: HashSet<&'static str>,
    builtins: HashSet<&'static str>,
}

impl LanguageProfile {
    fn new(id: LanguageId, rules: &[(TokenCategory, &str)]) -> Self {
        Self {
            id,
            rules: rules
                .iter()
                .map(|&(category, pattern)| TokenRule::new(category, pattern))
                .collect(),
            reserved_words: HashSet::new(),
            builtins: HashSet::new(),
        }
    }

    fn with_words(mut self, reserved: &[&'static str], builtins: &[&'static str]) -> Self {
        self.reserved_words = reserved.iter().copied().collect();
        self.builtins = builtins.iter().copied().collect();
        self
    }

    /// Rules in application order
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// Whether `word` is a reserved word of this language (Python only)
    pub fn is_reserved_word(&self, word: &str) -> bool {
        self.reserved_words.contains(word)
    }

    /// Whether `word` names a builtin of this language (Python only)
    pub fn is_builtin(&self, word: &str) -> bool {
        self.builtins.contains(word)
    }

    /// Look up the builtin profile for a language
    pub fn get(id: LanguageId) -> &'static LanguageProfile {
        match id {
            LanguageId::Python => &PYTHON,
            LanguageId::Html => &HTML,
            LanguageId::Css => &CSS,
            LanguageId::JavaScript => &JAVASCRIPT,
            LanguageId::Json => &JSON,
        }
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const PYTHON_BUILTINS: &[&str] = &[
    "abs", "aiter", "all", "anext", "any", "ascii", "bin", "bool", "breakpoint", "bytearray",
    "bytes", "callable", "chr", "classmethod", "compile", "complex", "delattr", "dict", "dir",
    "divmod", "enumerate", "eval", "exec", "filter", "float", "format", "frozenset", "getattr",
    "globals", "hasattr", "hash", "help", "hex", "id", "input", "int", "isinstance",
    "issubclass", "iter", "len", "list", "locals", "map", "max", "memoryview", "min", "next",
    "object", "oct", "open", "ord", "pow", "print", "property", "range", "repr", "reversed",
    "round", "set", "setattr", "slice", "sorted", "staticmethod", "str", "sum", "super",
    "tuple", "type", "vars", "zip", "Exception", "ValueError", "TypeError", "KeyError",
    "IndexError", "RuntimeError", "NotImplemented", "Ellipsis",
];

static PYTHON: LazyLock<LanguageProfile> = LazyLock::new(|| {
    LanguageProfile::new(
        LanguageId::Python,
        &[
            (
                TokenCategory::Keyword,
                r"\b(def|class|if|else|elif|for|while|try|except|import|from|as|return|break|continue)\b",
            ),
            (
                TokenCategory::Builtin,
                r"\b(print|len|str|int|float|list|dict|set|tuple|range|enumerate|zip)\b",
            ),
            (TokenCategory::String, r#"(".*?"|'.*?')"#),
            (TokenCategory::Comment, r"(#.*$)"),
            (TokenCategory::Number, r"\b(\d+)\b"),
        ],
    )
    .with_words(PYTHON_KEYWORDS, PYTHON_BUILTINS)
});

static HTML: LazyLock<LanguageProfile> = LazyLock::new(|| {
    LanguageProfile::new(
        LanguageId::Html,
        &[
            (TokenCategory::Tag, r"(<[^>]*>)"),
            (TokenCategory::Attribute, r"\s([a-zA-Z-]+)="),
            (TokenCategory::String, r#"(".*?"|'.*?')"#),
            (TokenCategory::Comment, r"(?s)(<!--.*?-->)"),
        ],
    )
});

static CSS: LazyLock<LanguageProfile> = LazyLock::new(|| {
    LanguageProfile::new(
        LanguageId::Css,
        &[
            (TokenCategory::Selector, r"([^\{\}]+)\{"),
            (TokenCategory::Property, r"([\w-]+)\s*:"),
            (TokenCategory::Value, r":\s*([^;]+);"),
            (TokenCategory::Comment, r"(?s)(/\*.*?\*/)"),
            (TokenCategory::Number, r"\b(\d+\.?\d*)\b"),
        ],
    )
});

static JAVASCRIPT: LazyLock<LanguageProfile> = LazyLock::new(|| {
    LanguageProfile::new(
        LanguageId::JavaScript,
        &[
            (
                TokenCategory::Keyword,
                r"\b(function|var|let|const|if|else|for|while|do|switch|case|break|return|try|catch|finally|class|extends|new|this)\b",
            ),
            (
                TokenCategory::Builtin,
                r"\b(console|document|window|Array|Object|String|Number|Boolean|Function|Symbol|RegExp)\b",
            ),
            (TokenCategory::String, r#"(".*?"|'.*?'|(?s:`.*?`))"#),
            (TokenCategory::Comment, r"((?s:/\*.*?\*/)|//.*$)"),
            (TokenCategory::Number, r"\b(\d+\.?\d*)\b"),
        ],
    )
});

static JSON: LazyLock<LanguageProfile> = LazyLock::new(|| {
    LanguageProfile::new(
        LanguageId::Json,
        &[
            (TokenCategory::String, r#"(".*?")"#),
            (TokenCategory::Number, r"\b(\d+\.?\d*)\b"),
            (TokenCategory::Keyword, r"\b(true|false|null)\b"),
            (TokenCategory::Punctuation, r"([\{\}\[\],:])"),
        ],
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_builtin_profiles_compile() {
        for lang in LanguageId::ALL {
            let profile = LanguageProfile::get(lang);
            assert_eq!(profile.id, lang);
            assert!(!profile.rules().is_empty());
        }
    }

    #[test]
    fn test_rule_order_is_preserved() {
        let categories: Vec<_> = LanguageProfile::get(LanguageId::Json)
            .rules()
            .iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                TokenCategory::String,
                TokenCategory::Number,
                TokenCategory::Keyword,
                TokenCategory::Punctuation,
            ]
        );
    }

    #[test]
    fn test_python_word_sets() {
        let python = LanguageProfile::get(LanguageId::Python);
        assert!(python.is_reserved_word("lambda"));
        assert!(python.is_reserved_word("None"));
        assert!(!python.is_reserved_word("print"));
        assert!(python.is_builtin("print"));
        assert!(python.is_builtin("isinstance"));
        assert!(!python.is_builtin("def"));
    }

    #[test]
    fn test_word_sets_empty_for_other_languages() {
        let js = LanguageProfile::get(LanguageId::JavaScript);
        assert!(!js.is_reserved_word("function"));
        assert!(!js.is_builtin("console"));
    }

    #[test]
    fn test_comment_rule_anchors_at_line_end() {
        let python = LanguageProfile::get(LanguageId::Python);
        let comment = python
            .rules()
            .iter()
            .find(|r| r.category == TokenCategory::Comment)
            .unwrap();
        let m = comment.pattern.find("x = 1  # note\ny = 2").unwrap();
        assert_eq!(m.as_str(), "# note");
    }
}
