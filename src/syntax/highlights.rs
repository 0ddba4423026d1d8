//! Syntax highlighting data structures and the rule scanner
//!
//! Highlighting is a pure function of the text and a language profile: every
//! rule is run over the whole text, in profile order, and each match becomes
//! a [`Span`]. Spans are then folded into a [`HighlightMap`] where later
//! spans overwrite earlier ones on overlap.

use std::collections::BTreeMap;
use std::fmt;

use super::profiles::LanguageProfile;
use crate::theme::{Color, Theme};

/// Lexical class of a highlighted span. The name doubles as the theme key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Keyword,
    Builtin,
    String,
    Comment,
    Number,
    Tag,
    Attribute,
    Selector,
    Property,
    Value,
    Punctuation,
}

impl TokenCategory {
    pub const ALL: [TokenCategory; 11] = [
        TokenCategory::Keyword,
        TokenCategory::Builtin,
        TokenCategory::String,
        TokenCategory::Comment,
        TokenCategory::Number,
        TokenCategory::Tag,
        TokenCategory::Attribute,
        TokenCategory::Selector,
        TokenCategory::Property,
        TokenCategory::Value,
        TokenCategory::Punctuation,
    ];

    /// Theme key for this category
    pub fn name(&self) -> &'static str {
        match self {
            TokenCategory::Keyword => "keyword",
            TokenCategory::Builtin => "builtin",
            TokenCategory::String => "string",
            TokenCategory::Comment => "comment",
            TokenCategory::Number => "number",
            TokenCategory::Tag => "tag",
            TokenCategory::Attribute => "attribute",
            TokenCategory::Selector => "selector",
            TokenCategory::Property => "property",
            TokenCategory::Value => "value",
            TokenCategory::Punctuation => "punctuation",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open character range `[start, end)` tagged with a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub category: TokenCategory,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A resolved, non-overlapping run ready for the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledRun {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

/// Scan `text` with every rule of `profile`, in order.
///
/// Spans of one rule come out in ascending order; spans of a later rule
/// follow all spans of earlier rules. Offsets are in characters.
pub fn highlight(text: &str, profile: &LanguageProfile) -> Vec<Span> {
    let mut spans = Vec::new();
    if text.is_empty() {
        return spans;
    }

    let ascii = text.is_ascii();
    for rule in profile.rules() {
        let mut offsets = CharOffsets::new(text);
        for m in rule.pattern.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            let (start, end) = if ascii {
                (m.start(), m.end())
            } else {
                (offsets.to_char(m.start()), offsets.to_char(m.end()))
            };
            spans.push(Span {
                category: rule.category,
                start,
                end,
            });
        }
    }

    tracing::trace!(
        language = %profile.id,
        spans = spans.len(),
        "highlighted {} bytes",
        text.len()
    );
    spans
}

/// Highlight and resolve colors against `theme` in one step
pub fn highlight_styled(text: &str, profile: &LanguageProfile, theme: &Theme) -> Vec<StyledRun> {
    HighlightMap::from_spans(&highlight(text, profile)).styled(theme)
}

/// Forward-only byte → char offset converter.
///
/// Regex matches report byte offsets; spans use character offsets. Within one
/// rule the queried offsets never decrease, so a single forward walk suffices.
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    fn to_char(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// Last-write-wins interval map of token categories.
///
/// Painting a span removes whatever it covers (splitting partially covered
/// runs) and inserts the new run, so the map always holds disjoint runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightMap {
    /// start → (end, category)
    runs: BTreeMap<usize, (usize, TokenCategory)>,
}

impl HighlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold spans in order; later spans win on overlap
    pub fn from_spans(spans: &[Span]) -> Self {
        let mut map = Self::new();
        for span in spans {
            map.paint(*span);
        }
        map
    }

    /// Apply one span on top of the current runs
    pub fn paint(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }

        let overlapping: Vec<(usize, usize, TokenCategory)> = self
            .runs
            .range(..span.end)
            .rev()
            .take_while(|(_, &(end, _))| end > span.start)
            .map(|(&start, &(end, category))| (start, end, category))
            .collect();

        for (start, end, category) in overlapping {
            self.runs.remove(&start);
            if start < span.start {
                self.runs.insert(start, (span.start, category));
            }
            if end > span.end {
                self.runs.insert(span.end, (end, category));
            }
        }

        self.runs.insert(span.start, (span.end, span.category));
    }

    /// Category covering `offset`, if any
    pub fn category_at(&self, offset: usize) -> Option<TokenCategory> {
        self.runs
            .range(..=offset)
            .next_back()
            .filter(|(_, &(end, _))| offset < end)
            .map(|(_, &(_, category))| category)
    }

    /// Disjoint runs in ascending order
    pub fn spans(&self) -> Vec<Span> {
        self.runs
            .iter()
            .map(|(&start, &(end, category))| Span {
                category,
                start,
                end,
            })
            .collect()
    }

    /// Resolve every run to its theme color
    pub fn styled(&self, theme: &Theme) -> Vec<StyledRun> {
        self.runs
            .iter()
            .map(|(&start, &(end, category))| StyledRun {
                start,
                end,
                color: theme.token_color(category),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::LanguageId;

    fn span(category: TokenCategory, start: usize, end: usize) -> Span {
        Span {
            category,
            start,
            end,
        }
    }

    fn python() -> &'static LanguageProfile {
        LanguageProfile::get(LanguageId::Python)
    }

    #[test]
    fn test_empty_text_has_no_spans() {
        assert!(highlight("", python()).is_empty());
    }

    #[test]
    fn test_whitespace_only_text() {
        assert!(highlight("   \n\n\t\n", python()).is_empty());
        assert!(highlight("\n", LanguageProfile::get(LanguageId::Css)).is_empty());
    }

    #[test]
    fn test_python_keyword_and_number() {
        let spans = highlight("return 42", python());
        assert_eq!(
            spans,
            vec![
                span(TokenCategory::Keyword, 0, 6),
                span(TokenCategory::Number, 7, 9),
            ]
        );
    }

    #[test]
    fn test_rule_order_in_output() {
        // keyword rule runs before string rule even though the string comes first
        let spans = highlight("'x' if y", python());
        assert_eq!(spans[0].category, TokenCategory::Keyword);
        assert_eq!(spans[1].category, TokenCategory::String);
    }

    #[test]
    fn test_offsets_are_characters_not_bytes() {
        let spans = highlight("é = 'ü' # ñ", python());
        let string = spans
            .iter()
            .find(|s| s.category == TokenCategory::String)
            .unwrap();
        assert_eq!((string.start, string.end), (4, 7));
        let comment = spans
            .iter()
            .find(|s| s.category == TokenCategory::Comment)
            .unwrap();
        assert_eq!((comment.start, comment.end), (8, 11));
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let css = LanguageProfile::get(LanguageId::Css);
        let text = "/* a\nb */\n";
        let spans = highlight(text, css);
        assert!(spans.contains(&span(TokenCategory::Comment, 0, 9)));
    }

    #[test]
    fn test_js_template_literal_spans_lines() {
        let js = LanguageProfile::get(LanguageId::JavaScript);
        let spans = highlight("let s = `a\nb`;", js);
        assert!(spans.contains(&span(TokenCategory::String, 8, 13)));
    }

    #[test]
    fn test_double_quoted_string_does_not_cross_lines() {
        let spans = highlight("\"abc\ndef\"", python());
        assert!(spans.iter().all(|s| s.category != TokenCategory::String));
    }

    #[test]
    fn test_deterministic() {
        let text = "def f(x):\n    return len(x)  # count\n";
        assert_eq!(highlight(text, python()), highlight(text, python()));
    }

    #[test]
    fn test_map_last_write_wins() {
        let map = HighlightMap::from_spans(&[
            span(TokenCategory::Keyword, 0, 10),
            span(TokenCategory::Comment, 3, 6),
        ]);
        assert_eq!(
            map.spans(),
            vec![
                span(TokenCategory::Keyword, 0, 3),
                span(TokenCategory::Comment, 3, 6),
                span(TokenCategory::Keyword, 6, 10),
            ]
        );
    }

    #[test]
    fn test_map_later_span_covers_several_runs() {
        let map = HighlightMap::from_spans(&[
            span(TokenCategory::Keyword, 0, 2),
            span(TokenCategory::Number, 4, 6),
            span(TokenCategory::String, 8, 9),
            span(TokenCategory::Comment, 1, 8),
        ]);
        assert_eq!(
            map.spans(),
            vec![
                span(TokenCategory::Keyword, 0, 1),
                span(TokenCategory::Comment, 1, 8),
                span(TokenCategory::String, 8, 9),
            ]
        );
    }

    #[test]
    fn test_map_identical_range_replaced() {
        let map = HighlightMap::from_spans(&[
            span(TokenCategory::String, 2, 5),
            span(TokenCategory::Comment, 2, 5),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.category_at(2), Some(TokenCategory::Comment));
        assert_eq!(map.category_at(4), Some(TokenCategory::Comment));
        assert_eq!(map.category_at(5), None);
    }

    #[test]
    fn test_comment_wins_over_keyword_inside_it() {
        // `# if x` : keyword rule tags `if`, comment rule later covers it
        let spans = highlight("# if x", python());
        let map = HighlightMap::from_spans(&spans);
        assert_eq!(map.category_at(2), Some(TokenCategory::Comment));
        assert_eq!(map.spans().len(), 1);
    }

    #[test]
    fn test_styled_runs_use_theme_fallback() {
        let theme = Theme::default();
        let runs = highlight_styled("if x: pass", python(), &theme);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].color, theme.token_color(TokenCategory::Keyword));
    }

    #[test]
    fn test_json_punctuation_repaints_inside_strings() {
        let json = LanguageProfile::get(LanguageId::Json);
        let map = HighlightMap::from_spans(&highlight("{\"a:b\": 1}", json));
        // ':' inside the string is repainted by the later punctuation rule
        assert_eq!(map.category_at(3), Some(TokenCategory::Punctuation));
        assert_eq!(map.category_at(1), Some(TokenCategory::String));
        assert_eq!(map.category_at(8), Some(TokenCategory::Number));
    }
}
