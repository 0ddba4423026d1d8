//! One open tab: its buffer plus everything derived from it
//!
//! Every content change goes through [`TabController::on_content_changed`],
//! which rescans highlighting and recounts gutter lines.

use std::ops::Range;
use std::path::{Path, PathBuf};

use super::document::Document;
use super::line_index::Gutter;
use super::view::{ScrollSource, ViewState, Viewport};
use crate::find_replace::{FindOutcome, FindReplaceEngine, ReplaceOutcome, SearchBuffer};
use crate::syntax::{highlight, HighlightMap, LanguageId, LanguageProfile, Span, StyledRun};
use crate::theme::Theme;

/// Unique identifier for a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GotoLineError {
    OutOfRange { line: usize, line_count: usize },
}

impl std::fmt::Display for GotoLineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GotoLineError::OutOfRange { .. } => f.write_str("Line number out of range"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabController {
    pub id: TabId,
    pub document: Document,
    pub viewport: Viewport,
    pub gutter: Gutter,
    finder: FindReplaceEngine,
    spans: Vec<Span>,
    highlights: HighlightMap,
    /// Font size last applied from the session view state
    font_size: u32,
    /// Character range of the go-to-line target
    line_highlight: Option<Range<usize>>,
}

impl TabController {
    pub fn new(id: TabId, document: Document, view: &ViewState) -> Self {
        let font_size = view.effective_font_size();
        let mut tab = Self {
            id,
            gutter: Gutter::new(document.line_count(), font_size),
            document,
            viewport: Viewport::default(),
            finder: FindReplaceEngine::new(),
            spans: Vec::new(),
            highlights: HighlightMap::new(),
            font_size,
            line_highlight: None,
        };
        tab.rehighlight();
        tab
    }

    /// Empty tab with an `Untitled-N` title
    pub fn untitled(id: TabId, name: impl Into<String>, view: &ViewState) -> Self {
        let mut document = Document::new();
        document.untitled_name = Some(name.into());
        Self::new(id, document, view)
    }

    pub fn language(&self) -> LanguageId {
        self.document.language
    }

    pub fn path(&self) -> Option<&Path> {
        self.document.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_modified
    }

    /// Tab label, with a `*` prefix while unsaved
    pub fn title(&self) -> String {
        let name = self.document.display_name();
        if self.is_dirty() {
            format!("*{}", name)
        } else {
            name
        }
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn highlights(&self) -> &HighlightMap {
        &self.highlights
    }

    /// Colored runs for the current theme; resolved on every call
    pub fn styled_runs(&self, theme: &Theme) -> Vec<StyledRun> {
        self.highlights.styled(theme)
    }

    pub fn finder(&self) -> &FindReplaceEngine {
        &self.finder
    }

    /// Range to draw with the find-match background
    pub fn match_highlight(&self) -> Option<Range<usize>> {
        self.finder.active_match().map(|m| m.range())
    }

    pub fn line_highlight(&self) -> Option<Range<usize>> {
        self.line_highlight.clone()
    }

    /// Eligible for the periodic save scan
    pub fn needs_auto_save(&self) -> bool {
        self.is_dirty() && self.path().is_some()
    }

    // ------------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------------

    pub fn insert(&mut self, offset: usize, text: &str) -> bool {
        let changed = self.document.insert(offset, text);
        if changed {
            self.on_content_changed();
        }
        changed
    }

    pub fn delete(&mut self, range: Range<usize>) -> bool {
        let changed = self.document.delete(range);
        if changed {
            self.on_content_changed();
        }
        changed
    }

    pub fn set_text(&mut self, text: &str) -> bool {
        let changed = self.document.set_text(text);
        if changed {
            self.on_content_changed();
        }
        changed
    }

    /// Refresh everything derived from the buffer text
    pub fn on_content_changed(&mut self) {
        self.document.is_modified = true;
        self.line_highlight = None;
        self.rehighlight();
        if self.gutter.update(self.document.line_count()) {
            tracing::debug!(
                tab = %self.id,
                lines = self.gutter.line_count,
                width = self.gutter.width,
                "gutter resized"
            );
        }
        self.viewport.clamp(self.gutter.line_count);
    }

    /// Switch the highlighting language; the gutter is unaffected
    pub fn set_language(&mut self, language: LanguageId) -> bool {
        if self.document.language == language {
            return false;
        }
        self.document.language = language;
        self.rehighlight();
        true
    }

    fn rehighlight(&mut self) {
        let profile = LanguageProfile::get(self.document.language);
        self.spans = highlight(&self.document.text(), profile);
        self.highlights = HighlightMap::from_spans(&self.spans);
        tracing::debug!(
            tab = %self.id,
            language = %self.document.language,
            spans = self.spans.len(),
            "rehighlighted"
        );
    }

    /// Apply the session zoom to both the text area and the gutter
    pub fn apply_view(&mut self, view: &ViewState) -> bool {
        let size = view.effective_font_size();
        if size == self.font_size && self.gutter.font_size == size {
            return false;
        }
        self.font_size = size;
        self.gutter.font_size = size;
        self.gutter.width = super::line_index::gutter_width(self.gutter.line_count);
        true
    }

    pub fn scroll(&mut self, source: ScrollSource, delta: isize) -> bool {
        self.viewport.scroll(source, delta, self.gutter.line_count)
    }

    /// Record a successful write. Returns true if the title changed.
    pub fn mark_saved(&mut self, path: PathBuf, revision: u64) -> bool {
        let old_title = self.title();
        if self.document.file_path.as_deref() != Some(path.as_path()) {
            self.document.file_path = Some(path);
        }
        self.document.mark_saved(revision);
        old_title != self.title()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Scroll to a 1-based line and highlight it through its newline
    pub fn goto_line(&mut self, line: usize) -> Result<(), GotoLineError> {
        let line_count = self.document.line_count();
        let range = (1..=line_count)
            .contains(&line)
            .then(|| self.document.line_range(line))
            .flatten()
            .ok_or(GotoLineError::OutOfRange { line, line_count })?;

        self.viewport.reveal(line, line_count);
        self.line_highlight = Some(range);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Find / replace
    // ------------------------------------------------------------------------

    pub fn find(&mut self, query: &str) -> FindOutcome {
        let mut buffer = TabBuffer::new(&mut self.document, &mut self.viewport);
        self.finder.find(query, &mut buffer)
    }

    pub fn replace(&mut self, replacement: &str) -> ReplaceOutcome {
        let mut buffer = TabBuffer::new(&mut self.document, &mut self.viewport);
        let outcome = self.finder.replace(replacement, &mut buffer);
        let edited = buffer.edited;
        if edited {
            self.on_content_changed();
        }
        outcome
    }

    pub fn replace_all(&mut self, query: &str, replacement: &str) -> Option<usize> {
        let mut buffer = TabBuffer::new(&mut self.document, &mut self.viewport);
        let count = self.finder.replace_all(query, replacement, &mut buffer);
        let edited = buffer.edited;
        if edited {
            self.on_content_changed();
        }
        count
    }

    pub fn count_occurrences(&self, query: &str) -> usize {
        crate::find_replace::count_occurrences(&self.document.text(), query)
    }
}

/// The tab's buffer as seen by the find engine
struct TabBuffer<'a> {
    document: &'a mut Document,
    viewport: &'a mut Viewport,
    edited: bool,
}

impl<'a> TabBuffer<'a> {
    fn new(document: &'a mut Document, viewport: &'a mut Viewport) -> Self {
        Self {
            document,
            viewport,
            edited: false,
        }
    }
}

impl SearchBuffer for TabBuffer<'_> {
    fn text(&self) -> String {
        self.document.text()
    }

    fn read_range(&self, range: Range<usize>) -> Option<String> {
        self.document.slice(range)
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        self.edited |= self.document.replace(range, replacement);
    }

    fn reveal(&mut self, range: Range<usize>) {
        let line = self.document.offset_to_position(range.start).line;
        self.viewport.reveal(line, self.document.line_count());
    }
}
