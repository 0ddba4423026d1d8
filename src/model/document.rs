//! Document model - represents the text buffer and file state

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;

use super::line_index;
use crate::syntax::LanguageId;

/// A buffer coordinate: 1-based line, 0-based column (`line.column`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for new/unsaved files)
    pub file_path: Option<PathBuf>,
    /// Display name for untitled documents (e.g., "Untitled-2")
    pub untitled_name: Option<String>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Language used for syntax highlighting
    pub language: LanguageId,
    /// Incremented on each content change; lets async results detect staleness
    pub revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from_str(text),
            file_path: None,
            untitled_name: None,
            is_modified: false,
            language: LanguageId::default(),
            revision: 0,
        }
    }

    /// Create a document for content read from `path`
    ///
    /// The language is derived from the path's extension.
    pub fn from_content(path: PathBuf, content: &str) -> Self {
        Self {
            language: LanguageId::from_path(&path),
            file_path: Some(path),
            ..Self::with_text(content)
        }
    }

    /// Get the display name for this document.
    /// Returns the filename if saved, the untitled name if set, or "Untitled" as fallback.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.file_path.as_deref().and_then(Path::file_name) {
            return name.to_string_lossy().to_string();
        }
        if let Some(name) = &self.untitled_name {
            return name.clone();
        }
        "Untitled".to_string()
    }

    /// Full buffer content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Length in characters
    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Number of lines as shown in the gutter
    pub fn line_count(&self) -> usize {
        line_index::rope_line_count(&self.buffer)
    }

    /// Text in a character range, or None if the range is out of bounds
    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end || range.end > self.buffer.len_chars() {
            return None;
        }
        Some(self.buffer.slice(range).to_string())
    }

    /// Character range of a 1-based line, including its line break
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        if line == 0 || line > self.buffer.len_lines() {
            return None;
        }
        let start = self.buffer.line_to_char(line - 1);
        let end = start + self.buffer.line(line - 1).len_chars();
        Some(start..end)
    }

    /// Convert a position to a character offset, clamping to the buffer
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let line_idx = pos.line.saturating_sub(1);
        if line_idx >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(line_idx);
        line_start + pos.column.min(self.line_length(line_idx))
    }

    /// Convert a character offset to a position
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.buffer.len_chars());
        let line_idx = self.buffer.char_to_line(clamped);
        let line_start = self.buffer.line_to_char(line_idx);
        Position::new(line_idx + 1, clamped - line_start)
    }

    /// Length of a 0-indexed line excluding its newline
    fn line_length(&self, line_idx: usize) -> usize {
        let line = self.buffer.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Insert text at a character offset (clamped to the buffer end)
    pub fn insert(&mut self, offset: usize, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let offset = offset.min(self.buffer.len_chars());
        self.buffer.insert(offset, text);
        self.touch();
        true
    }

    /// Remove a character range. Out-of-bounds ranges are clamped.
    pub fn delete(&mut self, range: Range<usize>) -> bool {
        let end = range.end.min(self.buffer.len_chars());
        let start = range.start.min(end);
        if start == end {
            return false;
        }
        self.buffer.remove(start..end);
        self.touch();
        true
    }

    /// Delete a range and insert `text` at its start, as one revision
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> bool {
        let end = range.end.min(self.buffer.len_chars());
        let start = range.start.min(end);
        if start == end && text.is_empty() {
            return false;
        }
        self.buffer.remove(start..end);
        self.buffer.insert(start, text);
        self.touch();
        true
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.buffer == text {
            return false;
        }
        self.buffer = Rope::from_str(text);
        self.touch();
        true
    }

    /// Clear the modified flag if nothing changed since `revision`
    ///
    /// Returns true when the document is now clean.
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.is_modified = false;
        }
        !self.is_modified
    }

    fn touch(&mut self) {
        self.is_modified = true;
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
