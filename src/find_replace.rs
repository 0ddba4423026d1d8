//! Literal find / replace over a tab's buffer
//!
//! The engine never holds the buffer. Every operation borrows it through
//! [`SearchBuffer`], so the same state machine drives the real tab and the
//! in-memory buffers used by tests and benchmarks.
//!
//! Matching is exact and case-sensitive. All positions are character offsets.

use std::ops::Range;

/// Buffer access needed by the engine
pub trait SearchBuffer {
    /// Full text snapshot
    fn text(&self) -> String;

    /// Text in a character range, or None if the range is no longer valid
    fn read_range(&self, range: Range<usize>) -> Option<String>;

    /// Delete `range` and insert `replacement` at its start
    fn replace_range(&mut self, range: Range<usize>, replacement: &str);

    /// Scroll so that `range` is visible
    fn reveal(&mut self, range: Range<usize>);
}

/// The most recent successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
    /// Query that produced the match
    pub query: String,
}

impl Match {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FindState {
    #[default]
    Idle,
    Found(Match),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOutcome {
    /// Match found; `wrapped` is set when the search restarted from the top
    Found { range: Range<usize>, wrapped: bool },
    NotFound,
    /// Empty query, nothing searched
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// Match replaced; `next` is the follow-up search for the same query
    Replaced { next: FindOutcome },
    /// The matched text changed since it was found; buffer untouched
    Stale,
    /// No active match
    NoMatch,
}

/// Find / replace state for one tab
#[derive(Debug, Clone, Default)]
pub struct FindReplaceEngine {
    anchor: usize,
    state: FindState,
}

impl FindReplaceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FindState {
        &self.state
    }

    pub fn active_match(&self) -> Option<&Match> {
        match &self.state {
            FindState::Found(m) => Some(m),
            FindState::Idle => None,
        }
    }

    /// Where the next search resumes
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Back to Idle with the anchor at the document start
    pub fn reset(&mut self) {
        self.anchor = 0;
        self.state = FindState::Idle;
    }

    /// Find the next occurrence of `query` after the anchor, wrapping once
    pub fn find(&mut self, query: &str, buffer: &mut dyn SearchBuffer) -> FindOutcome {
        if query.is_empty() {
            return FindOutcome::Skipped;
        }

        let text = buffer.text();
        let found = find_from(&text, query, self.anchor)
            .map(|start| (start, false))
            .or_else(|| find_from(&text, query, 0).map(|start| (start, true)));

        let Some((start, wrapped)) = found else {
            tracing::debug!(query, anchor = self.anchor, "find: no match");
            self.state = FindState::Idle;
            return FindOutcome::NotFound;
        };

        let end = start + query.chars().count();
        self.anchor = end;
        self.state = FindState::Found(Match {
            start,
            end,
            query: query.to_string(),
        });
        buffer.reveal(start..end);
        tracing::debug!(query, start, end, wrapped, "find: match");

        FindOutcome::Found {
            range: start..end,
            wrapped,
        }
    }

    /// Replace the active match and advance to the next one
    pub fn replace(&mut self, replacement: &str, buffer: &mut dyn SearchBuffer) -> ReplaceOutcome {
        let FindState::Found(active) = std::mem::take(&mut self.state) else {
            return ReplaceOutcome::NoMatch;
        };

        let current = buffer.read_range(active.range());
        if current.as_deref() != Some(active.query.as_str()) {
            tracing::debug!(
                start = active.start,
                end = active.end,
                "replace: match is stale, skipping"
            );
            return ReplaceOutcome::Stale;
        }

        buffer.replace_range(active.range(), replacement);
        self.anchor = active.start + replacement.chars().count();

        let next = self.find(&active.query, buffer);
        ReplaceOutcome::Replaced { next }
    }

    /// Replace every occurrence of `query` and return how many were replaced
    ///
    /// Returns None for an empty query; the engine is left untouched then.
    pub fn replace_all(
        &mut self,
        query: &str,
        replacement: &str,
        buffer: &mut dyn SearchBuffer,
    ) -> Option<usize> {
        if query.is_empty() {
            return None;
        }

        let text = buffer.text();
        let count = text.matches(query).count();
        if count > 0 {
            let len = text.chars().count();
            buffer.replace_range(0..len, &text.replace(query, replacement));
        }
        self.reset();

        tracing::debug!(query, count, "replace all");
        Some(count)
    }

    /// Non-overlapping occurrences of `query`; 0 for an empty query
    pub fn count_occurrences(&self, query: &str, buffer: &dyn SearchBuffer) -> usize {
        count_occurrences(&buffer.text(), query)
    }
}

pub fn count_occurrences(text: &str, query: &str) -> usize {
    if query.is_empty() {
        return 0;
    }
    text.matches(query).count()
}

/// Char offset of the first `query` at or after char offset `from`
fn find_from(text: &str, query: &str, from: usize) -> Option<usize> {
    let byte_from = match text.char_indices().nth(from) {
        Some((byte, _)) => byte,
        None if from == text.chars().count() => text.len(),
        None => return None,
    };
    let rel = text[byte_from..].find(query)?;
    Some(from + text[byte_from..byte_from + rel].chars().count())
}

/// Plain string buffer, used where no tab is involved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    pub text: String,
    /// Last range passed to `reveal`
    pub revealed: Option<Range<usize>>,
}

impl StringBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revealed: None,
        }
    }

    fn byte_range(&self, range: &Range<usize>) -> Option<Range<usize>> {
        let mut bounds = self
            .text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(self.text.len()));
        let start = bounds.nth(range.start)?;
        let end = if range.end == range.start {
            start
        } else {
            bounds.nth(range.end - range.start - 1)?
        };
        Some(start..end)
    }
}

impl SearchBuffer for StringBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn read_range(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end {
            return None;
        }
        self.byte_range(&range).map(|r| self.text[r].to_string())
    }

    fn replace_range(&mut self, range: Range<usize>, replacement: &str) {
        if let Some(r) = self.byte_range(&range) {
            self.text.replace_range(r, replacement);
        }
    }

    fn reveal(&mut self, range: Range<usize>) {
        self.revealed = Some(range);
    }
}
