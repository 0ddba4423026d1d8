//! View state - zoom, font, theme selection and the shared scroll viewport

use crate::config::FontSpec;

pub const MIN_ZOOM: u32 = 50;
pub const MAX_ZOOM: u32 = 200;
pub const ZOOM_STEP: u32 = 10;
pub const DEFAULT_ZOOM: u32 = 100;

/// Session-wide view settings
///
/// Tabs read this on focus and on every zoom change; they never keep their
/// own copy of the zoom level, only the font size last applied to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    zoom_percent: u32,
    pub font: FontSpec,
    pub theme_id: String,
}

impl ViewState {
    pub fn new(font: FontSpec, theme_id: impl Into<String>) -> Self {
        Self {
            zoom_percent: DEFAULT_ZOOM,
            font,
            theme_id: theme_id.into(),
        }
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom_percent
    }

    pub fn base_font_size(&self) -> u32 {
        self.font.size()
    }

    /// Font size after zoom, rounded half up
    pub fn effective_font_size(&self) -> u32 {
        effective_font_size(self.base_font_size(), self.zoom_percent)
    }

    /// Returns true if the zoom level changed
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom_percent.saturating_add(ZOOM_STEP))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom_percent.saturating_sub(ZOOM_STEP))
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_zoom(DEFAULT_ZOOM)
    }

    fn set_zoom(&mut self, percent: u32) -> bool {
        let percent = percent.clamp(MIN_ZOOM, MAX_ZOOM);
        if percent == self.zoom_percent {
            return false;
        }
        self.zoom_percent = percent;
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(FontSpec::default(), crate::theme::DEFAULT_THEME_ID)
    }
}

/// Zoomed point size, rounded half up and saturating at `u32::MAX`
pub fn effective_font_size(base: u32, zoom_percent: u32) -> u32 {
    let scaled = (u64::from(base) * u64::from(zoom_percent) + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Which widget originated a scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    Text,
    Gutter,
}

/// Visible window of a tab
///
/// The text area and the gutter share this one offset, so they cannot drift
/// apart regardless of which of them was scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (1-based)
    pub top_line: usize,
    /// Number of lines that fit in the viewport
    pub visible_lines: usize,
}

impl Viewport {
    pub fn new(visible_lines: usize) -> Self {
        Self {
            top_line: 1,
            visible_lines: visible_lines.max(1),
        }
    }

    /// Scroll offset of the text area
    pub fn text_offset(&self) -> usize {
        self.top_line
    }

    /// Scroll offset of the gutter
    pub fn gutter_offset(&self) -> usize {
        self.top_line
    }

    /// Last visible line (inclusive)
    pub fn bottom_line(&self) -> usize {
        self.top_line + self.visible_lines - 1
    }

    fn max_top(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.visible_lines).saturating_add(1).max(1)
    }

    /// Scroll by `delta` lines from either widget. Returns true if the offset moved.
    pub fn scroll(&mut self, _source: ScrollSource, delta: isize, line_count: usize) -> bool {
        let target = if delta < 0 {
            self.top_line.saturating_sub(delta.unsigned_abs())
        } else {
            self.top_line.saturating_add(delta as usize)
        };
        self.set_top(target, line_count)
    }

    /// Jump to a fraction of the document (scrollbar drag)
    pub fn scroll_to_fraction(&mut self, fraction: f64, line_count: usize) -> bool {
        let fraction = fraction.clamp(0.0, 1.0);
        let target = 1 + (fraction * line_count.saturating_sub(1) as f64).round() as usize;
        self.set_top(target, line_count)
    }

    /// Minimal scroll that brings `line` into view
    pub fn reveal(&mut self, line: usize, line_count: usize) -> bool {
        if line < self.top_line {
            self.set_top(line, line_count)
        } else if line > self.bottom_line() {
            self.set_top(line + 1 - self.visible_lines, line_count)
        } else {
            false
        }
    }

    pub fn resize(&mut self, visible_lines: usize, line_count: usize) {
        self.visible_lines = visible_lines.max(1);
        self.set_top(self.top_line, line_count);
    }

    /// Keep the offset valid after the document shrank
    pub fn clamp(&mut self, line_count: usize) -> bool {
        self.set_top(self.top_line, line_count)
    }

    fn set_top(&mut self, top: usize, line_count: usize) -> bool {
        let top = top.clamp(1, self.max_top(line_count));
        if top == self.top_line {
            return false;
        }
        self.top_line = top;
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_font_size_rounds() {
        assert_eq!(effective_font_size(12, 100), 12);
        assert_eq!(effective_font_size(12, 50), 6);
        assert_eq!(effective_font_size(12, 90), 11);
        assert_eq!(effective_font_size(12, 70), 8);
        assert_eq!(effective_font_size(12, 200), 24);
    }

    #[test]
    fn test_huge_base_size_does_not_overflow() {
        assert_eq!(effective_font_size(40_000_000, 200), 80_000_000);
        assert_eq!(effective_font_size(u32::MAX, 200), u32::MAX);

        let mut view = ViewState::new(FontSpec("Consolas".to_string(), 40_000_000), "default");
        assert!(view.zoom_in());
        assert_eq!(view.effective_font_size(), 44_000_000);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut view = ViewState::default();
        for _ in 0..20 {
            view.zoom_in();
        }
        assert_eq!(view.zoom_percent(), MAX_ZOOM);
        assert!(!view.zoom_in());

        for _ in 0..30 {
            view.zoom_out();
        }
        assert_eq!(view.zoom_percent(), MIN_ZOOM);
        assert!(!view.zoom_out());

        assert!(view.reset_zoom());
        assert_eq!(view.zoom_percent(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_zoom_in_then_out_round_trips() {
        let mut view = ViewState::default();
        for _ in 0..4 {
            view.zoom_out();
        }
        let start = view.zoom_percent();
        assert!(view.zoom_in());
        assert!(view.zoom_out());
        assert_eq!(view.zoom_percent(), start);
    }

    #[test]
    fn test_text_and_gutter_scroll_together() {
        let mut vp = Viewport::new(10);
        assert!(vp.scroll(ScrollSource::Gutter, 5, 100));
        assert_eq!(vp.text_offset(), 6);
        assert_eq!(vp.gutter_offset(), 6);
        assert!(vp.scroll(ScrollSource::Text, -3, 100));
        assert_eq!(vp.gutter_offset(), 3);
    }

    #[test]
    fn test_scroll_clamps_to_document() {
        let mut vp = Viewport::new(10);
        vp.scroll(ScrollSource::Text, 1000, 25);
        assert_eq!(vp.top_line, 16);
        vp.scroll(ScrollSource::Text, -1000, 25);
        assert_eq!(vp.top_line, 1);
        // short documents never scroll
        assert!(!vp.scroll(ScrollSource::Text, 3, 5));
    }

    #[test]
    fn test_reveal_is_minimal() {
        let mut vp = Viewport::new(10);
        assert!(!vp.reveal(5, 100));
        assert!(vp.reveal(30, 100));
        assert_eq!(vp.top_line, 21);
        assert_eq!(vp.bottom_line(), 30);
        assert!(vp.reveal(3, 100));
        assert_eq!(vp.top_line, 3);
    }

    #[test]
    fn test_scroll_to_fraction() {
        let mut vp = Viewport::new(10);
        vp.scroll_to_fraction(1.0, 101);
        assert_eq!(vp.top_line, 92);
        vp.scroll_to_fraction(0.0, 101);
        assert_eq!(vp.top_line, 1);
    }
}
