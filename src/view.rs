//! View module - renders a tab as 24-bit ANSI text
//!
//! Each visible line is drawn as the gutter label followed by the line's
//! characters, colored from the tab's highlight runs and the session theme.
//! The find match and the go-to-line target get their theme backgrounds.

use std::fmt::Write;
use std::ops::Range;

use crate::model::{EditorSession, TabController};
use crate::syntax::StyledRun;
use crate::theme::{Color, Theme};

pub const TAB_WIDTH: usize = 4;

const RESET: &str = "\x1b[0m";

/// Render the focused tab, including a tab bar and status line
pub fn render_session(session: &EditorSession) -> String {
    let mut out = String::new();

    let titles: Vec<String> = session
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            if i == session.active_index() {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect();
    out.push_str(&titles.join(""));
    out.push('\n');

    out.push_str(&render_tab(session.active_tab(), &session.theme));

    let tab = session.active_tab();
    let _ = writeln!(
        out,
        "-- {} | {} | {}pt | zoom {}% | {}",
        tab.language().display_name(),
        session.theme.name,
        tab.font_size(),
        session.view.zoom_percent(),
        session.ui.status_message
    );
    out
}

/// Render the visible window of one tab with its gutter
pub fn render_tab(tab: &TabController, theme: &Theme) -> String {
    let runs = tab.styled_runs(theme);
    let match_range = tab.match_highlight();
    let line_range = tab.line_highlight();

    let mut out = String::new();
    let last = tab.viewport.bottom_line().min(tab.gutter.line_count);

    for line in tab.viewport.gutter_offset()..=last {
        push_bg(&mut out, theme.gutter.background);
        push_fg(&mut out, theme.gutter.foreground);
        out.push_str(&tab.gutter.label(line));

        if let Some(range) = tab.document.line_range(line) {
            let text = tab.document.slice(range.clone()).unwrap_or_default();
            let painter = Painter {
                theme,
                runs: &runs,
                match_range: match_range.as_ref(),
                line_range: line_range.as_ref(),
            };
            painter.paint_line(&mut out, &text, range.start);
        }

        out.push_str(RESET);
        out.push('\n');
    }
    out
}

struct Painter<'a> {
    theme: &'a Theme,
    runs: &'a [StyledRun],
    match_range: Option<&'a Range<usize>>,
    line_range: Option<&'a Range<usize>>,
}

impl Painter<'_> {
    fn paint_line(&self, out: &mut String, text: &str, start: usize) {
        let mut current: Option<(Color, Color)> = None;
        let mut visual_col = 0;

        for (i, ch) in text.chars().enumerate() {
            match ch {
                '\n' => break,
                '\r' => continue,
                _ => {}
            }
            let offset = start + i;
            let style = (self.foreground(offset), self.background(offset));
            if current != Some(style) {
                push_fg(out, style.0);
                push_bg(out, style.1);
                current = Some(style);
            }

            if ch == '\t' {
                let spaces = TAB_WIDTH - (visual_col % TAB_WIDTH);
                out.extend(std::iter::repeat(' ').take(spaces));
                visual_col += spaces;
            } else {
                out.push(ch);
                visual_col += 1;
            }
        }
    }

    fn foreground(&self, offset: usize) -> Color {
        run_color(self.runs, offset).unwrap_or(self.theme.editor.foreground)
    }

    fn background(&self, offset: usize) -> Color {
        if self.match_range.is_some_and(|r| r.contains(&offset)) {
            self.theme.editor.match_background
        } else if self.line_range.is_some_and(|r| r.contains(&offset)) {
            self.theme.editor.line_highlight_background
        } else {
            self.theme.editor.background
        }
    }
}

/// Color of the run covering `offset`; runs are sorted and disjoint
fn run_color(runs: &[StyledRun], offset: usize) -> Option<Color> {
    let idx = runs.partition_point(|run| run.end <= offset);
    runs.get(idx)
        .filter(|run| run.start <= offset)
        .map(|run| run.color)
}

fn push_fg(out: &mut String, color: Color) {
    let _ = write!(out, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

fn push_bg(out: &mut String, color: Color) {
    let _ = write!(out, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

/// Remove ANSI escape sequences, leaving the plain text layout
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, TabId, ViewState};

    fn tab(text: &str) -> TabController {
        TabController::new(TabId(1), Document::with_text(text), &ViewState::default())
    }

    #[test]
    fn test_render_shows_gutter_and_text() {
        let theme = Theme::default();
        let plain = strip_ansi(&render_tab(&tab("def f():\n    return 1\n"), &theme));
        assert_eq!(plain, "1 def f():\n2     return 1\n");
    }

    #[test]
    fn test_carriage_return_and_form_feed_stay_inside_a_line() {
        let theme = Theme::default();
        let plain = strip_ansi(&render_tab(&tab("x\ry\nz"), &theme));
        assert_eq!(plain, "1 xy\n2 z\n");

        let plain = strip_ansi(&render_tab(&tab("a\x0cb\nc\r\n"), &theme));
        assert_eq!(plain, "1 a\x0cb\n2 c\n");
    }

    #[test]
    fn test_render_expands_tabs() {
        let theme = Theme::default();
        let plain = strip_ansi(&render_tab(&tab("a\tb"), &theme));
        assert_eq!(plain, "1 a   b\n");
    }

    #[test]
    fn test_keyword_uses_theme_color() {
        let theme = Theme::default();
        let rendered = render_tab(&tab("def"), &theme);
        let kw = theme.token_color(crate::syntax::TokenCategory::Keyword);
        let escape = format!("\x1b[38;2;{};{};{}m", kw.r, kw.g, kw.b);
        assert!(rendered.contains(&escape));
    }

    #[test]
    fn test_match_background_is_painted() {
        let theme = Theme::default();
        let mut tab = tab("xx abc");
        tab.find("abc");
        let bg = theme.editor.match_background;
        let escape = format!("\x1b[48;2;{};{};{}m", bg.r, bg.g, bg.b);
        assert!(render_tab(&tab, &theme).contains(&escape));
    }

    #[test]
    fn test_run_color_lookup() {
        let red = Color::rgb(255, 0, 0);
        let runs = [
            StyledRun {
                start: 2,
                end: 4,
                color: red,
            },
            StyledRun {
                start: 6,
                end: 7,
                color: red,
            },
        ];
        assert_eq!(run_color(&runs, 1), None);
        assert_eq!(run_color(&runs, 2), Some(red));
        assert_eq!(run_color(&runs, 4), None);
        assert_eq!(run_color(&runs, 6), Some(red));
        assert_eq!(run_color(&runs, 9), None);
    }
}
