//! Line numbering for the gutter
//!
//! A line is a run of characters terminated by `\n` or by the end of the
//! buffer. A single trailing newline does not open a new numbered line, and
//! the empty buffer still shows line 1.

use ropey::Rope;

/// Number of lines the gutter shows for `text`
pub fn line_count(text: &str) -> usize {
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    adjust(newlines, text.ends_with('\n'))
}

/// Same as [`line_count`], without flattening the rope
pub fn rope_line_count(rope: &Rope) -> usize {
    let newlines = rope
        .chunks()
        .map(|chunk| chunk.bytes().filter(|&b| b == b'\n').count())
        .sum();
    let len = rope.len_chars();
    let trailing = len > 0 && rope.char(len - 1) == '\n';
    adjust(newlines, trailing)
}

fn adjust(newlines: usize, trailing_newline: bool) -> usize {
    if trailing_newline {
        newlines.max(1)
    } else {
        newlines + 1
    }
}

/// Gutter labels "1" through `line_count`, in order
pub fn render_gutter(line_count: usize) -> Vec<String> {
    (1..=line_count.max(1)).map(|n| n.to_string()).collect()
}

/// Gutter width in characters: digits of the largest label plus one
pub fn gutter_width(line_count: usize) -> usize {
    let mut digits = 1;
    let mut n = line_count.max(1);
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits + 1
}

/// Cached gutter contents for one tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gutter {
    pub line_count: usize,
    pub width: usize,
    /// Matches the text area's font size
    pub font_size: u32,
}

impl Gutter {
    pub fn new(line_count: usize, font_size: u32) -> Self {
        Self {
            line_count: line_count.max(1),
            width: gutter_width(line_count),
            font_size,
        }
    }

    /// Recompute for a new line count. Returns true if anything changed.
    pub fn update(&mut self, line_count: usize) -> bool {
        let line_count = line_count.max(1);
        if line_count == self.line_count {
            return false;
        }
        self.line_count = line_count;
        self.width = gutter_width(line_count);
        true
    }

    pub fn labels(&self) -> Vec<String> {
        render_gutter(self.line_count)
    }

    /// Label for a 1-based line, right-aligned to the gutter width
    pub fn label(&self, line: usize) -> String {
        format!("{:>width$} ", line, width = self.width - 1)
    }
}
