//! Fixed-width text columns for terminal listings.
//!
//! Widths are display widths, so wide (CJK) characters count double.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Longest prefix of `s` that fits in `max_width` columns.
fn prefix_within(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (i, c) in s.char_indices() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            return &s[..i];
        }
    }
    s
}

/// Fit `s` into exactly `width` columns: pad short text on the right,
/// cut long text and mark the cut with an ellipsis.
pub fn fit(s: &str, width: usize) -> String {
    let text = if s.width() <= width {
        s.to_string()
    } else if width == 0 {
        String::new()
    } else {
        format!("{}{ELLIPSIS}", prefix_within(s, width - 1))
    };
    let padding = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(padding))
}

/// One listing line built from fixed-width cells.
#[derive(Debug, Default)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell fitted to `width` columns.
    pub fn cell(mut self, text: &str, width: usize) -> Self {
        self.cells.push(fit(text, width));
        self
    }

    /// Add a cell taking whatever width its text needs.
    pub fn rest(mut self, text: &str) -> Self {
        self.cells.push(text.to_string());
        self
    }

    /// Cells joined by single spaces, without trailing padding.
    pub fn render(&self, indent: &str) -> String {
        format!("{indent}{}", self.cells.join(" ")).trim_end().to_string()
    }
}
