//! Cursor position tracking for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset and the horizontal scroll
//! (in cells). The text itself is owned by `InputBox` and passed in.

use unicode_width::UnicodeWidthChar;

use crate::tui::text;

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Cells hidden off the left edge when the text is wider than the box
    pub scroll_cells: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_cells: 0,
        }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_cells = 0;
    }

    /// Cell column of the cursor within the whole buffer.
    pub fn column(&self, buffer: &str) -> usize {
        text::display_width(&buffer[..self.pos])
    }

    /// Adjusts the scroll so the cursor column stays within `width` cells.
    pub fn update_scroll(&mut self, buffer: &str, width: usize) {
        if width == 0 {
            self.scroll_cells = 0;
            return;
        }
        let column = self.column(buffer);
        if column < self.scroll_cells {
            self.scroll_cells = column;
        } else if column >= self.scroll_cells + width {
            // Keep one cell for the cursor itself
            self.scroll_cells = column + 1 - width;
        }
    }
}

/// Slice of `buffer` visible when `skip` cells are scrolled off the left,
/// at most `width` cells wide. A wide char cut by the left edge is dropped.
pub(super) fn visible_slice(buffer: &str, skip: usize, width: usize) -> &str {
    let mut start = buffer.len();
    let mut end = buffer.len();
    let mut used = 0;
    let mut started = false;
    for (i, c) in buffer.char_indices() {
        let w = c.width().unwrap_or(0);
        if !started {
            if used >= skip {
                start = i;
                started = true;
                used = 0;
            } else {
                used += w;
                continue;
            }
        }
        if used + w > width {
            end = i;
            break;
        }
        used += w;
    }
    if start > end { "" } else { &buffer[start..end] }
}

/// Byte offset of the previous character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
