//! # InputBox Component
//!
//! Single-line chat input at the bottom of the screen.
//!
//! ## Responsibilities
//!
//! - Capture text input (pastes are flattened onto one line)
//! - Handle editing (backspace, delete, cursor movement)
//! - Handle submission (Enter), only for non-blank text
//! - Show a placeholder while empty and the send control once there's text
//!
//! ## State Management
//!
//! The buffer is internal state and is cleared on submit. Cursor position
//! and horizontal scroll are encapsulated in `CursorState`.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::KLOOK_ORANGE;
use crate::tui::event::TuiEvent;
use crate::tui::text;

use cursor::{CursorState, next_char_boundary, prev_char_boundary, visible_slice};

pub const PLACEHOLDER: &str = "问问有什么好吃的...";
const SEND: &str = "➤";
/// Border (2) + padding (2), plus the send control and its gap.
const HORIZONTAL_OVERHEAD: u16 = 4 + 2;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    /// Borders plus one row of text.
    pub const HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: CursorState::new(),
        }
    }

    #[cfg(test)]
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }

    fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor.pos, s);
        self.cursor.pos += s.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        self.cursor.update_scroll(&self.buffer, text_width);

        let has_text = !self.buffer.is_empty();
        let content = if has_text {
            Span::raw(visible_slice(&self.buffer, self.cursor.scroll_cells, text_width).to_string())
        } else {
            Span::styled(
                text::truncate(PLACEHOLDER, text_width),
                Style::default().fg(Color::DarkGray),
            )
        };

        let send_style = if has_text {
            Style::default().fg(KLOOK_ORANGE)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let used = text::display_width(&content.content);
        let pad = text_width.saturating_sub(used) + 1;
        let line = Line::from(vec![
            content,
            Span::raw(" ".repeat(pad)),
            Span::styled(SEND, send_style),
        ]);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(line).block(block), area);

        let column = self.cursor.column(&self.buffer).saturating_sub(self.cursor.scroll_cells);
        frame.set_cursor_position((inner.x + column as u16, inner.y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(pasted) => {
                let flattened = pasted.replace("\r\n", " ").replace(['\n', '\r'], " ");
                self.insert_str(&flattened);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor.reset();
                    Some(InputEvent::Submit(text))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
