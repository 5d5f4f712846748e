//! # TitleBar Component
//!
//! One-line bar at the top: the group chat name, the transient status
//! (typing indicator, "added to bucket list"), and a "↓ New" marker when
//! replies have arrived below the scroll position.
//!
//! Purely presentational. All three props come from elsewhere:
//! - `title`: fixed chat name
//! - `status_message`: Core App state
//! - `has_unseen_content`: TUI state (scroll position indicator)
//!
//! ```text
//! ● 冲绳行前群 (2) | K-Bot 正在输入... | ↓ New
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const CHAT_TITLE: &str = "冲绳行前群 (2)";

pub struct TitleBar {
    pub title: String,
    pub status_message: String,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(status_message: String, has_unseen_content: bool) -> Self {
        Self {
            title: CHAT_TITLE.to_string(),
            status_message,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
        let mut spans = vec![
            Span::styled("● ", Style::default().fg(Color::Green)),
            Span::styled(
                self.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(separator.clone());
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Gray),
            ));
        }
        if self.has_unseen_content {
            spans.push(separator);
            spans.push(Span::styled("↓ New", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
