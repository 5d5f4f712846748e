use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::core::message::MapPreview;
use crate::tui::components::message::MESSAGE_GAP;
use crate::tui::text;

const MAP_CARD_WIDTH: u16 = 34;
/// Rows of mock "map" above the caption.
const MAP_ROWS: u16 = 2;

/// Static "recommended area" card. There is no real map behind it.
pub struct MapCard<'a> {
    pub preview: &'a MapPreview,
    pub is_selected: bool,
}

impl MapCard<'_> {
    /// Borders, map rows, title and subtitle, plus the message gap.
    pub const HEIGHT: u16 = 2 + MAP_ROWS + 2 + MESSAGE_GAP;
}

impl Widget for MapCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let card_area = Rect {
            width: MAP_CARD_WIDTH.min(area.width),
            height: (Self::HEIGHT - MESSAGE_GAP).min(area.height),
            ..area
        };
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::DIM)
        };
        let badge = Line::from(Span::styled(
            format!(" {} ", self.preview.badge),
            Style::default().fg(Color::Gray),
        ))
        .right_aligned();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(badge);
        let inner = block.inner(card_area);
        block.render(card_area, buf);

        let width = inner.width as usize;
        let water = Style::default().fg(Color::Blue).add_modifier(Modifier::DIM);
        let mut lines: Vec<Line> = (0..MAP_ROWS)
            .map(|row| {
                if row == MAP_ROWS / 2 {
                    Line::from(Span::styled("📍", Style::default().fg(Color::LightBlue)))
                } else {
                    Line::from(Span::styled("░".repeat(width), water))
                }
                .alignment(Alignment::Center)
            })
            .collect();
        lines.push(Line::from(Span::styled(
            text::truncate(&self.preview.title, width),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            text::truncate(&self.preview.subtitle, width),
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
