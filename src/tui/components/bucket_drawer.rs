//! # BucketDrawer Component
//!
//! The bucket list pinned to the bottom of the screen. Collapsed it's a
//! handle and a count; open it grows to most of the screen and lists every
//! saved place.
//!
//! ```text
//! ╭────────────────────────━━━━─────────────────────────╮
//! │ 我的心愿单 🧡                           生成路线 ➜ │
//! │ 2 个灵感待打卡                                      │
//! │ 大家 (Ufuya) 百年古宅  [本地必吃]                   │
//! │ 古宇利岛 (Kouri Island)  [果冻海]                   │
//! ╰─────────────────────────────────────────────────────╯
//! ```
//!
//! "生成路线 ➜" is decoration only; route planning is not wired up.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::core::catalog::Poi;
use crate::tui::component::Component;
use crate::tui::components::message::KLOOK_ORANGE;
use crate::tui::text;

const HANDLE: &str = "━━━━";
const HEADER: &str = "我的心愿单 🧡";
const ROUTE_CONTROL: &str = "生成路线 ➜";
pub const EMPTY_TEXT: &str = "还没有添加地点哦，去聊聊天吧！✨";

/// Top border, header, count line.
pub const COLLAPSED_HEIGHT: u16 = 3;
/// Share of the screen an open drawer takes, in percent.
const OPEN_PERCENT: u16 = 70;

/// Drawer height for a screen of `screen_height` rows.
pub fn drawer_height(is_open: bool, screen_height: u16) -> u16 {
    if is_open {
        (screen_height.saturating_mul(OPEN_PERCENT) / 100).max(COLLAPSED_HEIGHT)
    } else {
        COLLAPSED_HEIGHT
    }
}

/// Whether a click at `row` (absolute) inside the drawer should toggle it.
/// Closed: anywhere. Open: only the handle row.
pub fn is_toggle_row(area: Rect, is_open: bool, row: u16) -> bool {
    if !(area.y..area.bottom()).contains(&row) {
        return false;
    }
    !is_open || row == area.y
}

pub struct BucketDrawer<'a> {
    pub items: &'a [Poi],
    pub is_open: bool,
}

impl BucketDrawer<'_> {
    fn header_line(&self, width: usize) -> Line<'static> {
        let header_width = text::display_width(HEADER);
        let control_width = text::display_width(ROUTE_CONTROL);
        let pad = width.saturating_sub(header_width + control_width);
        let control_style = if self.items.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(KLOOK_ORANGE)
        };
        Line::from(vec![
            Span::styled(HEADER, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(pad)),
            Span::styled(ROUTE_CONTROL, control_style),
        ])
    }

    fn item_line(poi: &Poi, width: usize) -> Line<'static> {
        let name = text::truncate(&poi.name, width);
        let mut spans = vec![Span::raw(name.clone())];
        let remaining = width.saturating_sub(text::display_width(&name));
        let tags = poi
            .tags
            .iter()
            .map(|t| format!("[{t}]"))
            .collect::<Vec<_>>()
            .join(" ");
        if !tags.is_empty() && remaining > 2 {
            spans.push(Span::styled(
                format!("  {}", text::truncate(&tags, remaining - 2)),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for BucketDrawer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let handle = Line::from(Span::styled(HANDLE, Style::default().fg(Color::Gray))).centered();
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(handle)
            .padding(Padding::horizontal(1));
        let width = block.inner(area).width as usize;

        let mut lines = vec![
            self.header_line(width),
            Line::from(Span::styled(
                format!("{} 个灵感待打卡", self.items.len()),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if self.is_open {
            lines.push(Line::default());
            if self.items.is_empty() {
                lines.push(
                    Line::from(Span::styled(EMPTY_TEXT, Style::default().fg(Color::DarkGray)))
                        .centered(),
                );
            } else {
                lines.extend(self.items.iter().map(|poi| Self::item_line(poi, width)));
            }
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::poi;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(items: &[Poi], is_open: bool, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|f| BucketDrawer { items, is_open }.render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_drawer_height() {
        assert_eq!(drawer_height(false, 40), COLLAPSED_HEIGHT);
        assert_eq!(drawer_height(true, 40), 28);
        assert_eq!(drawer_height(true, 2), COLLAPSED_HEIGHT);
    }

    #[test]
    fn test_toggle_rows() {
        let area = Rect::new(0, 10, 60, 5);
        assert!(is_toggle_row(area, false, 12));
        assert!(is_toggle_row(area, true, 10));
        assert!(!is_toggle_row(area, true, 12));
        assert!(!is_toggle_row(area, false, 9));
        assert!(!is_toggle_row(area, false, 15));
    }

    #[test]
    fn test_collapsed_shows_count_only() {
        let items = vec![poi(1)];
        let text = render(&items, false, COLLAPSED_HEIGHT);
        assert!(text.contains("━"));
        assert!(text.contains('1'));
        assert!(text.contains('➜'));
        assert!(!text.contains("Ufuya"));
    }

    #[test]
    fn test_open_lists_items_in_order() {
        let items = vec![poi(2), poi(1)];
        let text = render(&items, true, 10);
        let kouri = text.find("Kouri").unwrap();
        let ufuya = text.find("Ufuya").unwrap();
        assert!(kouri < ufuya);
    }

    #[test]
    fn test_open_empty_shows_hint() {
        let text = render(&[], true, 10);
        assert!(text.contains('0'));
        assert!(text.contains('✨'));
    }
}
