//! # Carousel Component
//!
//! A horizontal strip of POI cards. Only as many cards as fit are drawn;
//! when a card is focused the strip scrolls so that card stays in view.
//!
//! ```text
//! ╭────────────────── ★ 4.8 ╮ ╭────────────────── ★ 4.9 ╮
//! │大家 (Ufuya) 百年古宅    │ │古宇利岛 (Kouri Island)  │
//! │#本地必吃 #阿古猪 #景观位│ │#果冻海 #自驾天堂        │
//! │隐藏在森林里的百年古宅， │ │开车穿过跨海大桥的瞬间， │
//! │必点阿古猪火锅。         │ │你会爱上冲绳。           │
//! │                         │ │                         │
//! │¥3000/人             [+] │ │免费                 [✓] │
//! ╰─────────────────────────╯ ╰─────────────────────────╯
//!  ‹ 1/2 ›  ←→ 切换 · Enter 加入心愿单
//! ```
//!
//! Pressing the add control is handled by the event loop: it maps the
//! focused card (or a clicked one, via [`card_at`]) to `AddToBucket`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::core::bucket::BucketStore;
use crate::core::catalog::{Poi, PoiCatalog, PoiId};
use crate::tui::components::message::{KLOOK_ORANGE, MESSAGE_GAP};
use crate::tui::text;

pub const CARD_WIDTH: u16 = 28;
pub const CARD_GAP: u16 = 1;
const CARD_HEIGHT: u16 = 8;
const DESCRIPTION_LINES: usize = 2;

/// Catalog entries for `items`, in order. Unknown ids are dropped.
pub fn resolve_cards<'a>(items: &[PoiId], catalog: &'a PoiCatalog) -> Vec<&'a Poi> {
    items.iter().filter_map(|id| catalog.get(*id)).collect()
}

/// How many whole cards fit in `width` (at least one).
pub fn visible_cards(width: u16) -> usize {
    (((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1)
}

/// Index of the leftmost drawn card. The focused card is kept in view.
pub fn first_visible(focused: Option<usize>, visible: usize) -> usize {
    focused.map_or(0, |f| f.saturating_sub(visible.saturating_sub(1)))
}

/// Which card, if any, sits at column `col` (relative to the strip).
pub fn card_at(col: u16, width: u16, focused: Option<usize>, count: usize) -> Option<usize> {
    let visible = visible_cards(width);
    let first = first_visible(focused, visible);
    let slot = (col / (CARD_WIDTH + CARD_GAP)) as usize;
    let within_card = col % (CARD_WIDTH + CARD_GAP) < CARD_WIDTH.min(width);
    let index = first + slot;
    (slot < visible && within_card && index < count).then_some(index)
}

pub struct Carousel<'a> {
    pub cards: &'a [&'a Poi],
    pub bucket: &'a BucketStore,
    /// Focused card, set only while the carousel is selected.
    pub focused: Option<usize>,
}

impl Carousel<'_> {
    /// Card rows plus the indicator row and the message gap.
    pub const HEIGHT: u16 = CARD_HEIGHT + 1 + MESSAGE_GAP;
}

impl Widget for Carousel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            Paragraph::new("暂无推荐")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let card_width = CARD_WIDTH.min(area.width);
        let visible = visible_cards(area.width);
        let first = first_visible(self.focused, visible);
        let last = (first + visible).min(self.cards.len());

        for (slot, index) in (first..last).enumerate() {
            let x = area.x + slot as u16 * (CARD_WIDTH + CARD_GAP);
            let card_area = Rect::new(x, area.y, card_width, CARD_HEIGHT.min(area.height));
            let poi = self.cards[index];
            PoiCard {
                poi,
                is_saved: self.bucket.contains(poi.id),
                is_focused: self.focused == Some(index),
            }
            .render(card_area, buf);
        }

        if area.height > CARD_HEIGHT {
            let indicator_area = Rect::new(area.x, area.y + CARD_HEIGHT, area.width, 1);
            indicator_line(first, last, self.cards.len(), self.focused).render(indicator_area, buf);
        }
    }
}

fn indicator_line(first: usize, last: usize, count: usize, focused: Option<usize>) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let arrow = |active: bool| if active { Style::default() } else { dim };

    let position = focused.unwrap_or(first) + 1;
    let mut spans = vec![
        Span::styled(" ‹ ", arrow(first > 0)),
        Span::styled(format!("{position}/{count}"), dim),
        Span::styled(" › ", arrow(last < count)),
    ];
    if focused.is_some() {
        spans.push(Span::styled(" ←→ 切换 · Enter 加入心愿单", dim));
    }
    Line::from(spans)
}

struct PoiCard<'a> {
    poi: &'a Poi,
    is_saved: bool,
    is_focused: bool,
}

impl Widget for PoiCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        };
        let rating = Line::from(Span::styled(
            format!(" ★ {:.1} ", self.poi.rating),
            Style::default().fg(Color::Yellow),
        ))
        .right_aligned();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(rating);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let mut lines = Vec::with_capacity(CARD_HEIGHT as usize);

        lines.push(Line::from(Span::styled(
            text::truncate(&self.poi.name, width),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        let tags = self
            .poi
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            text::truncate(&tags, width),
            Style::default().fg(Color::DarkGray),
        )));

        let mut description = text::wrap(&self.poi.description, width);
        if description.len() > DESCRIPTION_LINES {
            description.truncate(DESCRIPTION_LINES);
            let last = format!("{}…", description[DESCRIPTION_LINES - 1]);
            description[DESCRIPTION_LINES - 1] = text::truncate(&last, width);
        }
        for _ in description.len()..DESCRIPTION_LINES {
            description.push(String::new());
        }
        lines.extend(
            description
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(Color::Gray)))),
        );

        lines.push(Line::default());
        lines.push(footer_line(self.poi, self.is_saved, width));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Price on the left, the add control on the right.
fn footer_line(poi: &Poi, is_saved: bool, width: usize) -> Line<'static> {
    let (control, control_style) = if is_saved {
        ("[✓]", Style::default().fg(KLOOK_ORANGE))
    } else {
        ("[+]", Style::default().fg(Color::Gray))
    };
    let control_width = text::display_width(control);
    let price = text::truncate(&poi.price_label, width.saturating_sub(control_width + 1));
    let pad = width.saturating_sub(text::display_width(&price) + control_width);
    Line::from(vec![
        Span::styled(price, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(pad)),
        Span::styled(control, control_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::poi;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn visible_cards_counts_whole_cards() {
        assert_eq!(visible_cards(10), 1);
        assert_eq!(visible_cards(CARD_WIDTH), 1);
        assert_eq!(visible_cards(CARD_WIDTH * 2 + CARD_GAP), 2);
        assert_eq!(visible_cards(CARD_WIDTH * 2 + CARD_GAP - 1), 1);
    }

    #[test]
    fn focus_scrolls_strip() {
        assert_eq!(first_visible(None, 2), 0);
        assert_eq!(first_visible(Some(1), 2), 0);
        assert_eq!(first_visible(Some(3), 2), 2);
        assert_eq!(first_visible(Some(1), 1), 1);
    }

    #[test]
    fn card_at_maps_columns_to_cards() {
        let width = CARD_WIDTH * 2 + CARD_GAP;
        assert_eq!(card_at(0, width, None, 2), Some(0));
        assert_eq!(card_at(CARD_WIDTH - 1, width, None, 2), Some(0));
        assert_eq!(card_at(CARD_WIDTH, width, None, 2), None); // the gap
        assert_eq!(card_at(CARD_WIDTH + CARD_GAP, width, None, 2), Some(1));
        assert_eq!(card_at(CARD_WIDTH + CARD_GAP, width, None, 1), None);
    }

    #[test]
    fn card_at_accounts_for_scroll() {
        // One card visible, focus on the second: the first slot shows card 1
        assert_eq!(card_at(3, CARD_WIDTH, Some(1), 2), Some(1));
    }

    #[test]
    fn renders_cards_with_add_state() {
        let mut bucket = BucketStore::new();
        bucket.add(poi(2));
        let (a, b) = (poi(1), poi(2));
        let cards = [&a, &b];

        let area = Rect::new(0, 0, CARD_WIDTH * 2 + CARD_GAP, Carousel::HEIGHT);
        let mut buf = Buffer::empty(area);
        Carousel {
            cards: &cards,
            bucket: &bucket,
            focused: None,
        }
        .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("4.8"));
        assert!(text.contains("4.9"));
        assert!(text.contains("[+]"));
        assert!(text.contains("[✓]"));
        assert!(text.contains("1/2"));
    }

    #[test]
    fn narrow_strip_shows_focused_card() {
        let bucket = BucketStore::new();
        let (a, b) = (poi(1), poi(2));
        let cards = [&a, &b];

        let area = Rect::new(0, 0, CARD_WIDTH, Carousel::HEIGHT);
        let mut buf = Buffer::empty(area);
        Carousel {
            cards: &cards,
            bucket: &bucket,
            focused: Some(1),
        }
        .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("4.9"));
        assert!(!text.contains("4.8"));
        assert!(text.contains("2/2"));
    }

    #[test]
    fn footer_fills_width() {
        let line = footer_line(&poi(1), false, 20);
        assert_eq!(line.width(), 20);
    }
}
