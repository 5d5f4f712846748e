use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::bucket::BucketStore;
use crate::core::catalog::{Poi, PoiCatalog};
use crate::core::message::{MapPreview, Message, MessageBody, Role};
use crate::tui::components::carousel::{self, Carousel};
use crate::tui::components::map_preview::MapCard;
use crate::tui::text;

/// Brand orange used for the user's bubbles and active controls.
pub const KLOOK_ORANGE: Color = Color::Rgb(255, 91, 0);

/// Cells reserved left of assistant content for the avatar.
pub const AVATAR_WIDTH: u16 = 3;
const AVATAR: &str = "🤖";
/// Blank row under every message.
pub const MESSAGE_GAP: u16 = 1;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// What a message looks like on screen, decided purely by its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageView<'a> {
    /// Text: a bubble, styled by who said it.
    Bubble { role: Role, content: &'a str },
    /// Map preview: a static card.
    MapCard(&'a MapPreview),
    /// Carousel: POI cards, ids the catalog doesn't know are skipped.
    Carousel(Vec<&'a Poi>),
}

impl<'a> MessageView<'a> {
    pub fn of(message: &'a Message, catalog: &'a PoiCatalog) -> Self {
        match message.body() {
            MessageBody::Text(content) => MessageView::Bubble {
                role: message.role(),
                content,
            },
            MessageBody::MapPreview(preview) => MessageView::MapCard(preview),
            MessageBody::Carousel(items) => MessageView::Carousel(carousel::resolve_cards(items, catalog)),
        }
    }

    /// Rows this view occupies at `width`, gap included.
    pub fn height(&self, width: u16) -> u16 {
        let body = match self {
            MessageView::Bubble { role, content } => {
                let lines = bubble_lines(*role, content, width);
                (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
            }
            MessageView::MapCard(_) => MapCard::HEIGHT,
            MessageView::Carousel(_) => Carousel::HEIGHT,
        };
        body + MESSAGE_GAP
    }
}

/// Room a bubble may use: 80% of what's left after the avatar column.
fn bubble_max_width(role: Role, width: u16) -> u16 {
    let avail = match role {
        Role::Assistant => width.saturating_sub(AVATAR_WIDTH),
        Role::User => width,
    };
    avail.saturating_mul(4) / 5
}

/// Wrapped content lines. Shared by height calculation and rendering so
/// the two never disagree.
fn bubble_lines(role: Role, content: &str, width: u16) -> Vec<String> {
    let inner = bubble_max_width(role, width).saturating_sub(HORIZONTAL_OVERHEAD) as usize;
    text::wrap(content.trim(), inner.max(1))
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(KLOOK_ORANGE),
        Role::Assistant => Style::default().fg(Color::Gray),
    }
}

/// A transient widget for one message, rebuilt every frame by `MessageList`.
pub struct MessageWidget<'a> {
    pub view: MessageView<'a>,
    pub bucket: &'a BucketStore,
    pub is_selected: bool,
    /// Focused card when this is a selected carousel.
    pub focused_card: usize,
}

impl<'a> Widget for MessageWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.view {
            MessageView::Bubble { role, content } => {
                render_bubble(role, content, self.is_selected, area, buf);
            }
            MessageView::MapCard(preview) => {
                buf.set_string(area.x, area.y + 1, AVATAR, Style::default());
                let card_area = Rect {
                    x: area.x + AVATAR_WIDTH,
                    width: area.width.saturating_sub(AVATAR_WIDTH),
                    height: MapCard::HEIGHT.min(area.height),
                    ..area
                };
                MapCard {
                    preview,
                    is_selected: self.is_selected,
                }
                .render(card_area, buf);
            }
            MessageView::Carousel(cards) => {
                Carousel {
                    cards: &cards,
                    bucket: self.bucket,
                    focused: self.is_selected.then_some(self.focused_card),
                }
                .render(area, buf);
            }
        }
    }
}

fn render_bubble(role: Role, content: &str, is_selected: bool, area: Rect, buf: &mut Buffer) {
    let lines = bubble_lines(role, content, area.width);
    let text_width = lines.iter().map(|l| text::display_width(l)).max().unwrap_or(0) as u16;
    let bubble_width = (text_width + HORIZONTAL_OVERHEAD).min(bubble_max_width(role, area.width));
    let bubble_height = (lines.len() as u16).max(1) + VERTICAL_OVERHEAD;

    let x = match role {
        Role::Assistant => {
            buf.set_string(area.x, area.y + 1, AVATAR, Style::default());
            area.x + AVATAR_WIDTH
        }
        Role::User => area.right().saturating_sub(bubble_width),
    };
    let bubble_area = Rect::new(x, area.y, bubble_width, bubble_height.min(area.height));

    let style = role_style(role);
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::DIM)
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .padding(Padding::horizontal(CONTENT_PAD_H));
    let inner = block.inner(bubble_area);
    block.render(bubble_area, buf);

    let text_style = match role {
        Role::User => Style::default().fg(Color::White),
        Role::Assistant => Style::default(),
    };
    let text_lines: Vec<Line> = lines.into_iter().map(Line::from).collect();
    Paragraph::new(text_lines).style(text_style).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::PoiId;
    use crate::core::message::MessageId;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    // ==========================================================================
    // dispatch
    // ==========================================================================

    #[test]
    fn text_dispatches_to_bubble() {
        let catalog = PoiCatalog::builtin();
        let msg = Message::text(MessageId(1), Role::User, "哪里好吃");
        assert_eq!(
            MessageView::of(&msg, &catalog),
            MessageView::Bubble {
                role: Role::User,
                content: "哪里好吃"
            }
        );
    }

    #[test]
    fn map_preview_dispatches_to_card() {
        let catalog = PoiCatalog::builtin();
        let preview = MapPreview {
            badge: "北部的冲绳".into(),
            title: "推荐探索区域".into(),
            subtitle: "古宇利岛".into(),
        };
        let msg = Message::map_preview(MessageId(2), Role::Assistant, preview.clone());
        assert_eq!(MessageView::of(&msg, &catalog), MessageView::MapCard(&preview));
    }

    #[test]
    fn carousel_resolves_cards_and_skips_unknown_ids() {
        let catalog = PoiCatalog::builtin();
        let msg = Message::carousel(MessageId(3), Role::Assistant, vec![PoiId(2), PoiId(77), PoiId(1)]).unwrap();
        let MessageView::Carousel(cards) = MessageView::of(&msg, &catalog) else {
            panic!("Expected carousel view");
        };
        let ids: Vec<PoiId> = cards.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PoiId(2), PoiId(1)]);
    }

    // ==========================================================================
    // height
    // ==========================================================================

    #[test]
    fn single_line_bubble_height() {
        let view = MessageView::Bubble {
            role: Role::User,
            content: "hi",
        };
        assert_eq!(view.height(80), 1 + VERTICAL_OVERHEAD + MESSAGE_GAP);
    }

    #[test]
    fn long_bubble_wraps() {
        let content = "看到你这次计划玩 5 天，主要想放松。那我建议我们避开国际通，直接去北部看海？这是大概的方位。";
        let view = MessageView::Bubble {
            role: Role::Assistant,
            content,
        };
        assert!(view.height(40) > 1 + VERTICAL_OVERHEAD + MESSAGE_GAP);
    }

    #[test]
    fn empty_bubble_still_has_a_row() {
        let view = MessageView::Bubble {
            role: Role::Assistant,
            content: "   ",
        };
        assert_eq!(view.height(80), 1 + VERTICAL_OVERHEAD + MESSAGE_GAP);
    }

    // ==========================================================================
    // rendering
    // ==========================================================================

    #[test]
    fn user_bubble_is_right_aligned() {
        let bucket = BucketStore::new();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        MessageWidget {
            view: MessageView::Bubble {
                role: Role::User,
                content: "hi",
            },
            bucket: &bucket,
            is_selected: false,
            focused_card: 0,
        }
        .render(area, &mut buf);

        // "hi" + borders + padding = 6 cells, flush right
        assert_eq!(buf[(34, 0)].symbol(), "╭");
        assert_eq!(buf[(39, 0)].symbol(), "╮");
        assert_eq!(buf[(36, 1)].symbol(), "h");
    }

    #[test]
    fn assistant_bubble_has_avatar() {
        let bucket = BucketStore::new();
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        MessageWidget {
            view: MessageView::Bubble {
                role: Role::Assistant,
                content: "嗨！",
            },
            bucket: &bucket,
            is_selected: false,
            focused_card: 0,
        }
        .render(area, &mut buf);

        assert_eq!(buf[(0, 1)].symbol(), AVATAR);
        assert_eq!(buf[(AVATAR_WIDTH, 0)].symbol(), "╭");
        assert!(buffer_text(&buf).contains('嗨'));
    }
}
