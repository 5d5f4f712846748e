//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Display every message through `MessageWidget`
//! - Keep the view pinned to the bottom while new replies arrive
//! - Track the selected message (and the focused card when it's a carousel)
//! - Hit testing for mouse clicks
//!
//! ## Layout caching
//!
//! Messages are immutable and the thread is append-only, so a computed
//! height never goes stale until the width changes. Each frame only the
//! newly appended messages get measured.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::bucket::BucketStore;
use crate::core::catalog::PoiCatalog;
use crate::core::message::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageView, MessageWidget};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message under keyboard or mouse selection
    pub selected_index: Option<usize>,
    /// Card focus inside the selected carousel
    pub focused_card: usize,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Content exists below the visible window
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            selected_index: None,
            focused_card: 0,
            viewport_height: 0,
            has_unseen_content: false,
        }
    }

    fn max_scroll(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_scroll();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Moves the selection by `delta` messages, starting from the last one
    /// if nothing is selected. Resets card focus.
    pub fn select_relative(&mut self, delta: isize, message_count: usize) {
        if message_count == 0 {
            self.selected_index = None;
            return;
        }
        let last = message_count - 1;
        let next = match self.selected_index {
            None => last,
            Some(i) => i.saturating_add_signed(delta).min(last),
        };
        self.select(next);
    }

    pub fn select(&mut self, index: usize) {
        if self.selected_index != Some(index) {
            self.focused_card = 0;
        }
        self.selected_index = Some(index);
        self.scroll_to_selected();
    }

    pub fn clear_selection(&mut self) {
        self.selected_index = None;
        self.focused_card = 0;
    }

    /// Scroll the viewport so the selected message is fully visible.
    /// If the message is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let Some((item_top, item_bottom)) = self.layout.span_of(idx) else {
            return;
        };
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
            self.stick_to_bottom = false;
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            self.stick_to_bottom = new_y >= self.max_scroll();
        }
    }

    /// Message under `screen_row`, measured from the top of the list area.
    pub fn hit_test(&self, screen_row: u16) -> Option<usize> {
        let content_y = screen_row.saturating_add(self.scroll_state.offset().y);
        self.layout.index_at(content_y)
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub catalog: &'a PoiCatalog,
    pub bucket: &'a BucketStore,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        catalog: &'a PoiCatalog,
        bucket: &'a BucketStore,
    ) -> Self {
        Self {
            state,
            messages,
            catalog,
            bucket,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area

        self.state.layout.sync(self.messages, self.catalog, content_width);
        let total_height = self.state.layout.total_height();

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let Some((top, bottom)) = self.state.layout.span_of(i) else {
                continue;
            };
            let rect = Rect::new(0, top, content_width, bottom - top);
            let is_selected = self.state.selected_index == Some(i);
            let widget = MessageWidget {
                view: MessageView::of(&self.messages[i], self.catalog),
                bucket: self.bucket,
                is_selected,
                focused_card: self.state.focused_card,
            };
            scroll_view.render_widget(widget, rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // "↓ New" indicator for the title bar
        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content =
            total_height > area.height && current_offset < total_height.saturating_sub(area.height);
    }
}

impl EventHandler for MessageListState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached per-message heights for one content width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running sums: `prefix_heights[i]` is the bottom edge of message `i`.
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// Number of cached heights still valid for `message_count` messages at
    /// `content_width`. A width change invalidates everything; otherwise
    /// append-only messages keep their heights.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    /// Measures whatever isn't cached yet.
    pub fn sync(&mut self, messages: &[Message], catalog: &PoiCatalog, content_width: u16) {
        let reusable = self.reusable_count(messages.len(), content_width);
        self.heights.truncate(reusable);
        self.prefix_heights.truncate(reusable);
        self.content_width = content_width;

        let mut acc = self.prefix_heights.last().copied().unwrap_or(0);
        for message in &messages[reusable..] {
            let height = MessageView::of(message, catalog).height(content_width);
            acc = acc.saturating_add(height);
            self.heights.push(height);
            self.prefix_heights.push(acc);
        }
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// (top, bottom) rows of message `index`.
    pub fn span_of(&self, index: usize) -> Option<(u16, u16)> {
        let bottom = *self.prefix_heights.get(index)?;
        let top = if index == 0 { 0 } else { self.prefix_heights[index - 1] };
        Some((top, bottom))
    }

    pub fn index_at(&self, content_y: u16) -> Option<usize> {
        let index = self.prefix_heights.partition_point(|&end| end <= content_y);
        (index < self.prefix_heights.len()).then_some(index)
    }

    /// Messages overlapping the viewport, with half a screen of slack on
    /// each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::PoiId;
    use crate::core::message::{MessageId, Role};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn thread() -> Vec<Message> {
        vec![
            Message::text(MessageId(1), Role::User, "哪里好吃"),
            Message::text(MessageId(2), Role::Assistant, "好吃的交给我！"),
            Message::carousel(MessageId(3), Role::Assistant, vec![PoiId(1), PoiId(2)]).unwrap(),
        ]
    }

    fn cache_for(messages: &[Message], width: u16) -> LayoutCache {
        let mut cache = LayoutCache::new();
        cache.sync(messages, &PoiCatalog::builtin(), width);
        cache
    }

    #[test]
    fn test_sync_measures_every_message() {
        let messages = thread();
        let cache = cache_for(&messages, 80);
        assert_eq!(cache.heights.len(), 3);
        assert_eq!(cache.total_height(), cache.heights.iter().sum::<u16>());
    }

    #[test]
    fn test_appended_messages_reuse_heights() {
        let messages = thread();
        let cache = cache_for(&messages[..2], 80);
        assert_eq!(cache.reusable_count(3, 80), 2);
        assert_eq!(cache.reusable_count(3, 60), 0);
    }

    #[test]
    fn test_incremental_sync_matches_full_sync() {
        let messages = thread();
        let catalog = PoiCatalog::builtin();
        let mut incremental = LayoutCache::new();
        incremental.sync(&messages[..1], &catalog, 50);
        incremental.sync(&messages, &catalog, 50);

        let full = cache_for(&messages, 50);
        assert_eq!(incremental.prefix_heights, full.prefix_heights);
    }

    #[test]
    fn test_index_at_and_span_of() {
        let messages = thread();
        let cache = cache_for(&messages, 80);
        let (top, bottom) = cache.span_of(1).unwrap();
        assert_eq!(cache.index_at(top), Some(1));
        assert_eq!(cache.index_at(bottom - 1), Some(1));
        assert_eq!(cache.index_at(bottom), Some(2));
        assert_eq!(cache.index_at(cache.total_height()), None);
        assert!(cache.span_of(3).is_none());
    }

    #[test]
    fn test_select_relative_starts_from_last() {
        let mut state = MessageListState::new();
        state.select_relative(-1, 3);
        assert_eq!(state.selected_index, Some(2));
        state.select_relative(-1, 3);
        assert_eq!(state.selected_index, Some(1));
        state.select_relative(5, 3);
        assert_eq!(state.selected_index, Some(2));
    }

    #[test]
    fn test_changing_selection_resets_card_focus() {
        let mut state = MessageListState::new();
        state.select(2);
        state.focused_card = 1;
        state.select(2);
        assert_eq!(state.focused_card, 1);
        state.select(1);
        assert_eq!(state.focused_card, 0);
    }

    #[test]
    fn test_render_pins_to_bottom() {
        let messages = thread();
        let catalog = PoiCatalog::builtin();
        let bucket = BucketStore::new();
        let mut state = MessageListState::new();

        let mut terminal = Terminal::new(TestBackend::new(70, 8)).unwrap();
        terminal
            .draw(|f| {
                MessageList::new(&mut state, &messages, &catalog, &bucket).render(f, f.area());
            })
            .unwrap();

        assert!(state.stick_to_bottom);
        assert!(!state.has_unseen_content);
        assert_eq!(state.viewport_height, 8);
        // The carousel footers are visible at the bottom
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("[+]"));
    }

    #[test]
    fn test_scroll_up_unpins() {
        let mut state = MessageListState::new();
        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);
    }
}
