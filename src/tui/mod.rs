//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Two sources feed `update()`:
//!
//! - **Terminal events**, routed by `route_event` depending on the input mode
//! - **Pipeline events** from the reply timers, drained from the channel
//!   after every poll
//!
//! The loop only redraws after something happened. It polls with a short
//! timeout so timer-driven replies show up promptly even while idle.
//!
//! ## Input Modes
//!
//! - **Input**: keys edit the input box, Enter sends.
//! - **Cursor** (Esc): Up/Down select messages, Left/Right move between
//!   carousel cards, Enter/Space/`a` add the focused card to the bucket list.
//!   Typing switches back to Input.

mod component;
mod components;
mod event;
mod text;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc::unbounded_channel;

use crate::core::action::{Action, Effect, update};
use crate::core::catalog::PoiId;
use crate::core::config::ResolvedConfig;
use crate::core::message::MessageBody;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::bucket_drawer::is_toggle_row;
use crate::tui::components::carousel;
use crate::tui::components::message_list::MessageListState;
use crate::tui::components::{InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate messages and cards with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
    /// Screen size at the last draw, for mouse hit testing.
    pub frame_area: Rect,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            input_mode: InputMode::Input, // User expects to type immediately
            frame_area: Rect::default(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: draws reset the blink timer
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Runs the chat until the user quits. Must be called inside a tokio
/// runtime: reply timers are tokio tasks.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    // Channel for actions from reply timers
    let (tx, mut rx) = unbounded_channel();
    let mut app = App::from_config(&config, tx);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(POLL_TIMEOUT);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match route_event(&mut app, &mut tui, event) {
                Effect::Quit => break 'main,
                // Any terminal event may have moved the cursor or scroll
                Effect::Redraw | Effect::None => needs_redraw = true,
            }
        }

        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Redraw => needs_redraw = true,
                Effect::None => {}
            }
        }
    }

    app.conversation.shutdown();
    info!("K-Bot shutting down");
    ratatui::restore();
    Ok(())
}

/// Applies one terminal event: either TUI-local (editing, scrolling,
/// selection) or translated into an `Action` for `update()`.
fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::Redraw,
        // Ctrl+C always quits regardless of mode
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::ToggleDrawer => return update(app, Action::ToggleDrawer),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            return Effect::Redraw;
        }
        TuiEvent::MouseClick(col, row) => return route_click(app, tui, col, row),
        _ => {}
    }

    match tui.input_mode {
        InputMode::Input => {
            if matches!(event, TuiEvent::Escape) {
                tui.input_mode = InputMode::Cursor;
                tui.message_list
                    .select_relative(0, app.conversation.messages().len());
                return Effect::Redraw;
            }
            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => {
                    tui.message_list.stick_to_bottom = true;
                    update(app, Action::Submit(text))
                }
                Some(InputEvent::ContentChanged) => Effect::Redraw,
                None => Effect::None,
            }
        }
        InputMode::Cursor => match event {
            TuiEvent::CursorUp => {
                tui.message_list
                    .select_relative(-1, app.conversation.messages().len());
                Effect::Redraw
            }
            TuiEvent::CursorDown => {
                tui.message_list
                    .select_relative(1, app.conversation.messages().len());
                Effect::Redraw
            }
            TuiEvent::CursorLeft => {
                let list = &mut tui.message_list;
                list.focused_card = list.focused_card.saturating_sub(1);
                Effect::Redraw
            }
            TuiEvent::CursorRight => {
                let count = selected_cards(app, tui).len();
                let list = &mut tui.message_list;
                if list.focused_card + 1 < count {
                    list.focused_card += 1;
                }
                Effect::Redraw
            }
            TuiEvent::Submit | TuiEvent::InputChar(' ') | TuiEvent::InputChar('a') => {
                let cards = selected_cards(app, tui);
                if let Some(id) = cards.get(tui.message_list.focused_card).copied() {
                    return update(app, Action::AddToBucket(id));
                }
                if matches!(event, TuiEvent::Submit) {
                    leave_cursor_mode(tui);
                    Effect::Redraw
                } else {
                    // Not on a carousel: treat as typing
                    leave_cursor_mode(tui);
                    tui.input_box.handle_event(&event);
                    Effect::Redraw
                }
            }
            TuiEvent::Escape => Effect::None,
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace => {
                leave_cursor_mode(tui);
                tui.input_box.handle_event(&event);
                Effect::Redraw
            }
            _ => Effect::None,
        },
    }
}

fn leave_cursor_mode(tui: &mut TuiState) {
    tui.input_mode = InputMode::Input;
    tui.message_list.clear_selection();
}

/// Card ids of the selected message when it's a carousel, in display
/// order. Empty otherwise.
fn selected_cards(app: &App, tui: &TuiState) -> Vec<PoiId> {
    tui.message_list
        .selected_index
        .and_then(|i| app.conversation.messages().get(i))
        .map(|message| card_ids(app, message.body()))
        .unwrap_or_default()
}

fn card_ids(app: &App, body: &MessageBody) -> Vec<PoiId> {
    match body {
        MessageBody::Carousel(items) => carousel::resolve_cards(items, &app.catalog)
            .into_iter()
            .map(|poi| poi.id)
            .collect(),
        _ => Vec::new(),
    }
}

fn route_click(app: &mut App, tui: &mut TuiState, col: u16, row: u16) -> Effect {
    let areas = ui::screen_areas(tui.frame_area, app.drawer.is_open());

    if is_toggle_row(areas.drawer, app.drawer.is_open(), row) {
        return update(app, Action::ToggleDrawer);
    }

    if !areas.messages.contains(Position::new(col, row)) {
        return Effect::None;
    }
    let Some(index) = tui.message_list.hit_test(row - areas.messages.y) else {
        return Effect::None;
    };
    let Some(message) = app.conversation.messages().get(index) else {
        return Effect::None;
    };

    let cards = card_ids(app, message.body());
    let list = &mut tui.message_list;
    let focused = (list.selected_index == Some(index)).then_some(list.focused_card);
    // Same width the list renders the strip at
    let strip_width = areas.messages.width.saturating_sub(1);
    let hit_card = carousel::card_at(col - areas.messages.x, strip_width, focused, cards.len());

    list.select(index);
    match hit_card {
        Some(card) => {
            list.focused_card = card;
            update(app, Action::AddToBucket(cards[card]));
            Effect::Redraw
        }
        None => Effect::Redraw,
    }
}
