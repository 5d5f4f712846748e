use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Props travel as struct fields, so every component shares this one
/// `render` signature. `&mut self` lets stateful components refresh
/// caches (heights, scroll offsets) while they draw.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw terminal events into a component's own events.
///
/// `None` means the event was not for this component, or changed nothing
/// the parent needs to hear about.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
