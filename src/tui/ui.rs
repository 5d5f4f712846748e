use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::bucket_drawer::drawer_height;
use crate::tui::components::{BucketDrawer, InputBox, MessageList, TitleBar};

/// Where each part of the screen goes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub header: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub drawer: Rect,
}

/// Splits the screen top to bottom: title, thread timestamp, messages,
/// input, drawer. The messages area absorbs whatever is left.
pub fn screen_areas(area: Rect, drawer_open: bool) -> ScreenAreas {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(InputBox::HEIGHT),
        Length(drawer_height(drawer_open, area.height)),
    ]);
    let [title, header, messages, input, drawer] = layout.areas(area);
    ScreenAreas {
        title,
        header,
        messages,
        input,
        drawer,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    tui.frame_area = frame.area();
    let areas = screen_areas(frame.area(), app.drawer.is_open());

    let timestamp = app.started_at.format("%Y年%m月%d日 %H:%M").to_string();
    frame.render_widget(
        Line::from(Span::styled(timestamp, Style::default().fg(Color::DarkGray))).centered(),
        areas.header,
    );

    MessageList::new(
        &mut tui.message_list,
        app.conversation.messages(),
        &app.catalog,
        &app.bucket,
    )
    .render(frame, areas.messages);

    // Title bar after the list: it shows the list's unseen-content flag
    TitleBar::new(
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);

    BucketDrawer {
        items: app.bucket.list(),
        is_open: app.drawer.is_open(),
    }
    .render(frame, areas.drawer);
}
