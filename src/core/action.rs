//! # Actions
//!
//! Everything that can happen in K-Bot becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! A reply timer fires? That's `Action::Pipeline(event)`.
//!
//! `update()` applies one action to the `App` and reports what the event
//! loop should do next. It runs to completion before the next action is
//! looked at, so there is never more than one mutation in flight.
//!
//! ```text
//! App + Action  →  update()  →  Effect
//! ```

use log::{debug, info, warn};

use crate::core::catalog::PoiId;
use crate::core::conversation::PipelineEvent;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted input text.
    Submit(String),
    /// A reply pipeline timer expired.
    Pipeline(PipelineEvent),
    /// User tapped "add" on a POI card.
    AddToBucket(PoiId),
    /// User tapped the drawer handle.
    ToggleDrawer,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Visible state changed.
    Redraw,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => match app.conversation.submit_user_text(&text) {
            Some(_) => {
                app.status_message = String::from("K-Bot 正在输入...");
                Effect::Redraw
            }
            None => Effect::None,
        },
        Action::Pipeline(event) => {
            if !app.conversation.advance(event) {
                return Effect::None;
            }
            if app.conversation.pending_pipelines() == 0 {
                app.status_message.clear();
            }
            Effect::Redraw
        }
        Action::AddToBucket(id) => {
            let Some(poi) = app.catalog.get(id) else {
                warn!("Add to bucket for unknown POI {}", id);
                return Effect::None;
            };
            let name = poi.name.clone();
            if app.bucket.add(poi.clone()) {
                app.drawer.open_implicitly();
                info!("Saved POI {} ({} in bucket)", id, app.bucket.size());
                app.status_message = format!("已加入心愿单: {}", name);
                Effect::Redraw
            } else {
                debug!("POI {} already in bucket", id);
                Effect::None
            }
        }
        Action::ToggleDrawer => {
            app.drawer.toggle();
            Effect::Redraw
        }
        Action::Quit => Effect::Quit,
    }
}
