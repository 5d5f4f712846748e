use std::time::Duration;

use kbot::core::action::{Action, Effect, update};
use kbot::core::catalog::{PoiCatalog, PoiId};
use kbot::core::conversation::ReplyTiming;
use kbot::core::message::{MessageKind, Role};
use kbot::core::state::App;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::Instant;

// ============================================================================
// Helper Functions
// ============================================================================

fn new_app() -> (App, UnboundedReceiver<Action>) {
    let (tx, rx) = unbounded_channel();
    (App::new(PoiCatalog::builtin(), ReplyTiming::default(), tx), rx)
}

/// Waits for the next pipeline action and applies it, the way the event
/// loop does.
async fn apply_next(app: &mut App, rx: &mut UnboundedReceiver<Action>) -> Effect {
    let action = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("pipeline stalled")
        .expect("channel closed");
    update(app, action)
}

fn kinds(app: &App) -> Vec<(Role, MessageKind)> {
    app.conversation
        .messages()
        .iter()
        .map(|m| (m.role(), m.kind()))
        .collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_food_question_to_bucket_list() {
    let (mut app, mut rx) = new_app();
    assert!(app.conversation.messages().is_empty());
    assert!(app.bucket.is_empty());
    assert!(!app.drawer.is_open());

    let start = Instant::now();
    assert_eq!(update(&mut app, Action::Submit("哪里好吃".into())), Effect::Redraw);
    assert_eq!(kinds(&app), vec![(Role::User, MessageKind::Text)]);
    assert_eq!(app.conversation.messages()[0].content(), Some("哪里好吃"));

    apply_next(&mut app, &mut rx).await;
    assert_eq!(start.elapsed(), Duration::from_millis(1000));
    assert_eq!(
        kinds(&app),
        vec![
            (Role::User, MessageKind::Text),
            (Role::Assistant, MessageKind::Text),
        ]
    );

    apply_next(&mut app, &mut rx).await;
    assert_eq!(start.elapsed(), Duration::from_millis(1500));
    assert_eq!(
        kinds(&app),
        vec![
            (Role::User, MessageKind::Text),
            (Role::Assistant, MessageKind::Text),
            (Role::Assistant, MessageKind::Carousel),
        ]
    );
    let carousel = &app.conversation.messages()[2];
    assert_eq!(carousel.items().len(), 2);
    assert!(carousel.items().contains(&PoiId(1)));
    assert!(app.status_message.is_empty());

    assert_eq!(update(&mut app, Action::AddToBucket(PoiId(1))), Effect::Redraw);
    assert_eq!(app.bucket.size(), 1);
    assert!(app.bucket.contains(PoiId(1)));
    assert!(app.drawer.is_open());

    assert_eq!(update(&mut app, Action::AddToBucket(PoiId(1))), Effect::None);
    assert_eq!(app.bucket.size(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blank_submission_schedules_nothing() {
    let (mut app, mut rx) = new_app();
    assert_eq!(update(&mut app, Action::Submit("  \t ".into())), Effect::None);
    assert!(app.conversation.messages().is_empty());
    assert_eq!(app.conversation.pending_pipelines(), 0);

    let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    assert!(waited.is_err(), "no pipeline event expected");
}

#[tokio::test(start_paused = true)]
async fn test_add_reopens_drawer_closed_by_user() {
    let (mut app, _rx) = new_app();
    update(&mut app, Action::AddToBucket(PoiId(2)));
    assert!(app.drawer.is_open());

    update(&mut app, Action::ToggleDrawer);
    assert!(!app.drawer.is_open());

    // Toggle never touches the bucket
    assert_eq!(app.bucket.size(), 1);

    update(&mut app, Action::AddToBucket(PoiId(1)));
    assert!(app.drawer.is_open());
    let ids: Vec<PoiId> = app.bucket.list().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![PoiId(2), PoiId(1)]);
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing() {
    let (tx, mut rx) = unbounded_channel();
    let mut app = App::new(
        PoiCatalog::builtin(),
        ReplyTiming::from_millis(200, 50),
        tx,
    );

    let start = Instant::now();
    update(&mut app, Action::Submit("beach".into()));
    apply_next(&mut app, &mut rx).await;
    assert_eq!(start.elapsed(), Duration::from_millis(200));
    apply_next(&mut app, &mut rx).await;
    assert_eq!(start.elapsed(), Duration::from_millis(250));
    assert_eq!(app.conversation.messages().len(), 3);
}
