//! # Application State
//!
//! Core business state for K-Bot. Domain only: presentation state lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: ConversationController  // thread + reply pipelines
//! ├── bucket: BucketStore                   // saved POIs
//! ├── drawer: DrawerController              // bucket panel open/closed
//! ├── catalog: PoiCatalog                   // reference data
//! ├── status_message: String                // title bar text
//! └── started_at: DateTime<Local>           // thread timestamp header
//! ```
//!
//! Stores are only mutated through their own methods, and only from
//! `update(state, action)` in action.rs.

use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::action::Action;
use crate::core::bucket::BucketStore;
use crate::core::catalog::PoiCatalog;
use crate::core::config::{self, ResolvedConfig};
use crate::core::conversation::{ConversationController, ReplyTiming};
use crate::core::drawer::DrawerController;
use crate::core::script::ReplyScript;

pub struct App {
    pub conversation: ConversationController,
    pub bucket: BucketStore,
    pub drawer: DrawerController,
    pub catalog: PoiCatalog,
    pub status_message: String,
    pub started_at: DateTime<Local>,
}

impl App {
    /// An empty session: no opening, empty bucket, drawer closed.
    pub fn new(catalog: PoiCatalog, timing: ReplyTiming, tx: UnboundedSender<Action>) -> Self {
        let script = ReplyScript::okinawa(&catalog);
        Self {
            conversation: ConversationController::new(script, timing, tx),
            bucket: BucketStore::new(),
            drawer: DrawerController::new(),
            catalog,
            status_message: String::new(),
            started_at: Local::now(),
        }
    }

    pub fn from_config(config: &ResolvedConfig, tx: UnboundedSender<Action>) -> Self {
        let catalog = config::load_catalog(config);
        let mut app = Self::new(catalog, config.timing, tx);
        if config.seed_opening {
            app.conversation = app.conversation.with_opening();
        }
        app
    }
}
