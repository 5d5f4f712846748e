//! # Core Application Logic
//!
//! K-Bot's business logic: the conversation state machine and the stores
//! around it. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • App (stores)         │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No I/O    │
//!                    │  beyond config loading. │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`message`]: `Message` and its three body kinds
//! - [`catalog`]: read-only POI reference data
//! - [`script`]: canned replies and the session opening
//! - [`conversation`]: the thread and its timed reply pipelines
//! - [`bucket`]: saved POIs
//! - [`drawer`]: bucket panel open/closed state
//! - [`state`]: the `App` struct holding all of the above
//! - [`action`]: the `Action` enum and `update()`
//! - [`config`]: layered settings

pub mod action;
pub mod bucket;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod drawer;
pub mod message;
pub mod script;
pub mod state;
