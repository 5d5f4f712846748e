//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::core::action::Action;
use crate::core::catalog::{Poi, PoiCatalog, PoiId};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::ReplyTiming;
use crate::core::state::App;

/// Creates an empty test App on the built-in catalog with default timing,
/// plus the receiving end of its pipeline channel.
pub fn test_app() -> (App, UnboundedReceiver<Action>) {
    let (tx, rx) = unbounded_channel();
    (App::new(PoiCatalog::builtin(), ReplyTiming::default(), tx), rx)
}

/// Default-timing config with the opening enabled and no catalog file.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        timing: ReplyTiming::default(),
        seed_opening: true,
        catalog_path: None,
    }
}

/// A built-in POI by id. Panics if the id isn't in the built-in catalog.
pub fn poi(id: u32) -> Poi {
    PoiCatalog::builtin()
        .get(PoiId(id))
        .cloned()
        .unwrap_or_else(|| panic!("no built-in POI {id}"))
}
