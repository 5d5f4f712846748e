//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from references into App state:
//! - `TitleBar`: chat name, status, "↓ New" marker
//! - `MessageWidget`: one message, dispatched on its kind to a bubble,
//!   a `MapCard` or a `Carousel`
//! - `BucketDrawer`: the bucket list, collapsed or open
//!
//! ### Stateful Components (Event-Driven)
//!
//! Hold local state in `TuiState` and emit events:
//! - `InputBox`: single-line input, emits `Submit`
//! - `MessageList`: scrollable conversation view with layout caching
//!
//! Components receive external data as props, never by reaching into App
//! themselves. Each file carries its own state types, rendering, event
//! handling and tests.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single message renderer)
//! ├── carousel.rs      (POI card strip)
//! ├── map_preview.rs   (Static map card)
//! ├── message_list.rs  (Scrollable message container)
//! ├── bucket_drawer.rs (Bucket list drawer)
//! └── input_box/       (Single-line text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod bucket_drawer;
pub mod carousel;
pub mod input_box;
pub mod map_preview;
pub mod message;
pub mod message_list;
pub use bucket_drawer::BucketDrawer;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
