//! # Drawer Controller
//!
//! Open/closed state of the bucket-list panel.
//!
//! ```text
//!            toggle()
//!   Closed ◄──────────► Open
//!     │                   ▲
//!     └───────────────────┘
//!       open_implicitly()   (successful bucket add)
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    Open,
    #[default]
    Closed,
}

#[derive(Debug, Default)]
pub struct DrawerController {
    state: DrawerState,
}

impl DrawerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            DrawerState::Open => DrawerState::Closed,
            DrawerState::Closed => DrawerState::Open,
        };
    }

    /// Forces the drawer open. Never closes it.
    pub fn open_implicitly(&mut self) {
        self.state = DrawerState::Open;
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }
}
