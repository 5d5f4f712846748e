//! # Message Model
//!
//! One entry in the chat thread. Messages are immutable: the conversation
//! only ever appends new ones.
//!
//! ```text
//! Message
//! ├── id: MessageId        // monotonic, doubles as render key
//! ├── role: Role           // user | assistant
//! └── body: MessageBody
//!     ├── Text(String)              // content
//!     ├── MapPreview(MapPreview)    // static card
//!     └── Carousel(Vec<PoiId>)      // items, never empty
//! ```
//!
//! The body is a sum type, so "content iff text" and "items iff carousel"
//! hold by construction.

use std::fmt;

use crate::core::catalog::PoiId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    MapPreview,
    Carousel,
}

/// Static "where to go" card shown inline in the thread.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPreview {
    pub badge: String,
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Text(String),
    MapPreview(MapPreview),
    Carousel(Vec<PoiId>),
}

impl MessageBody {
    pub fn kind(&self) -> MessageKind {
        match self {
            MessageBody::Text(_) => MessageKind::Text,
            MessageBody::MapPreview(_) => MessageKind::MapPreview,
            MessageBody::Carousel(_) => MessageKind::Carousel,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MessageError {
    /// A carousel must reference at least one POI.
    EmptyCarousel,
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::EmptyCarousel => write!(f, "carousel message has no items"),
        }
    }
}

impl std::error::Error for MessageError {}

#[derive(Debug, Clone)]
pub struct Message {
    id: MessageId,
    role: Role,
    body: MessageBody,
}

impl Message {
    pub fn text(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            body: MessageBody::Text(content.into()),
        }
    }

    pub fn map_preview(id: MessageId, role: Role, preview: MapPreview) -> Self {
        Self {
            id,
            role,
            body: MessageBody::MapPreview(preview),
        }
    }

    pub fn carousel(id: MessageId, role: Role, items: Vec<PoiId>) -> Result<Self, MessageError> {
        if items.is_empty() {
            return Err(MessageError::EmptyCarousel);
        }
        Ok(Self {
            id,
            role,
            body: MessageBody::Carousel(items),
        })
    }

    /// Builds a message from an already-formed body. Fails for an empty carousel.
    pub fn from_body(id: MessageId, role: Role, body: MessageBody) -> Result<Self, MessageError> {
        match body {
            MessageBody::Carousel(items) => Self::carousel(id, role, items),
            body => Ok(Self { id, role, body }),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn kind(&self) -> MessageKind {
        self.body.kind()
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    /// Text payload, present only for text messages.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Referenced POIs; empty unless this is a carousel.
    pub fn items(&self) -> &[PoiId] {
        match &self.body {
            MessageBody::Carousel(items) => items,
            _ => &[],
        }
    }
}

/// Identity is the id alone.
impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}
