//! Pointer events
//!
//! Hosts translate their native input into [`Event`] values in surface-local
//! coordinates and hand them to a chart model.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_MOVE: EventType = 3;
    pub const POINTER_ENTER: EventType = 4;
    pub const POINTER_LEAVE: EventType = 5;
}

/// A pointer event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    None,
}

impl Event {
    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_MOVE,
            data: EventData::Pointer { x, y },
        }
    }

    pub fn pointer_enter(x: f32, y: f32) -> Self {
        Self {
            event_type: event_types::POINTER_ENTER,
            data: EventData::Pointer { x, y },
        }
    }

    pub fn pointer_leave() -> Self {
        Self {
            event_type: event_types::POINTER_LEAVE,
            data: EventData::None,
        }
    }

    /// Pointer position, if this event carries one.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self.data {
            EventData::Pointer { x, y } => Some((x, y)),
            EventData::None => None,
        }
    }
}
