use std::fmt;

use crate::format::format_hover_value;

/// The cell currently under the pointer.
///
/// `x_pos`/`y_pos` are a surface-space anchor for tooltip placement and
/// `value` is already rounded to hundredths.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverEvent {
    pub x_label: String,
    pub y_label: String,
    pub x_pos: f32,
    pub y_pos: f32,
    pub value: Option<f64>,
}

impl HoverEvent {
    /// Value as tooltip text, e.g. `12.35` or `n/a`.
    pub fn value_text(&self) -> String {
        format_hover_value(self.value)
    }
}

pub type HoverListener = Box<dyn FnMut(Option<&HoverEvent>) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Single-slot hover state.
///
/// Updates are synchronous: listeners run inside `set_hover`/`clear` before
/// they return. Setting an identical value is a no-op.
#[derive(Default)]
pub struct HoverController {
    current: Option<HoverEvent>,
    listeners: Vec<(ListenerId, HoverListener)>,
    next_id: u64,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HoverEvent> {
        self.current.as_ref()
    }

    pub fn is_hovering(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the hover state. Returns `true` when it changed.
    pub fn set_hover(&mut self, event: HoverEvent) -> bool {
        if self.current.as_ref() == Some(&event) {
            return false;
        }
        tracing::trace!(
            x = %event.x_label,
            y = %event.y_label,
            value = ?event.value,
            "hover enter"
        );
        self.current = Some(event);
        self.notify();
        true
    }

    /// Reset to no hover. Returns `true` when something was hovered.
    pub fn clear(&mut self) -> bool {
        if self.current.take().is_none() {
            return false;
        }
        tracing::trace!("hover cleared");
        self.notify();
        true
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(Option<&HoverEvent>) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let current = self.current.as_ref();
        for (_, listener) in self.listeners.iter_mut() {
            listener(current);
        }
    }
}

impl fmt::Debug for HoverController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverController")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
