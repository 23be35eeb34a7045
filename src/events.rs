//! Discrete UI events delivered to the navigation by the host.

use crate::dom::NodeId;

/// Keyboard key, identified by its physical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Space,
    Enter,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.code` style string.
    pub fn from_code(code: &str) -> Self {
        match code {
            "Escape" => Key::Escape,
            "Space" => Key::Space,
            "Enter" | "NumpadEnter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Host events the navigation reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer click on `target`; bubbles to the document.
    Click { target: NodeId },
    /// Key pressed while `target` has focus; delivered at window level.
    KeyDown { target: NodeId, key: Key },
    Focus { target: NodeId },
    Blur { target: NodeId },
    /// Document scrolled.
    Scroll,
    /// Viewport resized to `width`.
    Resize { width: u32 },
    /// Text input changed.
    Input { target: NodeId, value: String },
}

/// What the navigation did with an event's default behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The host must not run the browser default (link navigation,
    /// page scroll on Space).
    pub default_prevented: bool,
    /// The event must not bubble further in the host page.
    pub propagation_stopped: bool,
}

impl DispatchOutcome {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
