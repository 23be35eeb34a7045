//! State / intent / reducer primitives for the navigation's panel state.
//!
//! ```text
//! Event ──→ Intent ──→ Reducer ──→ State
//!                                    │
//!                  (old, new) ──→ open/close effects
//! ```
//!
//! Reducers never touch the page. The controller compares the state
//! before and after a reduction and applies the DOM and listener effects
//! of that transition.

/// A value describing which overlay is open.
///
/// `Default` is the resting state; `PartialEq` lets the controller spot
/// transitions.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Something that asks the state to change: a trigger activation or a
/// dismissal (outside click, Escape, scroll).
pub trait Intent: Send + 'static {}

/// The single place where state transitions are decided.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// `(State, Intent) -> State`, with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
