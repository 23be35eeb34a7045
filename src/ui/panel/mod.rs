//! Panel registry: which single overlay panel is open.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Panel state (Closed | Open)
//! - `intent.rs` - Toggle and Close
//! - `reducer.rs` - State transitions (pure, no side effects)
//!
//! [`PanelTransition`] turns an (old, new) state pair into the exit and
//! enter effects the controller applies to the DOM and the listener set.

mod intent;
mod reducer;
mod state;

pub use intent::PanelIntent;
pub use reducer::{PanelReducer, PanelTransition};
pub use state::{OpenPanel, PanelKind, PanelState};
