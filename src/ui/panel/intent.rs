//! Intents for the panel registry.

use crate::dom::NodeId;
use crate::ui::mvi::Intent;
use crate::ui::panel::state::PanelKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelIntent {
    /// Open `panel`, closing whatever is open. If `panel` is the open
    /// one, just close it.
    Toggle {
        panel: NodeId,
        kind: PanelKind,
        /// Viewport was desktop width when the toggle happened.
        desktop: bool,
    },
    /// Close the open panel, if any (dismissal triggers).
    Close,
}

impl Intent for PanelIntent {}
