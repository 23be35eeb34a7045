//! State for the panel registry.

use crate::dom::NodeId;
use crate::ui::mvi::UiState;

/// Kind of overlay panel. Decides which dismissal listeners an open
/// panel gets and whether the curtain is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Mainnav item with a mega-menu.
    Menu,
    /// Search bar overlay.
    Search,
    /// Panel registered by the profile module.
    Profile,
}

/// The panel currently open and the conditions it was opened under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPanel {
    pub panel: NodeId,
    pub kind: PanelKind,
    pub desktop: bool,
}

/// At most one panel is open at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open(OpenPanel),
}

impl UiState for PanelState {}

impl PanelState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn open_panel(&self) -> Option<&OpenPanel> {
        match self {
            Self::Open(open) => Some(open),
            Self::Closed => None,
        }
    }

    /// Check whether `panel` is the open one.
    pub fn is_open_panel(&self, panel: NodeId) -> bool {
        self.open_panel().is_some_and(|open| open.panel == panel)
    }
}
