//! Transient global listeners that dismiss the open panel.
//!
//! Every listener the navigation registers at window or document level
//! lives in one [`DismissalCoordinator`] set. Opening a panel registers
//! exactly [`listeners_for`] that panel; closing it removes exactly the
//! same set, so repeated open/close cycles never accumulate listeners.

use std::collections::BTreeSet;

use crate::dom::{Document, NodeId};
use crate::ui::panel::{OpenPanel, PanelKind};

/// Class marking an open panel, the open mobile nav and the open curtain.
pub const IS_OPEN: &str = "is-Open";

/// A global listener owned by the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Listener {
    /// Document click closing the open panel from outside.
    DocumentClick,
    /// Window keydown closing the open panel on Escape.
    WindowEscape,
    /// Document scroll closing a desktop panel other than search,
    /// removed after first use.
    ScrollOnce,
    /// Window keydown toggling the menu of the focused trigger on Space.
    SpaceToggle(NodeId),
    /// Breakpoint change closing the mobile nav on desktop.
    BreakpointChange,
}

/// Listeners an open panel registers while it stays open.
pub fn listeners_for(open: &OpenPanel) -> Vec<Listener> {
    let mut listeners = vec![Listener::DocumentClick, Listener::WindowEscape];
    if open.kind != PanelKind::Search && open.desktop {
        listeners.push(Listener::ScrollOnce);
    }
    listeners
}

/// Owner of the active listener set.
#[derive(Debug, Clone, Default)]
pub struct DismissalCoordinator {
    active: BTreeSet<Listener>,
}

impl DismissalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the listener set of a panel that just opened.
    pub fn enter(&mut self, open: &OpenPanel) {
        for listener in listeners_for(open) {
            self.attach(listener);
        }
    }

    /// Remove the listener set of a panel that just closed.
    pub fn exit(&mut self, open: &OpenPanel) {
        for listener in listeners_for(open) {
            self.detach(listener);
        }
    }

    /// Returns false if the listener was already attached.
    pub fn attach(&mut self, listener: Listener) -> bool {
        let added = self.active.insert(listener);
        if added {
            tracing::trace!(?listener, "listener attached");
        }
        added
    }

    /// Returns false if the listener was not attached.
    pub fn detach(&mut self, listener: Listener) -> bool {
        let removed = self.active.remove(&listener);
        if removed {
            tracing::trace!(?listener, "listener detached");
        }
        removed
    }

    pub fn is_active(&self, listener: Listener) -> bool {
        self.active.contains(&listener)
    }

    pub fn active(&self) -> impl Iterator<Item = Listener> + '_ {
        self.active.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Any Space-toggle listener, whichever trigger it belongs to.
    pub fn space_toggle_active(&self) -> bool {
        self.active
            .iter()
            .any(|l| matches!(l, Listener::SpaceToggle(_)))
    }
}

/// Decide whether a document click dismisses the open panel.
///
/// Clicks on the curtain always dismiss. Otherwise the click dismisses
/// when its target is not inside any element marked open.
pub fn is_outside_click(doc: &Document, target: NodeId, curtain: NodeId) -> bool {
    if target == curtain {
        return true;
    }
    doc.closest(target, |el| el.has_class(IS_OPEN)).is_none()
}
