use crate::ui::mvi::Reducer;
use crate::ui::panel::intent::PanelIntent;
use crate::ui::panel::state::{OpenPanel, PanelState};

pub struct PanelReducer;

impl Reducer for PanelReducer {
    type State = PanelState;
    type Intent = PanelIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PanelIntent::Toggle {
                panel,
                kind,
                desktop,
            } => {
                if state.is_open_panel(panel) {
                    // Same panel: click-to-close, nothing reopens
                    PanelState::Closed
                } else {
                    PanelState::Open(OpenPanel {
                        panel,
                        kind,
                        desktop,
                    })
                }
            }
            PanelIntent::Close => PanelState::Closed,
        }
    }
}

/// Effects implied by moving from one panel state to another.
///
/// `exit` always runs before `enter`, so the previous panel is fully
/// closed before the next one opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelTransition {
    pub exit: Option<OpenPanel>,
    pub enter: Option<OpenPanel>,
}

impl PanelTransition {
    pub fn between(old: &PanelState, new: &PanelState) -> Self {
        if old == new {
            return Self::default();
        }
        Self {
            exit: old.open_panel().copied(),
            enter: new.open_panel().copied(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.exit.is_none() && self.enter.is_none()
    }
}
