use gnav::dom::Document;
use gnav::ui::mvi::Reducer;
use gnav::ui::panel::{OpenPanel, PanelIntent, PanelKind, PanelReducer, PanelState, PanelTransition};

fn toggle(state: PanelState, panel: gnav::dom::NodeId, kind: PanelKind) -> PanelState {
    PanelReducer::reduce(
        state,
        PanelIntent::Toggle {
            panel,
            kind,
            desktop: true,
        },
    )
}

#[test]
fn toggle_from_closed_opens() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let state = toggle(PanelState::Closed, a, PanelKind::Menu);
    assert!(state.is_open_panel(a));
    assert_eq!(state.open_panel().unwrap().kind, PanelKind::Menu);
}

#[test]
fn toggle_same_panel_closes() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let open = toggle(PanelState::Closed, a, PanelKind::Menu);
    let closed = toggle(open, a, PanelKind::Menu);
    assert_eq!(closed, PanelState::Closed);
}

#[test]
fn toggle_other_panel_switches() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    let state = toggle(toggle(PanelState::Closed, a, PanelKind::Menu), b, PanelKind::Search);
    assert!(state.is_open_panel(b));
    assert!(!state.is_open_panel(a));
}

#[test]
fn close_from_any_state() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    assert_eq!(PanelReducer::reduce(PanelState::Closed, PanelIntent::Close), PanelState::Closed);
    let open = toggle(PanelState::Closed, a, PanelKind::Profile);
    assert_eq!(PanelReducer::reduce(open, PanelIntent::Close), PanelState::Closed);
}

#[test]
fn transition_switch_exits_then_enters() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    let old = toggle(PanelState::Closed, a, PanelKind::Menu);
    let new = toggle(old, b, PanelKind::Menu);
    let transition = PanelTransition::between(&old, &new);
    assert_eq!(transition.exit.map(|o| o.panel), Some(a));
    assert_eq!(transition.enter.map(|o| o.panel), Some(b));
}

#[test]
fn transition_closed_to_closed_is_noop() {
    let transition = PanelTransition::between(&PanelState::Closed, &PanelState::Closed);
    assert!(transition.is_noop());
}

#[test]
fn transition_close_only_exits() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let old = PanelState::Open(OpenPanel {
        panel: a,
        kind: PanelKind::Search,
        desktop: false,
    });
    let transition = PanelTransition::between(&old, &PanelState::Closed);
    assert!(transition.enter.is_none());
    assert_eq!(transition.exit.unwrap().kind, PanelKind::Search);
}
