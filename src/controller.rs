//! Navigation controller.
//!
//! [`Gnav::init`] fetches and builds the navigation and mounts it into a
//! container; afterwards the host feeds events through
//! [`Gnav::dispatch`]. All navigation state (open panel, listener set,
//! lazy modules) lives in the returned value.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::breakpoint::Breakpoint;
use crate::config::GnavConfig;
use crate::dismissal::{is_outside_click, DismissalCoordinator, Listener, IS_OPEN};
use crate::dom::{Document, El, NodeId};
use crate::error::GnavError;
use crate::events::{DispatchOutcome, Event, Key};
use crate::fragment::{clean_variations, set_domain, FragmentSource, HttpFragmentSource};
use crate::identity::{Anonymous, IdentityProvider, IdentityRegistration};
use crate::lazy::{LazyModule, ModuleLoader, Unavailable};
use crate::menu::{MenuBuilder, NavItem, ProfileSlot, SearchPanel, HAS_MENU};
use crate::profile::{HttpProfileClient, PanelToggle, ProfileClient, ProfileMount, ProfileRenderer};
use crate::search::{SearchHandler, SearchQuery};
use crate::ui::mvi::Reducer;
use crate::ui::panel::{OpenPanel, PanelIntent, PanelKind, PanelReducer, PanelState, PanelTransition};

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// External collaborators of the navigation.
pub struct Services {
    pub fragments: Arc<dyn FragmentSource>,
    pub search: Arc<dyn ModuleLoader<dyn SearchHandler>>,
    pub profile: Arc<dyn ModuleLoader<dyn ProfileRenderer>>,
    pub identity: Arc<dyn IdentityProvider>,
    pub profile_client: Arc<dyn ProfileClient>,
}

impl Services {
    /// HTTP-backed fragment and profile access, no search or profile
    /// module and an anonymous identity provider.
    pub fn from_config(config: &GnavConfig) -> Result<Self, GnavError> {
        let timeout = Duration::from_secs(u64::from(config.timeout_seconds));
        let origin = config.origin_url()?;
        Ok(Self {
            fragments: Arc::new(HttpFragmentSource::new(origin, timeout)?),
            search: Arc::new(Unavailable),
            profile: Arc::new(Unavailable),
            identity: Arc::new(Anonymous),
            profile_client: Arc::new(HttpProfileClient::new(&config.environment(), timeout)?),
        })
    }

    pub fn with_search(mut self, loader: Arc<dyn ModuleLoader<dyn SearchHandler>>) -> Self {
        self.search = loader;
        self
    }

    pub fn with_profile(mut self, loader: Arc<dyn ModuleLoader<dyn ProfileRenderer>>) -> Self {
        self.profile = loader;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }
}

/// Element-level click behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding {
    MobileToggle,
    MenuTrigger { item: NodeId },
    SearchButton { panel: NodeId },
    SignIn,
    PanelTrigger { panel: NodeId, kind: PanelKind },
}

/// Mounted elements, fixed after init.
#[derive(Debug, Clone)]
struct Parts {
    wrapper: NodeId,
    toggle: NodeId,
    items: Vec<NavItem>,
    search: Option<SearchPanel>,
    profile: Option<ProfileSlot>,
}

/// Mutable navigation state: the page, the open panel and the active
/// listener set. Only the controller and the profile module (through
/// [`PanelToggle`]) change it.
struct NavState {
    doc: Document,
    panel: PanelState,
    listeners: DismissalCoordinator,
    breakpoint: Breakpoint,
    bindings: HashMap<NodeId, Binding>,
    /// Elements allowed to open as panels.
    panels: HashSet<NodeId>,
    nav: NodeId,
    curtain: NodeId,
}

impl NavState {
    fn toggle_panel(&mut self, panel: NodeId, kind: PanelKind) {
        if !self.panels.contains(&panel) {
            tracing::debug!(panel = %panel, kind = ?kind, "Ignoring toggle of an unknown panel");
            return;
        }
        let desktop = self.breakpoint.matches();
        self.apply(PanelIntent::Toggle {
            panel,
            kind,
            desktop,
        });
    }

    fn close(&mut self) {
        self.apply(PanelIntent::Close);
    }

    fn apply(&mut self, intent: PanelIntent) {
        let previous = self.panel;
        dispatch_mvi!(self, panel, PanelReducer, intent);
        let transition = PanelTransition::between(&previous, &self.panel);
        if let Some(exited) = transition.exit {
            self.exit(exited);
        }
        if let Some(entered) = transition.enter {
            self.enter(entered);
        }
    }

    fn enter(&mut self, open: OpenPanel) {
        self.doc.add_class(open.panel, IS_OPEN);
        if let Some(control) = self.toggle_control(open.panel) {
            self.doc.set_attr(control, "aria-expanded", "true");
        }
        self.listeners.enter(&open);
        if open.kind == PanelKind::Search {
            self.doc.add_class(self.curtain, IS_OPEN);
            if let Some(input) = self.doc.find(open.panel, |el| el.has_class("gnav-search-input")) {
                self.focus(input);
            }
        }
        tracing::debug!(panel = %open.panel, kind = ?open.kind, desktop = open.desktop, "Panel opened");
    }

    fn exit(&mut self, open: OpenPanel) {
        self.doc.remove_class(open.panel, IS_OPEN);
        self.listeners.exit(&open);
        if let Some(control) = self.toggle_control(open.panel) {
            self.doc.set_attr(control, "aria-expanded", "false");
        }
        self.doc.remove_class(self.curtain, IS_OPEN);
        tracing::debug!(panel = %open.panel, kind = ?open.kind, "Panel closed");
    }

    /// First descendant carrying `aria-expanded`.
    fn toggle_control(&self, panel: NodeId) -> Option<NodeId> {
        self.doc.find(panel, |el| el.has_attr("aria-expanded"))
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(previous) = self.doc.focus(node) {
            if previous != node {
                self.blur(previous);
            }
        }
        if matches!(self.bindings.get(&node), Some(Binding::MenuTrigger { .. })) {
            self.listeners.attach(Listener::SpaceToggle(node));
        }
    }

    fn blur(&mut self, node: NodeId) {
        self.doc.blur(node);
        self.listeners.detach(Listener::SpaceToggle(node));
    }
}

impl PanelToggle for NavState {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    fn toggle(&mut self, panel: NodeId, kind: PanelKind) {
        self.toggle_panel(panel, kind);
    }

    fn bind_trigger(&mut self, trigger: NodeId, panel: NodeId) {
        self.panels.insert(panel);
        self.bindings.insert(
            trigger,
            Binding::PanelTrigger {
                panel,
                kind: PanelKind::Profile,
            },
        );
    }
}

/// A mounted global navigation.
pub struct Gnav {
    state: NavState,
    parts: Parts,
    search: LazyModule<dyn SearchHandler>,
    profile: LazyModule<dyn ProfileRenderer>,
    identity: Arc<dyn IdentityProvider>,
    profile_client: Arc<dyn ProfileClient>,
    identity_ready: Option<oneshot::Receiver<()>>,
}

impl Gnav {
    /// Fetch, build and mount the navigation into `container`.
    ///
    /// On any failure nothing is mounted, the failure is logged and the
    /// document is handed back so the page carries on without a nav.
    pub async fn init(
        document: Document,
        container: NodeId,
        config: &GnavConfig,
        services: Services,
    ) -> Result<Self, Document> {
        let mut document = document;
        match build(&mut document, container, config, services.fragments.as_ref()).await {
            Ok(built) => Ok(Self::assemble(document, built, config, services)),
            Err(e) => {
                tracing::warn!(error = %e, kind = e.kind(), "Could not create global navigation");
                Err(document)
            }
        }
    }

    fn assemble(doc: Document, built: Built, config: &GnavConfig, services: Services) -> Self {
        let mut bindings = HashMap::new();
        let mut panels = HashSet::new();
        bindings.insert(built.parts.toggle, Binding::MobileToggle);
        for item in &built.parts.items {
            if item.menu.is_some() {
                bindings.insert(item.trigger, Binding::MenuTrigger { item: item.element });
                panels.insert(item.element);
            }
        }
        if let Some(profile) = &built.parts.profile {
            panels.insert(profile.element);
        }
        if let Some(search) = &built.parts.search {
            panels.insert(search.element);
            bindings.insert(
                search.button,
                Binding::SearchButton {
                    panel: search.element,
                },
            );
        }

        let identity_ready = built.parts.profile.map(|_| {
            let (registration, ready) =
                IdentityRegistration::new(&config.identity, &config.environment());
            services.identity.register(registration);
            ready
        });

        tracing::info!(
            items = built.parts.items.len(),
            search = built.parts.search.is_some(),
            profile = built.parts.profile.is_some(),
            "Global navigation mounted"
        );

        let breakpoint = Breakpoint::new(config.desktop_min_width, doc.viewport_width());
        Self {
            state: NavState {
                doc,
                panel: PanelState::default(),
                listeners: DismissalCoordinator::new(),
                breakpoint,
                bindings,
                panels,
                nav: built.nav,
                curtain: built.curtain,
            },
            parts: built.parts,
            search: LazyModule::new("search", services.search),
            profile: LazyModule::new("profile", services.profile),
            identity: services.identity,
            profile_client: services.profile_client,
            identity_ready,
        }
    }

    // -- accessors ------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.state.doc
    }

    pub fn into_document(self) -> Document {
        self.state.doc
    }

    pub fn panel_state(&self) -> PanelState {
        self.state.panel
    }

    /// The open panel element, if any.
    pub fn open_panel(&self) -> Option<NodeId> {
        self.state.panel.open_panel().map(|open| open.panel)
    }

    /// Global listeners currently registered.
    pub fn listeners(&self) -> Vec<Listener> {
        self.state.listeners.active().collect()
    }

    pub fn nav(&self) -> NodeId {
        self.state.nav
    }

    pub fn curtain(&self) -> NodeId {
        self.state.curtain
    }

    pub fn wrapper(&self) -> NodeId {
        self.parts.wrapper
    }

    pub fn mobile_toggle(&self) -> NodeId {
        self.parts.toggle
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.parts.items
    }

    pub fn search_panel(&self) -> Option<&SearchPanel> {
        self.parts.search.as_ref()
    }

    pub fn profile_slot(&self) -> Option<&ProfileSlot> {
        self.parts.profile.as_ref()
    }

    pub fn is_mobile_open(&self) -> bool {
        self.state.doc.has_class(self.state.nav, IS_OPEN)
    }

    pub fn is_search_loaded(&self) -> bool {
        self.search.is_loaded()
    }

    /// Toggle a panel directly, as its trigger would. Nodes that are not
    /// panels of this navigation are ignored.
    pub fn toggle(&mut self, panel: NodeId, kind: PanelKind) {
        self.state.toggle_panel(panel, kind);
    }

    // -- events ---------------------------------------------------------------

    /// Deliver one host event.
    pub async fn dispatch(&mut self, event: Event) -> DispatchOutcome {
        match event {
            Event::Click { target } => self.on_click(target).await,
            Event::KeyDown { target, key } => self.on_key_down(target, &key),
            Event::Focus { target } => {
                self.state.focus(target);
                DispatchOutcome::default()
            }
            Event::Blur { target } => {
                self.state.blur(target);
                DispatchOutcome::default()
            }
            Event::Scroll => {
                // One-shot: the listener is gone before the panel closes
                if self.state.listeners.detach(Listener::ScrollOnce) {
                    self.state.close();
                }
                DispatchOutcome::default()
            }
            Event::Resize { width } => {
                self.on_resize(width);
                DispatchOutcome::default()
            }
            Event::Input { target, value } => {
                self.on_input(target, value).await;
                DispatchOutcome::default()
            }
        }
    }

    async fn on_click(&mut self, target: NodeId) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(binding) = self.state.bindings.get(&node).copied() {
                self.run_click(binding, &mut outcome).await;
                if outcome.propagation_stopped {
                    return outcome;
                }
            }
            current = self.state.doc.parent(node);
        }

        if self.state.listeners.is_active(Listener::DocumentClick)
            && self.state.panel.is_open()
            && is_outside_click(&self.state.doc, target, self.state.curtain)
        {
            self.state.close();
        }
        outcome
    }

    async fn run_click(&mut self, binding: Binding, outcome: &mut DispatchOutcome) {
        match binding {
            Binding::MobileToggle => self.toggle_mobile().await,
            Binding::MenuTrigger { item } => {
                outcome.prevent_default();
                outcome.stop_propagation();
                self.state.toggle_panel(item, PanelKind::Menu);
            }
            Binding::SearchButton { panel } => {
                self.load_search().await;
                self.state.toggle_panel(panel, PanelKind::Search);
            }
            Binding::SignIn => {
                outcome.prevent_default();
                self.identity.sign_in();
            }
            Binding::PanelTrigger { panel, kind } => {
                outcome.prevent_default();
                outcome.stop_propagation();
                self.state.toggle_panel(panel, kind);
            }
        }
    }

    async fn toggle_mobile(&mut self) {
        let (nav, curtain) = (self.state.nav, self.state.curtain);
        if self.state.doc.has_class(nav, IS_OPEN) {
            self.state.doc.remove_class(nav, IS_OPEN);
            self.state.doc.remove_class(curtain, IS_OPEN);
            self.state.listeners.detach(Listener::BreakpointChange);
        } else {
            self.state.doc.add_class(nav, IS_OPEN);
            self.state.listeners.attach(Listener::BreakpointChange);
            self.state.doc.add_class(curtain, IS_OPEN);
            self.load_search().await;
        }
    }

    fn on_key_down(&mut self, target: NodeId, key: &Key) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        match key {
            Key::Space if self.state.listeners.space_toggle_active() => {
                outcome.prevent_default();
                match self.state.doc.closest(target, |el| el.has_class(HAS_MENU)) {
                    Some(item) => self.state.toggle_panel(item, PanelKind::Menu),
                    None => tracing::debug!(target = %target, "Space outside a menu item"),
                }
            }
            Key::Escape if self.state.listeners.is_active(Listener::WindowEscape) => {
                self.state.close();
            }
            _ => {}
        }
        outcome
    }

    fn on_resize(&mut self, width: u32) {
        self.state.doc.set_viewport_width(width);
        let Some(desktop) = self.state.breakpoint.resize(width) else {
            return;
        };
        if desktop && self.state.listeners.is_active(Listener::BreakpointChange) {
            let (nav, curtain) = (self.state.nav, self.state.curtain);
            self.state.doc.remove_class(nav, IS_OPEN);
            self.state.doc.remove_class(curtain, IS_OPEN);
            tracing::debug!(width, "Desktop breakpoint reached, mobile nav closed");
        }
    }

    async fn on_input(&mut self, target: NodeId, value: String) {
        let Some(search) = self.parts.search else {
            return;
        };
        if target != search.input {
            return;
        }
        let Some(handler) = self.search.loaded() else {
            tracing::debug!("Search input before the search module loaded");
            return;
        };
        let query = SearchQuery {
            value,
            results: search.results,
            advanced_link: search.advanced_link,
        };
        if let Err(e) = handler.on_input(&mut self.state.doc, query).await {
            tracing::warn!(error = %e, "Search handler failed");
        }
    }

    async fn load_search(&self) {
        if self.parts.search.is_none() {
            return;
        }
        if let Err(e) = self.search.get().await {
            tracing::warn!(module = self.search.name(), error = %e, "Module unavailable");
        }
    }

    // -- identity -------------------------------------------------------------

    /// Wait for the identity provider's readiness signal, then show the
    /// profile or the sign-in link. Runs at most once; later calls and
    /// navs without a profile block return immediately.
    pub async fn identity_ready(&mut self) {
        let Some(ready) = self.identity_ready.take() else {
            return;
        };
        if ready.await.is_err() {
            tracing::debug!("Identity provider dropped its readiness signal");
            return;
        }
        let Some(slot) = self.parts.profile else {
            return;
        };

        let Some(token) = self.identity.access_token() else {
            self.decorate_sign_in(slot);
            return;
        };
        let response = match self.profile_client.fetch_profile(&token).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Profile request failed");
                self.decorate_sign_in(slot);
                return;
            }
        };
        if !response.is_authenticated() {
            tracing::debug!(status = response.status, "Profile service did not authenticate");
            self.decorate_sign_in(slot);
            return;
        }

        let renderer = match self.profile.get().await {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::warn!(module = self.profile.name(), error = %e, "Module unavailable");
                self.decorate_sign_in(slot);
                return;
            }
        };
        let mount = ProfileMount {
            block: slot.block,
            element: slot.element,
            response,
        };
        if let Err(e) = renderer.render(&mut self.state, mount).await {
            tracing::warn!(error = %e, "Profile module failed to render");
        }
    }

    fn decorate_sign_in(&mut self, slot: ProfileSlot) {
        let doc = &mut self.state.doc;
        let Some(link) = doc.find(slot.block, |el| el.is("a")) else {
            tracing::debug!("Profile block has no sign-in link");
            return;
        };
        doc.add_class(link, "gnav-signin");
        doc.append(slot.element, link);
        self.state.bindings.insert(slot.element, Binding::SignIn);
    }
}

/// Everything `build` produced, mounted but not yet wired.
struct Built {
    nav: NodeId,
    curtain: NodeId,
    parts: Parts,
}

async fn build(
    doc: &mut Document,
    container: NodeId,
    config: &GnavConfig,
    fragments: &dyn FragmentSource,
) -> Result<Built, GnavError> {
    if doc.element(container).is_none() {
        return Err(GnavError::missing("container element"));
    }
    let origin = config.origin_url()?;
    let path = doc.meta_content("gnav").unwrap_or_else(|| config.path.clone());

    let html = fragments.fetch(&path).await?;
    if html.trim().is_empty() {
        return Err(GnavError::EmptyFragment { url: path });
    }

    let source = doc.parse_fragment(&html);
    clean_variations(doc, source);
    set_domain(doc, source, &origin);

    let mut builder = MenuBuilder::new(doc, source);
    let toggle = builder.build_toggle();
    let brand = builder.build_brand()?;
    let main_nav = builder.build_main_nav()?;
    let search = builder.build_search()?;
    let profile = builder.build_profile();
    let logo = builder.build_logo();

    let curtain = doc.create_el(El::new("div").class("gnav-curtain"));
    let nav = doc.create_el(El::new("nav").class("gnav"));
    let sections = [
        Some(toggle),
        brand,
        main_nav.as_ref().map(|m| m.element),
        search.map(|s| s.element),
        profile.map(|p| p.element),
        logo,
    ];
    for section in sections.into_iter().flatten() {
        doc.append(nav, section);
    }
    let wrapper = doc.create_el(El::new("div").class("gnav-wrapper"));
    doc.append(wrapper, nav);

    // Mount only once everything above succeeded
    doc.append(container, curtain);
    doc.append(container, wrapper);

    Ok(Built {
        nav,
        curtain,
        parts: Parts {
            wrapper,
            toggle,
            items: main_nav.map(|m| m.items).unwrap_or_default(),
            search,
            profile,
        },
    })
}
