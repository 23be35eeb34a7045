//! Shared fixtures and collaborator mocks.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use gnav::config::GnavConfig;
use gnav::dom::{Document, El, NodeId};
use gnav::fragment::FragmentSource;
use gnav::identity::{AccessToken, IdentityProvider, IdentityRegistration};
use gnav::lazy::ModuleLoader;
use gnav::menu::NavItem;
use gnav::profile::{PanelToggle, ProfileClient, ProfileMount, ProfileRenderer, ProfileResponse};
use gnav::search::{SearchHandler, SearchQuery};
use gnav::{Gnav, GnavError, Services};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

pub const DESKTOP: u32 = 1440;
pub const MOBILE: u32 = 800;

/// Authored navigation fragment covering every block the builder reads.
pub const FRAGMENT: &str = r#"
<div class="gnav-brand--with-logo-variant"><p><a href="/">Adobe for Business</a></p></div>
<div><h2><a href="/products">Products</a></h2><div><p>Creative Cloud</p></div></div>
<div><h2><a href="/solutions">Solutions</a></h2><div><p>Marketing</p></div><div><p>Commerce</p></div></div>
<div><h2><a href="/resources">Resources</a></h2><div><p>Blog</p></div><div><p>Events</p></div><div><p>Webinars</p></div></div>
<div><h2><a href="/pricing">Pricing</a></h2></div>
<div class="search"><p>Search Adobe</p><p><a href="/search">Advanced search</a></p></div>
<div class="profile"><p><a href="/signin">Sign in</a></p></div>
<div class="adobe-logo"><p><a href="https://www.adobe.com">Adobe</a></p></div>
"#;

pub fn config() -> GnavConfig {
    GnavConfig::default()
}

/// Empty host page with a header container.
pub fn page(width: u32) -> (Document, NodeId) {
    let mut doc = Document::new();
    doc.set_viewport_width(width);
    let header = doc.create_element("header");
    doc.append(doc.body(), header);
    (doc, header)
}

// -- fragment source ----------------------------------------------------------

pub struct StaticFragments {
    html: Option<String>,
    pub paths: Mutex<Vec<String>>,
}

impl StaticFragments {
    pub fn new(html: Option<&str>) -> Self {
        Self {
            html: html.map(str::to_string),
            paths: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FragmentSource for StaticFragments {
    async fn fetch(&self, path: &str) -> Result<String, GnavError> {
        self.paths.lock().push(path.to_string());
        self.html.clone().ok_or_else(|| GnavError::Status {
            url: format!("{}.plain.html", path),
            status: 404,
        })
    }
}

// -- lazy modules -------------------------------------------------------------

/// Loader counting how often the module was imported.
pub struct CountingLoader<T: ?Sized> {
    pub calls: AtomicUsize,
    module: Arc<T>,
}

impl<T: ?Sized> CountingLoader<T> {
    pub fn new(module: Arc<T>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            module,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: ?Sized + Send + Sync> ModuleLoader<T> for CountingLoader<T> {
    async fn load(&self) -> Result<Arc<T>, GnavError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.module))
    }
}

#[derive(Default)]
pub struct RecordingSearch {
    pub queries: Mutex<Vec<SearchQuery>>,
}

#[async_trait]
impl SearchHandler for RecordingSearch {
    async fn on_input(&self, doc: &mut Document, query: SearchQuery) -> Result<(), GnavError> {
        doc.set_text_content(query.results, &format!("results for {}", query.value));
        self.queries.lock().push(query);
        Ok(())
    }
}

/// Profile module that renders a button toggling the profile element.
#[derive(Default)]
pub struct RecordingRenderer {
    pub mounts: Mutex<Vec<ProfileMount>>,
    pub button: Mutex<Option<NodeId>>,
}

#[async_trait]
impl ProfileRenderer for RecordingRenderer {
    async fn render(&self, nav: &mut dyn PanelToggle, mount: ProfileMount) -> Result<(), GnavError> {
        let doc = nav.document_mut();
        let button = doc.create_el(
            El::new("button")
                .class("gnav-profile-button")
                .attr("aria-expanded", false),
        );
        let menu = doc.create_el(El::new("div").class("gnav-profile-menu"));
        doc.append(mount.element, button);
        doc.append(mount.element, menu);
        nav.bind_trigger(button, mount.element);
        *self.button.lock() = Some(button);
        self.mounts.lock().push(mount);
        Ok(())
    }
}

// -- identity and profile service ---------------------------------------------

pub struct MockIdentity {
    token: Option<String>,
    ready: Mutex<Option<oneshot::Sender<()>>>,
    pub registrations: Mutex<Vec<(String, String, String)>>,
    pub sign_ins: AtomicUsize,
}

impl MockIdentity {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
            ready: Mutex::new(None),
            registrations: Mutex::new(Vec::new()),
            sign_ins: AtomicUsize::new(0),
        }
    }

    /// Fire the readiness signal captured at registration.
    pub fn fire_ready(&self) -> bool {
        match self.ready.lock().take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    pub fn sign_ins(&self) -> usize {
        self.sign_ins.load(Ordering::SeqCst)
    }
}

impl IdentityProvider for MockIdentity {
    fn register(&self, registration: IdentityRegistration) {
        self.registrations.lock().push((
            registration.client_id.clone(),
            registration.scope.clone(),
            registration.environment.clone(),
        ));
        *self.ready.lock() = Some(registration.on_ready);
    }

    fn access_token(&self) -> Option<AccessToken> {
        self.token.as_deref().map(AccessToken::new)
    }

    fn sign_in(&self) {
        self.sign_ins.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct MockProfileClient {
    status: u16,
    pub calls: AtomicUsize,
}

impl MockProfileClient {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProfileClient for MockProfileClient {
    async fn fetch_profile(&self, _token: &AccessToken) -> Result<ProfileResponse, GnavError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProfileResponse {
            status: self.status,
            body: serde_json::json!({ "name": "Ada" }),
        })
    }
}

// -- harness ------------------------------------------------------------------

/// All mocks behind one navigation instance.
pub struct Harness {
    pub fragments: Arc<StaticFragments>,
    pub search: Arc<RecordingSearch>,
    pub search_loader: Arc<CountingLoader<dyn SearchHandler>>,
    pub renderer: Arc<RecordingRenderer>,
    pub profile_loader: Arc<CountingLoader<dyn ProfileRenderer>>,
    pub identity: Arc<MockIdentity>,
    pub profile_client: Arc<MockProfileClient>,
}

impl Harness {
    pub fn new(fragment: Option<&str>, token: Option<&str>, profile_status: u16) -> Self {
        let search = Arc::new(RecordingSearch::default());
        let renderer = Arc::new(RecordingRenderer::default());
        let search_module: Arc<dyn SearchHandler> = search.clone();
        let profile_module: Arc<dyn ProfileRenderer> = renderer.clone();
        Self {
            fragments: Arc::new(StaticFragments::new(fragment)),
            search,
            search_loader: Arc::new(CountingLoader::new(search_module)),
            renderer,
            profile_loader: Arc::new(CountingLoader::new(profile_module)),
            identity: Arc::new(MockIdentity::new(token)),
            profile_client: Arc::new(MockProfileClient::new(profile_status)),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            fragments: self.fragments.clone(),
            search: self.search_loader.clone(),
            profile: self.profile_loader.clone(),
            identity: self.identity.clone(),
            profile_client: self.profile_client.clone(),
        }
    }
}

/// Mount the standard fragment at `width`.
pub async fn mount(width: u32) -> (Gnav, Harness) {
    mount_with(Harness::new(Some(FRAGMENT), None, 401), width).await
}

pub async fn mount_with(harness: Harness, width: u32) -> (Gnav, Harness) {
    let (doc, header) = page(width);
    let gnav = match Gnav::init(doc, header, &config(), harness.services()).await {
        Ok(gnav) => gnav,
        Err(_) => panic!("navigation failed to mount"),
    };
    (gnav, harness)
}

/// Nav item whose trigger reads `label`.
pub fn item(gnav: &Gnav, label: &str) -> NavItem {
    gnav.nav_items()
        .iter()
        .find(|item| gnav.document().text_content(item.trigger) == label)
        .cloned()
        .unwrap_or_else(|| panic!("no nav item labelled {}", label))
}

/// Elements carrying the open marker among panels (items, search, profile).
pub fn open_panels(gnav: &Gnav) -> Vec<NodeId> {
    let doc = gnav.document();
    let mut panels: Vec<NodeId> = gnav.nav_items().iter().map(|i| i.element).collect();
    if let Some(search) = gnav.search_panel() {
        panels.push(search.element);
    }
    if let Some(profile) = gnav.profile_slot() {
        panels.push(profile.element);
    }
    panels
        .into_iter()
        .filter(|p| doc.has_class(*p, "is-Open"))
        .collect()
}
