//! Identity provider integration.
//!
//! The provider is an external service: the navigation registers with it
//! once, hands it a one-shot readiness signal, and afterwards only asks
//! for the current access token or triggers the interactive sign-in.

use std::fmt;

use tokio::sync::oneshot;

use crate::config::{Environment, IdentityConfig};

/// Bearer token issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Everything the provider needs to bootstrap itself for this site.
#[derive(Debug)]
pub struct IdentityRegistration {
    pub client_id: String,
    pub scope: String,
    pub locale: String,
    /// Identity environment (`stg1`, `prod`).
    pub environment: String,
    pub auto_validate_token: bool,
    pub use_local_storage: bool,
    pub script_url: String,
    /// Fired by the provider once it can answer token requests.
    pub on_ready: oneshot::Sender<()>,
}

impl IdentityRegistration {
    /// Build a registration plus the receiving end of its readiness signal.
    pub fn new(
        config: &IdentityConfig,
        environment: &Environment,
    ) -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let registration = Self {
            client_id: config.client_id.clone(),
            scope: config.scope.clone(),
            locale: config.locale.clone(),
            environment: environment.ims.clone(),
            auto_validate_token: config.auto_validate_token,
            use_local_storage: config.use_local_storage,
            script_url: config.script_url.clone(),
            on_ready: tx,
        };
        (registration, rx)
    }
}

/// External identity service.
pub trait IdentityProvider: Send + Sync {
    /// One-time registration, performed when the navigation is built.
    fn register(&self, registration: IdentityRegistration);

    /// Current access token, if the visitor is signed in.
    fn access_token(&self) -> Option<AccessToken>;

    /// Start the interactive sign-in flow.
    fn sign_in(&self);
}

/// Provider for hosts without identity support: becomes ready
/// immediately and never has a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn register(&self, registration: IdentityRegistration) {
        let _ = registration.on_ready.send(());
    }

    fn access_token(&self) -> Option<AccessToken> {
        None
    }

    fn sign_in(&self) {
        tracing::info!("Sign-in requested but no identity provider is configured");
    }
}
