//! Profile service client and the profile module's entry point.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::Environment;
use crate::dom::{Document, NodeId};
use crate::error::GnavError;
use crate::identity::AccessToken;
use crate::ui::panel::PanelKind;

/// Answer of the profile service.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileResponse {
    pub status: u16,
    /// JSON payload; `Null` when the body was empty or not JSON.
    pub body: serde_json::Value,
}

impl ProfileResponse {
    /// Only a 200 means the visitor is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.status == 200
    }
}

/// Authenticated profile lookup.
#[async_trait]
pub trait ProfileClient: Send + Sync {
    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProfileResponse, GnavError>;
}

/// Profile lookup against the environment's profile service.
#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpProfileClient {
    pub fn new(environment: &Environment, timeout: Duration) -> Result<Self, GnavError> {
        let raw = format!("https://{}/profile", environment.adobe_io);
        let url = Url::parse(&raw).map_err(|e| GnavError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GnavError::Fetch { url: raw, source: e })?;
        Ok(Self { client, url })
    }

    pub fn with_url(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ProfileClient for HttpProfileClient {
    async fn fetch_profile(&self, token: &AccessToken) -> Result<ProfileResponse, GnavError> {
        let resp = self
            .client
            .get(self.url.clone())
            .bearer_auth(&token.token)
            .send()
            .await
            .map_err(|e| GnavError::Fetch {
                url: self.url.to_string(),
                source: e,
            })?;

        let status = resp.status().as_u16();
        let text = resp.text().await.map_err(|e| GnavError::Fetch {
            url: self.url.to_string(),
            source: e,
        })?;
        let body = serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::debug!(status, error = %e, "Profile body is not JSON");
            serde_json::Value::Null
        });

        Ok(ProfileResponse { status, body })
    }
}

/// The panel registry's toggle operation, lent to the profile module so
/// its panel takes part in the one-open-panel rule.
pub trait PanelToggle: Send {
    fn document(&self) -> &Document;

    fn document_mut(&mut self) -> &mut Document;

    /// Toggle `panel` exactly as a trigger click would.
    fn toggle(&mut self, panel: NodeId, kind: PanelKind);

    /// Make clicks on `trigger` toggle `panel` as a profile panel.
    fn bind_trigger(&mut self, trigger: NodeId, panel: NodeId);
}

/// Where the profile module renders.
#[derive(Debug, Clone)]
pub struct ProfileMount {
    /// The authored profile block from the fragment.
    pub block: NodeId,
    /// The mounted `gnav-profile` element.
    pub element: NodeId,
    pub response: ProfileResponse,
}

/// Profile module, loaded lazily once the visitor is known to be signed in.
#[async_trait]
pub trait ProfileRenderer: Send + Sync {
    async fn render(
        &self,
        nav: &mut dyn PanelToggle,
        mount: ProfileMount,
    ) -> Result<(), GnavError>;
}
