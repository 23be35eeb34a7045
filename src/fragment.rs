//! Loading the navigation fragment and normalizing its markup.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::dom::{Document, NodeId};
use crate::error::GnavError;

/// Suffix the content server appends for body-only markup.
pub const PLAIN_SUFFIX: &str = ".plain.html";

/// Source of navigation markup.
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Fetch the markup for the fragment at `path` (no suffix).
    async fn fetch(&self, path: &str) -> Result<String, GnavError>;
}

/// Fetches fragments over HTTP from a fixed origin.
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: reqwest::Client,
    origin: Url,
}

impl HttpFragmentSource {
    pub fn new(origin: Url, timeout: Duration) -> Result<Self, GnavError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GnavError::Fetch {
                url: origin.to_string(),
                source: e,
            })?;
        Ok(Self { client, origin })
    }

    pub fn with_client(client: reqwest::Client, origin: Url) -> Self {
        Self { client, origin }
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, path: &str) -> Result<String, GnavError> {
        let url = fragment_url(&self.origin, path)?;
        tracing::debug!(url = %url, "Fetching navigation fragment");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GnavError::Fetch {
                url: url.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(GnavError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|e| GnavError::Fetch {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Build `<origin><path>.plain.html`.
pub fn fragment_url(origin: &Url, path: &str) -> Result<Url, GnavError> {
    let path = path.trim();
    let full = format!("{}{}", path.trim_end_matches('/'), PLAIN_SUFFIX);
    origin.join(&full).map_err(|e| GnavError::InvalidUrl {
        url: full,
        reason: e.to_string(),
    })
}

/// Expand authored variation classes.
///
/// A class ending in `-variant` is replaced by the pieces of its stem
/// split on `--`: `gnav-brand--with-logo-variant` becomes `gnav-brand`
/// and `with-logo`. Returns the elements that were rewritten.
pub fn clean_variations(doc: &mut Document, root: NodeId) -> Vec<NodeId> {
    let variants = doc.find_all(root, |el| {
        el.classes().iter().any(|c| c.ends_with("-variant"))
    });

    for node in &variants {
        let classes: Vec<String> = doc
            .element(*node)
            .map(|el| el.classes().to_vec())
            .unwrap_or_default();
        for class in classes {
            let Some(stem) = class.strip_suffix("-variant") else {
                continue;
            };
            doc.remove_class(*node, &class);
            for piece in stem.split("--").filter(|p| !p.is_empty()) {
                doc.add_class(*node, piece);
            }
        }
    }
    variants
}

/// Resolve relative link targets inside `root` against `origin`.
///
/// Absolute links, fragment-only links and unparsable values are kept
/// as authored.
pub fn set_domain(doc: &mut Document, root: NodeId, origin: &Url) {
    for anchor in doc.find_all(root, |el| el.is("a")) {
        let Some(href) = doc.attr(anchor, "href").map(str::to_string) else {
            continue;
        };
        if href.starts_with('#') || Url::parse(&href).is_ok() {
            continue;
        }
        match origin.join(&href) {
            Ok(resolved) => doc.set_attr(anchor, "href", resolved.as_str()),
            Err(e) => tracing::debug!(href = %href, error = %e, "Leaving unparsable link as is"),
        }
    }
}
