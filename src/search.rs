//! Entry point of the search feature module.

use async_trait::async_trait;

use crate::dom::{Document, NodeId};
use crate::error::GnavError;

/// One keystroke's worth of search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Current value of the search input.
    pub value: String,
    /// Container the handler renders results into.
    pub results: NodeId,
    /// The "advanced search" link, if the fragment provided one.
    pub advanced_link: Option<NodeId>,
}

/// Search-as-you-type handler, loaded lazily on first use.
#[async_trait]
pub trait SearchHandler: Send + Sync {
    async fn on_input(&self, doc: &mut Document, query: SearchQuery) -> Result<(), GnavError>;
}
