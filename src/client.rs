use std::sync::Arc;

use bon::Builder;
use reqwest::Url;
use tracing::debug;

use crate::{
    error::ClientError,
    models::{SourceCatalog, SourceInfo},
    paths::BASE_URL_ENV,
};

/// Read-only client for the news aggregator API.
///
/// Cloning is cheap; clones share only the read-only source catalog.
/// Calls are independent round trips: nothing is cached or coalesced.
#[derive(Clone, Debug, Builder)]
pub struct NewsClient {
    pub(crate) base_url: Url,
    #[builder(default)]
    pub(crate) http_client: reqwest::Client,
    #[builder(into, default = Arc::new(SourceCatalog::default()))]
    sources: Arc<SourceCatalog>,
}

impl NewsClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL '{base_url}': {e}")))?;

        Ok(Self::builder().base_url(base_url).build())
    }

    pub fn load_from_env() -> Result<Self, ClientError> {
        let base_url = std::env::var(BASE_URL_ENV).map_err(|_| {
            ClientError::MissingConfig(format!("{BASE_URL_ENV} environment variable not set"))
        })?;

        debug!("Using news API at {}", base_url);
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn sources(&self) -> &SourceCatalog {
        &self.sources
    }

    pub fn source_info(&self, code: &str) -> Option<&SourceInfo> {
        self.sources.info(code)
    }

    /// Display name of a source code, empty when unknown.
    pub fn source_name(&self, code: &str) -> &str {
        self.sources.name(code)
    }

    pub fn source_icon(&self, code: &str) -> Option<&str> {
        self.sources.icon(code)
    }
}
