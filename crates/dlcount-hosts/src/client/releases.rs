//! Release listing for one host.

use url::Url;

use crate::config::HostClientConfig;
use crate::error::HostResult;
use crate::http::{BackendSettings, HttpBackend, ReqwestBackend};
use crate::models::ReleaseDto;
use crate::url::build_releases_url;

/// Client for a GitHub-compatible release host.
pub struct ReleaseHostClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) name: String,
    pub(crate) base_url: Url,
    pub(crate) owner: String,
}

impl ReleaseHostClient<ReqwestBackend> {
    /// Create a new client with the given configuration.
    pub fn new(config: &HostClientConfig) -> HostResult<Self> {
        let backend = ReqwestBackend::new(&BackendSettings {
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
            token: config.token.clone(),
        })?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> ReleaseHostClient<B> {
    /// Create a new client with a custom backend.
    pub(crate) fn with_backend(config: &HostClientConfig, backend: B) -> HostResult<Self> {
        Ok(Self {
            backend,
            name: config.name.clone(),
            base_url: Url::parse(&config.base_url)?,
            owner: config.owner.clone(),
        })
    }

    /// Fetch the raw release listing of a device.
    pub(crate) async fn fetch_releases(&self, codename: &str) -> HostResult<Vec<ReleaseDto>> {
        let url = build_releases_url(&self.base_url, &self.owner, codename)?;
        self.backend.get_json(&url).await
    }
}
