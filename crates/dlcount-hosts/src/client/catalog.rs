//! Device catalog download.

use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::HostResult;
use crate::http::{BackendSettings, HttpBackend, ReqwestBackend};
use crate::models::DeviceDto;

/// Client fetching the device catalog document.
pub struct CatalogClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) url: Url,
}

impl CatalogClient<ReqwestBackend> {
    /// Create a new client with the given configuration.
    pub fn new(config: &CatalogClientConfig) -> HostResult<Self> {
        let backend = ReqwestBackend::new(&BackendSettings {
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
            token: None,
        })?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> CatalogClient<B> {
    /// Create a new client with a custom backend.
    pub(crate) fn with_backend(config: &CatalogClientConfig, backend: B) -> HostResult<Self> {
        Ok(Self {
            backend,
            url: Url::parse(&config.url)?,
        })
    }

    pub(crate) async fn fetch_devices(&self) -> HostResult<Vec<DeviceDto>> {
        self.backend.get_json(&self.url).await
    }
}
