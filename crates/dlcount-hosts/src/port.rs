//! Port trait implementations for the host and catalog clients.
//!
//! Implements the core-owned `ReleaseHostPort` and `DeviceCatalogPort`
//! traits, converting wire models to domain types and internal errors to
//! `FetchError`.

use async_trait::async_trait;
use dlcount_core::{Device, DeviceCatalogPort, FetchError, FetchResult, Release, ReleaseHostPort};

use crate::client::{CatalogClient, ReleaseHostClient};
use crate::error::HostError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HostError` to core `FetchError`.
///
/// Statuses are passed through untouched so the caller can tell a rate
/// limit (403/429) from any other failure.
fn map_error(err: HostError) -> FetchError {
    match err {
        HostError::ApiRequestFailed { status, .. } => FetchError::Status { status },
        HostError::Network(e) if e.is_decode() => FetchError::InvalidResponse {
            message: e.to_string(),
        },
        HostError::Network(e) => FetchError::Network {
            message: e.to_string(),
        },
        HostError::JsonParse(e) => FetchError::InvalidResponse {
            message: e.to_string(),
        },
        err @ (HostError::ClientBuild { .. }
        | HostError::UnusableBaseUrl { .. }
        | HostError::InvalidUrl(_)) => FetchError::Configuration {
            message: err.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> ReleaseHostPort for ReleaseHostClient<B> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_releases(&self, codename: &str) -> FetchResult<Vec<Release>> {
        let releases = self.fetch_releases(codename).await.map_err(map_error)?;
        tracing::debug!(host = %self.name, %codename, count = releases.len(), "Fetched releases");
        Ok(releases.into_iter().map(Release::from).collect())
    }
}

#[async_trait]
impl<B: HttpBackend> DeviceCatalogPort for CatalogClient<B> {
    async fn list_devices(&self) -> FetchResult<Vec<Device>> {
        let devices = self.fetch_devices().await.map_err(map_error)?;
        Ok(devices.into_iter().map(Device::from).collect())
    }
}
