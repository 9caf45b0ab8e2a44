//! Release host port.

use async_trait::async_trait;

use super::fetch::FetchResult;
use crate::domain::Release;

/// A host publishing per-device releases with download counters.
///
/// # Design
///
/// - One implementation per host (GitHub, Gitea, ...)
/// - Returns `FetchError` for all failures, including non-success statuses,
///   so callers can apply the source-failure policy
#[async_trait]
pub trait ReleaseHostPort: Send + Sync {
    /// Display name of the host, used in logs and the skip list.
    fn name(&self) -> &str;

    /// List all releases published for a device.
    async fn list_releases(&self, codename: &str) -> FetchResult<Vec<Release>>;
}
