//! Device catalog port.

use async_trait::async_trait;

use super::fetch::FetchResult;
use crate::domain::Device;

/// Source of the ordered list of devices to tally.
#[async_trait]
pub trait DeviceCatalogPort: Send + Sync {
    /// Fetch the full device list, in catalog order.
    async fn list_devices(&self) -> FetchResult<Vec<Device>>;
}
