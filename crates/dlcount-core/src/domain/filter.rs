//! Asset qualification rule.

use serde::{Deserialize, Serialize};

use super::device::Release;

/// Default product prefix of a counted asset.
pub const DEFAULT_ASSET_PREFIX: &str = "PixelBuilds_";

/// Default archive extension of a counted asset.
pub const DEFAULT_ASSET_EXTENSION: &str = ".zip";

/// Decides which assets count toward a device's downloads.
///
/// An asset qualifies only when its name starts with `prefix` AND ends
/// with `extension`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFilter {
    pub prefix: String,
    pub extension: String,
}

impl Default for AssetFilter {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ASSET_PREFIX.to_string(),
            extension: DEFAULT_ASSET_EXTENSION.to_string(),
        }
    }
}

impl AssetFilter {
    /// Create a filter with a custom prefix and extension.
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// Check whether an asset name qualifies.
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) && name.ends_with(&self.extension)
    }

    /// Sum the counters of all qualifying assets across `releases`.
    pub fn count(&self, releases: &[Release]) -> u64 {
        releases
            .iter()
            .flat_map(|release| &release.assets)
            .filter(|asset| self.matches(&asset.name))
            .inspect(|asset| tracing::debug!(asset = %asset.name, count = asset.download_count, "adding"))
            .map(|asset| asset.download_count)
            .fold(0, u64::saturating_add)
    }
}
