//! Devices and the release data reported for them by release hosts.

use serde::{Deserialize, Serialize};

/// A device from the catalog.
///
/// Only `codename` and `manufacturer` are consumed; the catalog may carry
/// more fields, which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unique device codename, also the ledger key (e.g. `raven`).
    pub codename: String,
    /// Manufacturer name as listed in the catalog.
    pub manufacturer: String,
}

impl Device {
    /// Create a new device.
    pub fn new(codename: impl Into<String>, manufacturer: impl Into<String>) -> Self {
        Self {
            codename: codename.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// `manufacturer/codename` label used in log output.
    pub fn label(&self) -> String {
        format!("{}/{}", self.manufacturer.to_lowercase(), self.codename)
    }
}

/// A single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// File name of the asset.
    pub name: String,
    /// Download counter reported by the host.
    pub download_count: u64,
}

impl Asset {
    /// Create a new asset.
    pub fn new(name: impl Into<String>, download_count: u64) -> Self {
        Self {
            name: name.into(),
            download_count,
        }
    }
}

/// A release on a release host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Assets attached to the release.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Create a release from its assets.
    pub const fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_label_lowercases_manufacturer() {
        let device = Device::new("raven", "Google");
        assert_eq!(device.label(), "google/raven");
    }

    #[test]
    fn test_device_ignores_extra_catalog_fields() {
        let json = r#"{"codename": "raven", "manufacturer": "Google", "name": "Pixel 6 Pro"}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device, Device::new("raven", "Google"));
    }

    #[test]
    fn test_release_without_assets_defaults_to_empty() {
        let release: Release = serde_json::from_str(r#"{"tag_name": "v1"}"#).unwrap();
        assert!(release.assets.is_empty());
    }
}
