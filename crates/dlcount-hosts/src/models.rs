//! Wire models for catalog and release host responses.
//!
//! Only the fields the accounting needs are declared; everything else in
//! the payloads is ignored.

use dlcount_core::{Asset, Device, Release};
use serde::Deserialize;

/// Entry of the device catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceDto {
    pub codename: String,
    pub manufacturer: String,
}

impl From<DeviceDto> for Device {
    fn from(dto: DeviceDto) -> Self {
        Self::new(dto.codename, dto.manufacturer)
    }
}

/// A release as listed by GitHub and Gitea.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDto {
    /// Absent on some Gitea versions for releases without attachments.
    #[serde(default)]
    pub assets: Option<Vec<AssetDto>>,
}

impl From<ReleaseDto> for Release {
    fn from(dto: ReleaseDto) -> Self {
        Self::new(
            dto.assets
                .unwrap_or_default()
                .into_iter()
                .map(Asset::from)
                .collect(),
        )
    }
}

/// A release attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetDto {
    pub name: String,
    #[serde(default)]
    pub download_count: u64,
}

impl From<AssetDto> for Asset {
    fn from(dto: AssetDto) -> Self {
        Self::new(dto.name, dto.download_count)
    }
}
