//! Domain types: devices, releases and the asset counting rule.

mod device;
mod filter;

pub use device::{Asset, Device, Release};
pub use filter::{AssetFilter, DEFAULT_ASSET_EXTENSION, DEFAULT_ASSET_PREFIX};
