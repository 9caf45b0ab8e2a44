//! Clients for the release hosts and the device catalog.
//!
//! Both are generic over an HTTP backend for testing. Use the `Default*`
//! aliases in production code.

mod catalog;
mod releases;

pub use catalog::CatalogClient;
pub use releases::ReleaseHostClient;

use crate::http::ReqwestBackend;

// ============================================================================
// Type Aliases
// ============================================================================

/// Release host client using the reqwest HTTP backend.
pub type DefaultReleaseHostClient = ReleaseHostClient<ReqwestBackend>;

/// Catalog client using the reqwest HTTP backend.
pub type DefaultCatalogClient = CatalogClient<ReqwestBackend>;
