//! HTTP adapters for the remote data `dlcount` consumes.
//!
//! - [`DefaultReleaseHostClient`] lists a device's releases on a
//!   GitHub-compatible host (GitHub itself, Gitea).
//! - [`DefaultCatalogClient`] fetches the device catalog.
//!
//! Both are meant to be used through the `dlcount-core` port traits.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Default client aliases expose a generic type whose backend parameter is
// an implementation detail
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Clients
pub use client::{DefaultCatalogClient, DefaultReleaseHostClient};

// Configuration
pub use config::{
    CatalogClientConfig, DEFAULT_GITEA_BASE_URL, DEFAULT_GITEA_OWNER, DEFAULT_GITHUB_BASE_URL,
    DEFAULT_GITHUB_OWNER, HostClientConfig,
};

// Errors
pub use error::HostError;
