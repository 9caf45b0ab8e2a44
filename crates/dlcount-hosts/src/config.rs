//! Public configuration for the host and catalog clients.

use std::time::Duration;

/// GitHub REST API root.
pub const DEFAULT_GITHUB_BASE_URL: &str = "https://api.github.com";
/// Organisation holding the per-device release repositories on GitHub.
pub const DEFAULT_GITHUB_OWNER: &str = "PixelBuilds-Releases";
/// Gitea REST API root.
pub const DEFAULT_GITEA_BASE_URL: &str = "https://git.pixelbuilds.org/api/v1";
/// Organisation holding the per-device release repositories on Gitea.
pub const DEFAULT_GITEA_OWNER: &str = "releases";

const DEFAULT_USER_AGENT: &str = concat!("dlcount/", env!("CARGO_PKG_VERSION"));

/// Configuration for a release host client.
///
/// A host serves `{base_url}/repos/{owner}/{codename}/releases`. Use
/// [`HostClientConfig::github`] or [`HostClientConfig::gitea`] for the two
/// hosts PixelBuilds publishes to and adjust with the builder methods.
///
/// # Example
///
/// ```
/// use dlcount_hosts::HostClientConfig;
/// use std::time::Duration;
///
/// let config = HostClientConfig::github()
///     .with_optional_token(Some("ghp_example".to_string()))
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct HostClientConfig {
    /// Display name used in logs and the skip list
    pub(crate) name: String,
    /// API root, without the `/repos/...` part
    pub(crate) base_url: String,
    /// Owner of the per-device repositories
    pub(crate) owner: String,
    pub(crate) user_agent: String,
    /// Request timeout; requests are never retried
    pub(crate) timeout: Duration,
    /// Optional bearer token
    pub(crate) token: Option<String>,
}

impl std::fmt::Debug for HostClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClientConfig")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("owner", &self.owner)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl HostClientConfig {
    /// Create a configuration for an arbitrary host.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            owner: owner.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(3),
            token: None,
        }
    }

    /// The primary host.
    #[must_use]
    pub fn github() -> Self {
        Self::new("GitHub", DEFAULT_GITHUB_BASE_URL, DEFAULT_GITHUB_OWNER)
    }

    /// The secondary host.
    #[must_use]
    pub fn gitea() -> Self {
        Self::new("Gitea", DEFAULT_GITEA_BASE_URL, DEFAULT_GITEA_OWNER)
    }

    /// Set the API root.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the repository owner.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 3 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Display name of the host.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Configuration for the device catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    pub(crate) url: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
}

impl CatalogClientConfig {
    /// Fetch the catalog from `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
