//! URL construction for release host requests.

use url::Url;

use crate::error::{HostError, HostResult};

/// Build `{base}/repos/{owner}/{codename}/releases`.
///
/// Segments are percent-encoded, and a trailing slash on the base is
/// tolerated.
pub fn build_releases_url(base: &Url, owner: &str, codename: &str) -> HostResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HostError::UnusableBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(["repos", owner, codename, "releases"]);
    Ok(url)
}
