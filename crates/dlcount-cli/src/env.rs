//! Environment file loading.

use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

/// Load `KEY=value` pairs from `path` into the process environment.
///
/// Variables already set in the environment win. A missing file is not an
/// error; returns whether a file was loaded.
pub fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}
