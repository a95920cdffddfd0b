//! Cluster credential file materialization
//!
//! `KUBE_CONFIG` carries a base64-encoded kubeconfig. When present it is
//! decoded and written to a fixed path, which is then exported to `kubectl`
//! as `KUBECONFIG`. The file is never removed by this tool.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum KubeconfigError {
    #[error("KUBE_CONFIG is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Failed to write kubeconfig to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Decode `encoded` and write it to `path`
///
/// # Returns
/// * `Ok(None)` - no blob given, nothing written
/// * `Ok(Some(path))` - credential file written at `path`
/// * `Err(KubeconfigError)` - malformed base64 or write failure
pub fn materialize_kubeconfig(
    encoded: Option<&str>,
    path: &Path,
) -> Result<Option<PathBuf>, KubeconfigError> {
    let Some(encoded) = encoded else {
        debug!("KUBE_CONFIG not set, relying on ambient kubectl configuration");
        return Ok(None);
    };

    // Blobs pasted into CI secrets are often line-wrapped
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;

    write_private(path, &bytes).map_err(|source| KubeconfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "KUBECONFIG is set");
    Ok(Some(path.to_path_buf()))
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, bytes)?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "kubeconfig_test.rs"]
mod tests;
