//! Filesystem gateway used by the volume drivers.
//!
//! The driver never touches the filesystem directly; it goes through an
//! [`FsGateway`] so the lifecycle logic can be exercised against a test
//! double and the I/O primitives stay in one place.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

/// Directory primitives needed to back a volume.
#[async_trait]
pub trait FsGateway: Send + Sync {
    /// Create the directory at `path` with permission bits `mode`.
    ///
    /// Fails if anything already exists at `path`; on failure nothing is
    /// left behind.
    async fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Recursively remove `path`.  A path that is already gone is not an
    /// error.
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// [`FsGateway`] backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFsGateway;

#[async_trait]
impl FsGateway for TokioFsGateway {
    async fn create_dir(&self, path: &Path, mode: u32) -> io::Result<()> {
        // Not recursive: an existing entry, directory or not, is EEXIST.
        tokio::fs::create_dir(path).await?;
        discard_on_error(path, apply_mode(path, mode).await).await?;

        debug!(path = %path.display(), mode = format_args!("{mode:o}"), "directory created");
        Ok(())
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => {
                debug!(path = %path.display(), "directory removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "directory already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Apply `mode` explicitly so the process umask cannot narrow it.
async fn apply_mode(path: &Path, mode: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    }
    #[cfg(not(unix))]
    let _ = (path, mode);
    Ok(())
}

/// Remove the freshly created `path` if a follow-up step failed, then hand
/// back the original result.
async fn discard_on_error(path: &Path, result: io::Result<()>) -> io::Result<()> {
    if let Err(e) = &result
        && let Err(cleanup) = tokio::fs::remove_dir(path).await
    {
        warn!(
            path = %path.display(),
            error = %e,
            cleanup_error = %cleanup,
            "cannot discard half-created directory",
        );
    }
    result
}
