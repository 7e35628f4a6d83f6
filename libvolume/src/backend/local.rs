//! Local directory volume driver.
//!
//! [`LocalVolumeDriver`] implements [`VolumeDriver`] by giving each volume
//! its own directory under a configured root.  Mounting does not touch the
//! filesystem: the directory already exists from `create`, so a mount is a
//! state transition plus a path computation.
//!
//! # On-disk layout
//!
//! ```text
//! <root>/
//!   <volume-name>/          # one directory per volume
//! ```
//!
//! # Per-volume state machine
//!
//! ```text
//!           create
//! (absent) -------> Unmounted
//! Unmounted --mount--> Mounted
//! Mounted --unmount--> Unmounted
//! Unmounted --remove--> (absent)
//! Mounted --remove--> VolumeBusy
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::VolumeConfig;
use crate::driver::VolumeDriver;
use crate::error::VolumeError;
use crate::fs::{FsGateway, TokioFsGateway};
use crate::registry::VolumeRegistry;
use crate::types::*;

/// Volume driver backed by plain directories on the local host.
///
/// # Thread safety
///
/// The registry sits behind a single async [`Mutex`] that every operation
/// holds for its entire check-and-mutate sequence, including the gateway
/// call.  Two concurrent calls for the same name therefore never observe
/// each other's intermediate state; directory I/O is serialised per driver.
pub struct LocalVolumeDriver<G = TokioFsGateway> {
    config: VolumeConfig,
    registry: Mutex<VolumeRegistry>,
    gateway: G,
}

impl LocalVolumeDriver<TokioFsGateway> {
    /// Create a driver that manages real directories via `tokio::fs`.
    pub fn new(config: VolumeConfig) -> Self {
        Self::with_gateway(config, TokioFsGateway)
    }
}

impl<G: FsGateway> LocalVolumeDriver<G> {
    /// Create a driver that performs directory I/O through `gateway`.
    pub fn with_gateway(config: VolumeConfig, gateway: G) -> Self {
        Self {
            config,
            registry: Mutex::new(VolumeRegistry::new()),
            gateway,
        }
    }

    pub fn root(&self) -> &Path {
        self.config.root()
    }

    /// Mountpoint of `name`: always `<root>/<name>`, never stored.
    pub fn mountpoint(&self, name: &VolumeName) -> PathBuf {
        self.config.root().join(name.as_str())
    }

    fn info(&self, name: &VolumeName) -> VolumeInfo {
        VolumeInfo {
            name: name.clone(),
            mountpoint: self.mountpoint(name),
        }
    }
}

/// Validate a caller-supplied name.
///
/// Besides empty and blank names, anything that would not map to a distinct
/// direct child of the root is refused: a separator, NUL, `.` or `..`.
fn validate_name(name: &str) -> Result<VolumeName, VolumeError> {
    if name.trim().is_empty() {
        return Err(VolumeError::InvalidArgument(
            "volume name not specified".to_owned(),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(VolumeError::InvalidArgument(format!(
            "volume name {name:?} is not a valid directory name"
        )));
    }
    Ok(VolumeName::from(name))
}

#[async_trait]
impl<G: FsGateway> VolumeDriver for LocalVolumeDriver<G> {
    #[instrument(skip(self, req), fields(name = %req.name))]
    async fn create(&self, req: CreateVolumeRequest) -> Result<(), VolumeError> {
        let name = validate_name(&req.name)?;
        if !req.options.is_empty() {
            debug!(options = ?req.options, "ignoring driver options");
        }

        let mut registry = self.registry.lock().await;
        if let Some(existing) = registry.get(&name) {
            debug!(state = ?existing.state, "volume already exists, create is a no-op");
            return Ok(());
        }

        // Directory first; the registry only learns about the volume once
        // its backing directory exists.
        let dir = self.mountpoint(&name);
        self.gateway
            .create_dir(&dir, self.config.dir_mode())
            .await
            .map_err(|e| {
                warn!(path = %dir.display(), error = %e, "cannot create volume directory");
                VolumeError::creation_failed(&dir, e)
            })?;

        registry.insert(VolumeRecord::new(name));
        info!(path = %dir.display(), "volume created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, name: &str) -> Result<(), VolumeError> {
        let name = validate_name(name)?;

        let mut registry = self.registry.lock().await;
        let record = registry
            .get(&name)
            .ok_or_else(|| VolumeError::NotFound(name.to_string()))?;
        if record.is_mounted() {
            warn!("refusing to remove a mounted volume");
            return Err(VolumeError::VolumeBusy(name.to_string()));
        }

        // Drop the registry entry only once the directory is gone, so a
        // failed removal can be retried.
        let dir = self.mountpoint(&name);
        self.gateway.remove_dir_all(&dir).await.map_err(|e| {
            warn!(path = %dir.display(), error = %e, "cannot remove volume directory");
            VolumeError::removal_failed(&dir, e)
        })?;

        registry.remove(&name);
        info!(path = %dir.display(), "volume removed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mount(&self, name: &str) -> Result<PathBuf, VolumeError> {
        let name = validate_name(name)?;

        let mut registry = self.registry.lock().await;
        let record = registry
            .get_mut(&name)
            .ok_or_else(|| VolumeError::NotFound(name.to_string()))?;
        if record.is_mounted() {
            warn!("volume is already mounted");
            return Err(VolumeError::AlreadyMounted(name.to_string()));
        }
        record.state = VolumeState::Mounted;

        let mountpoint = self.mountpoint(&name);
        info!(mountpoint = %mountpoint.display(), "volume mounted");
        Ok(mountpoint)
    }

    #[instrument(skip(self))]
    async fn unmount(&self, name: &str) -> Result<(), VolumeError> {
        let name = validate_name(name)?;

        let mut registry = self.registry.lock().await;
        let record = registry
            .get_mut(&name)
            .ok_or_else(|| VolumeError::NotFound(name.to_string()))?;
        if !record.is_mounted() {
            warn!("volume is not mounted");
            return Err(VolumeError::NotMounted(name.to_string()));
        }
        record.state = VolumeState::Unmounted;

        info!("volume unmounted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn path(&self, name: &str) -> Result<PathBuf, VolumeError> {
        let name = validate_name(name)?;

        let registry = self.registry.lock().await;
        if !registry.contains(&name) {
            return Err(VolumeError::NotFound(name.to_string()));
        }
        Ok(self.mountpoint(&name))
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<VolumeInfo, VolumeError> {
        let name = validate_name(name)?;

        let registry = self.registry.lock().await;
        match registry.get(&name) {
            Some(record) => Ok(self.info(&record.name)),
            None => Err(VolumeError::NotFound(name.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<VolumeInfo>, VolumeError> {
        let registry = self.registry.lock().await;
        let volumes = registry.iter().map(|rec| self.info(&rec.name)).collect();
        Ok(volumes)
    }

    async fn capabilities(&self) -> Result<DriverCapabilities, VolumeError> {
        Ok(DriverCapabilities {
            scope: Scope::Local,
        })
    }
}
