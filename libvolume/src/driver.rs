//! Volume driver trait.
//!
//! The driver answers the lifecycle calls the container orchestrator issues
//! for named volumes.  Each call is a single request/response: it either
//! succeeds completely or returns one [`VolumeError`] with no partial effect.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::VolumeError;
use crate::types::{CreateVolumeRequest, DriverCapabilities, VolumeInfo};

/// Lifecycle operations of a volume plugin.
///
/// Every operation that takes a name rejects an empty or blank one with
/// [`VolumeError::InvalidArgument`] before looking at any state.
#[async_trait]
pub trait VolumeDriver: Send + Sync {
    /// Create a volume and its backing directory.
    ///
    /// Idempotent: creating a name that is already registered succeeds
    /// without touching anything.
    async fn create(&self, req: CreateVolumeRequest) -> Result<(), VolumeError>;

    /// Remove an unmounted volume and its backing directory.
    ///
    /// Refused with [`VolumeError::VolumeBusy`] while the volume is mounted.
    async fn remove(&self, name: &str) -> Result<(), VolumeError>;

    /// Mark a volume mounted and return its mountpoint.
    ///
    /// Not re-entrant: a second mount without an unmount in between fails
    /// with [`VolumeError::AlreadyMounted`].
    async fn mount(&self, name: &str) -> Result<PathBuf, VolumeError>;

    /// Mark a mounted volume unmounted.
    async fn unmount(&self, name: &str) -> Result<(), VolumeError>;

    /// Return the mountpoint of a volume, mounted or not.
    async fn path(&self, name: &str) -> Result<PathBuf, VolumeError>;

    /// Return the metadata of a volume, mounted or not.
    async fn get(&self, name: &str) -> Result<VolumeInfo, VolumeError>;

    /// List every registered volume, in no particular order.
    async fn list(&self) -> Result<Vec<VolumeInfo>, VolumeError>;

    /// Advertise the capabilities of this driver.
    async fn capabilities(&self) -> Result<DriverCapabilities, VolumeError>;
}
