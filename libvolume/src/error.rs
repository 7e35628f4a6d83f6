//! Volume error types.
//!
//! All errors in the `libvolume` crate are represented by the
//! [`VolumeError`] enum, which derives [`thiserror::Error`] and also
//! implements [`Serialize`]/[`Deserialize`] so an error can be carried
//! inside a plugin response.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for volume lifecycle operations.
///
/// Every lifecycle call returns exactly one success value or one of these
/// kinds; callers branch on the variant, never on the message text.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// The caller supplied an invalid argument (e.g. an empty volume name).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The named volume was never created (or has been removed).
    #[error("volume {0} not found")]
    NotFound(String),

    /// Mount was requested for a volume that is already mounted.
    #[error("volume {0} is already mounted")]
    AlreadyMounted(String),

    /// Unmount was requested for a volume that is not mounted.
    #[error("volume {0} is not mounted")]
    NotMounted(String),

    /// Remove was requested while the volume is still mounted.
    #[error("volume {0} is in use")]
    VolumeBusy(String),

    /// The backing directory could not be created.
    #[error("cannot create volume directory {path}: {reason}")]
    CreationFailed {
        /// Directory that was being created.
        path: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The backing directory could not be removed.
    #[error("cannot remove volume directory {path}: {reason}")]
    RemovalFailed {
        /// Directory that was being removed.
        path: String,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The startup configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl VolumeError {
    /// Create a [`VolumeError::CreationFailed`] for `path` from anything that
    /// implements [`std::fmt::Display`].
    pub fn creation_failed<E: std::fmt::Display>(path: &std::path::Path, e: E) -> Self {
        Self::CreationFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }

    /// Create a [`VolumeError::RemovalFailed`] for `path` from anything that
    /// implements [`std::fmt::Display`].
    pub fn removal_failed<E: std::fmt::Display>(path: &std::path::Path, e: E) -> Self {
        Self::RemovalFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}
