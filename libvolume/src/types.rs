//! Core volume types: names, records, lifecycle state, and requests.
//!
//! These types form the data model shared by the registry, the driver
//! trait, and the protocol payloads.  They are all
//! [`Serialize`]/[`Deserialize`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Volume identity
// ---------------------------------------------------------------------------

/// Caller-chosen, unique name of a volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VolumeName(pub String);

impl VolumeName {
    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VolumeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for VolumeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VolumeName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Volume lifecycle state
// ---------------------------------------------------------------------------

/// Mount state of a registered volume.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum VolumeState {
    /// Directory exists, no consumer has the volume mounted.
    #[default]
    Unmounted,
    /// Handed out to a consumer by a successful mount.
    Mounted,
}

/// Registry entry for one volume.
///
/// The mountpoint is deliberately absent: it is always recomputed from the
/// name and the driver root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeRecord {
    /// Volume name, immutable once registered.
    pub name: VolumeName,
    /// Current mount state.
    pub state: VolumeState,
}

impl VolumeRecord {
    /// A freshly created, unmounted record.
    pub fn new(name: VolumeName) -> Self {
        Self {
            name,
            state: VolumeState::Unmounted,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.state == VolumeState::Mounted
    }
}

// ---------------------------------------------------------------------------
// Responses & requests
// ---------------------------------------------------------------------------

/// Volume metadata as reported by `get` and `list`.
///
/// Mount state is not part of it: the orchestrator asks for metadata of
/// unmounted volumes too (e.g. while removing them).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeInfo {
    /// Volume name.
    pub name: VolumeName,
    /// `<root>/<name>`.
    pub mountpoint: PathBuf,
}

/// Request to create a new volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateVolumeRequest {
    /// Name of the volume to create.
    pub name: String,
    /// Driver options passed through by the caller.  Not interpreted.
    #[serde(default)]
    pub options: HashMap<String, String>,
}

impl CreateVolumeRequest {
    /// Request without options.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: HashMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Driver capabilities
// ---------------------------------------------------------------------------

/// Visibility of the volumes managed by a driver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Volumes exist on a single host only.
    Local,
    /// Volumes are visible cluster-wide.
    Global,
}

/// Capabilities advertised by a volume driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverCapabilities {
    pub scope: Scope,
}
