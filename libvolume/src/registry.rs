//! In-memory volume registry.
//!
//! [`VolumeRegistry`] is a plain map from [`VolumeName`] to
//! [`VolumeRecord`].  It does no I/O and no locking: the owning driver
//! serialises access and decides when an entry may be added or dropped.

use std::collections::HashMap;
use std::collections::hash_map::Values;

use crate::types::{VolumeName, VolumeRecord};

#[derive(Debug, Default)]
pub struct VolumeRegistry {
    volumes: HashMap<VolumeName, VolumeRecord>,
}

impl VolumeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record.  `None` means the name was never registered, as
    /// opposed to a registered but unmounted volume.
    pub fn get(&self, name: &VolumeName) -> Option<&VolumeRecord> {
        self.volumes.get(name)
    }

    pub fn get_mut(&mut self, name: &VolumeName) -> Option<&mut VolumeRecord> {
        self.volumes.get_mut(name)
    }

    pub fn contains(&self, name: &VolumeName) -> bool {
        self.volumes.contains_key(name)
    }

    /// Insert a record keyed by its own name, returning the record it
    /// replaced, if any.
    pub fn insert(&mut self, record: VolumeRecord) -> Option<VolumeRecord> {
        self.volumes.insert(record.name.clone(), record)
    }

    pub fn remove(&mut self, name: &VolumeName) -> Option<VolumeRecord> {
        self.volumes.remove(name)
    }

    /// Iterate over all records in unspecified order.
    pub fn iter(&self) -> Values<'_, VolumeName, VolumeRecord> {
        self.volumes.values()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}
