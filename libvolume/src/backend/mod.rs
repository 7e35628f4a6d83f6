//! Concrete volume driver implementations.
//!
//! Each backend module provides a type that implements [`VolumeDriver`].
//!
//! [`VolumeDriver`]: crate::driver::VolumeDriver

pub mod local;
