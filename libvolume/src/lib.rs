//! # libvolume: local directory volumes for RK8s containers
//!
//! `libvolume` is the lifecycle backend of a container-runtime volume
//! plugin.  A volume is a named directory under a single configured root;
//! the library tracks which volumes exist and whether each one is mounted,
//! and answers the orchestrator's lifecycle calls (create, remove, mount,
//! unmount, path, get, list).  It follows the RK8s conventions (Tokio async
//! runtime, `tracing` for observability, `thiserror` for structured errors).
//!
//! ## Module overview
//!
//! | Module | Purpose |
//! |---|---|
//! | [`types`] | Data model: `VolumeName`, `VolumeRecord`, `VolumeInfo`, requests. |
//! | [`error`] | [`VolumeError`] enum covering all failure modes. |
//! | [`config`] | [`VolumeConfig`]: root path and directory mode. |
//! | [`registry`] | [`VolumeRegistry`]: in-memory name → record map. |
//! | [`fs`] | [`FsGateway`] trait and its Tokio implementation. |
//! | [`driver`] | [`VolumeDriver`] trait: the lifecycle operations. |
//! | [`backend`] | Concrete drivers ([`LocalVolumeDriver`]). |
//! | [`message`] | Plugin request/response payloads and dispatch. |

pub mod backend;
pub mod config;
pub mod driver;
pub mod error;
pub mod fs;
pub mod message;
pub mod registry;
pub mod types;

// Re-export the most commonly used items at crate root for convenience.
pub use backend::local::LocalVolumeDriver;
pub use config::VolumeConfig;
pub use driver::VolumeDriver;
pub use error::VolumeError;
pub use fs::{FsGateway, TokioFsGateway};
pub use message::{Method, PluginRequest, PluginResponse};
pub use registry::VolumeRegistry;
pub use types::*;
