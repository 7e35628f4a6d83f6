//! Volume driver configuration.
//!
//! Controls where volume directories are created and with which permission
//! bits.  The configuration is read once at startup and is immutable for the
//! lifetime of the driver.
//!
//! Environment variables (see [`VolumeConfig::from_env`]):
//! - `LIBVOLUME_ROOT`: absolute directory under which every volume directory
//!   is created. Defaults to `/tmp`.
//! - `LIBVOLUME_DIR_MODE`: octal permission bits applied to new volume
//!   directories. Defaults to `777`.

use std::path::{Path, PathBuf};

use crate::error::VolumeError;

pub const ENV_ROOT: &str = "LIBVOLUME_ROOT";
pub const ENV_DIR_MODE: &str = "LIBVOLUME_DIR_MODE";

pub const DEFAULT_ROOT: &str = "/tmp";
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Startup configuration of a [`LocalVolumeDriver`](crate::LocalVolumeDriver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeConfig {
    /// Directory holding one sub-directory per volume.
    root: PathBuf,
    /// Permission bits for newly created volume directories.
    dir_mode: u32,
}

impl VolumeConfig {
    /// Build a configuration rooted at `root`.
    ///
    /// The root must be absolute.  Trailing separators are dropped so that a
    /// mountpoint is always exactly `<root>/<name>`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, VolumeError> {
        let raw = root.as_ref();
        if !raw.is_absolute() {
            return Err(VolumeError::InvalidConfig(format!(
                "volume root must be an absolute path, got {:?}",
                raw.display().to_string()
            )));
        }
        // `components()` collapses `//` and a trailing `/`.
        let root: PathBuf = raw.components().collect();
        Ok(Self {
            root,
            dir_mode: DEFAULT_DIR_MODE,
        })
    }

    /// Override the permission bits of new volume directories.
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode & 0o7777;
        self
    }

    /// Read the configuration from `LIBVOLUME_ROOT` / `LIBVOLUME_DIR_MODE`.
    pub fn from_env() -> Result<Self, VolumeError> {
        let root = std::env::var(ENV_ROOT).unwrap_or_else(|_| DEFAULT_ROOT.to_owned());
        let config = Self::new(root)?;
        match std::env::var(ENV_DIR_MODE) {
            Ok(raw) => Ok(config.with_dir_mode(parse_mode(&raw)?)),
            Err(_) => Ok(config),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }
}

/// Parse an octal mode such as `755` or `0o750`.
fn parse_mode(raw: &str) -> Result<u32, VolumeError> {
    let digits = raw.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    match u32::from_str_radix(digits, 8) {
        Ok(mode) if mode <= 0o7777 => Ok(mode),
        _ => Err(VolumeError::InvalidConfig(format!(
            "{ENV_DIR_MODE} must be an octal mode, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_root_rejected() {
        let err = VolumeConfig::new("volumes").unwrap_err();
        assert!(matches!(err, VolumeError::InvalidConfig(_)));
    }

    #[test]
    fn trailing_separator_normalised() {
        let cfg = VolumeConfig::new("/srv/volumes/").unwrap();
        assert_eq!(cfg.root(), Path::new("/srv/volumes"));
        assert_eq!(cfg.root().join("v1"), Path::new("/srv/volumes/v1"));
        assert_eq!(cfg.dir_mode(), DEFAULT_DIR_MODE);
    }

    #[test]
    fn dir_mode_override() {
        let cfg = VolumeConfig::new("/tmp").unwrap().with_dir_mode(0o750);
        assert_eq!(cfg.dir_mode(), 0o750);
    }

    #[test]
    fn parse_octal_modes() {
        assert_eq!(parse_mode("755").unwrap(), 0o755);
        assert_eq!(parse_mode("0o700").unwrap(), 0o700);
        assert_eq!(parse_mode(" 0777 ").unwrap(), 0o777);
        assert!(parse_mode("rwx").is_err());
        assert!(parse_mode("99").is_err());
        assert!(parse_mode("17777").is_err());
    }
}
