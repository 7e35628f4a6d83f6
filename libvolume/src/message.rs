//! Volume plugin protocol payloads.
//!
//! The orchestrator talks to a volume plugin with one JSON request per
//! lifecycle call, posted to `/VolumeDriver.<Method>`, and expects one JSON
//! response.  [`PluginRequest`] and [`PluginResponse`] model those bodies,
//! [`Method`] the endpoint, and [`dispatch`] routes a request to a
//! [`VolumeDriver`].  Sockets and the activation handshake live in the
//! embedding process, not here.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::driver::VolumeDriver;
use crate::error::VolumeError;
use crate::types::{CreateVolumeRequest, DriverCapabilities, Scope, VolumeInfo};

/// Lifecycle endpoint addressed by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Create,
    Remove,
    Mount,
    Unmount,
    Path,
    Get,
    List,
    Capabilities,
}

impl Method {
    const ALL: [Method; 8] = [
        Method::Create,
        Method::Remove,
        Method::Mount,
        Method::Unmount,
        Method::Path,
        Method::Get,
        Method::List,
        Method::Capabilities,
    ];

    /// Resolve an endpoint path such as `/VolumeDriver.Mount`.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_path() == path)
    }

    pub fn as_path(self) -> &'static str {
        match self {
            Self::Create => "/VolumeDriver.Create",
            Self::Remove => "/VolumeDriver.Remove",
            Self::Mount => "/VolumeDriver.Mount",
            Self::Unmount => "/VolumeDriver.Unmount",
            Self::Path => "/VolumeDriver.Path",
            Self::Get => "/VolumeDriver.Get",
            Self::List => "/VolumeDriver.List",
            Self::Capabilities => "/VolumeDriver.Capabilities",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Request body: a volume name plus, for `Create`, opaque options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opts: Option<HashMap<String, String>>,
}

impl PluginRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opts: None,
        }
    }
}

/// A volume as it appears in `Get` and `List` responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginVolume {
    pub name: String,
    pub mountpoint: PathBuf,
}

impl From<VolumeInfo> for PluginVolume {
    fn from(info: VolumeInfo) -> Self {
        Self {
            name: info.name.0,
            mountpoint: info.mountpoint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginCapabilities {
    pub scope: Scope,
}

impl From<DriverCapabilities> for PluginCapabilities {
    fn from(caps: DriverCapabilities) -> Self {
        Self { scope: caps.scope }
    }
}

/// Response body.  Exactly one of `err` or the method's payload is set;
/// an empty response is a bare success.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct PluginResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub err: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mountpoint: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<PluginVolume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<PluginVolume>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<PluginCapabilities>,
}

impl PluginResponse {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn error(e: &VolumeError) -> Self {
        Self {
            err: e.to_string(),
            ..Self::default()
        }
    }

    pub fn is_err(&self) -> bool {
        !self.err.is_empty()
    }
}

impl From<Result<PluginResponse, VolumeError>> for PluginResponse {
    fn from(result: Result<PluginResponse, VolumeError>) -> Self {
        result.unwrap_or_else(|e| Self::error(&e))
    }
}

/// Route one request to `driver` and wrap the outcome in a response.
#[instrument(skip(driver, request), fields(name = %request.name))]
pub async fn dispatch<D>(driver: &D, method: Method, request: PluginRequest) -> PluginResponse
where
    D: VolumeDriver + ?Sized,
{
    let name = request.name;
    let result = match method {
        Method::Create => {
            let req = CreateVolumeRequest {
                name,
                options: request.opts.unwrap_or_default(),
            };
            driver.create(req).await.map(|()| PluginResponse::ok())
        }
        Method::Remove => driver.remove(&name).await.map(|()| PluginResponse::ok()),
        Method::Mount => driver.mount(&name).await.map(|mp| PluginResponse {
            mountpoint: Some(mp),
            ..PluginResponse::ok()
        }),
        Method::Unmount => driver.unmount(&name).await.map(|()| PluginResponse::ok()),
        Method::Path => driver.path(&name).await.map(|mp| PluginResponse {
            mountpoint: Some(mp),
            ..PluginResponse::ok()
        }),
        Method::Get => driver.get(&name).await.map(|info| PluginResponse {
            volume: Some(info.into()),
            ..PluginResponse::ok()
        }),
        Method::List => driver.list().await.map(|vols| PluginResponse {
            volumes: Some(vols.into_iter().map(PluginVolume::from).collect()),
            ..PluginResponse::ok()
        }),
        Method::Capabilities => driver.capabilities().await.map(|caps| PluginResponse {
            capabilities: Some(caps.into()),
            ..PluginResponse::ok()
        }),
    };

    match &result {
        Ok(_) => debug!("request handled"),
        Err(e) => warn!(error = %e, "request failed"),
    }
    result.into()
}
