//! End-to-end volume lifecycle through the driver and the plugin dispatcher.

use std::sync::Arc;

use libvolume::message::{PluginVolume, dispatch};
use libvolume::{
    CreateVolumeRequest, LocalVolumeDriver, Method, PluginRequest, VolumeConfig, VolumeDriver,
    VolumeError,
};

fn make_driver(root: &std::path::Path) -> LocalVolumeDriver {
    LocalVolumeDriver::new(VolumeConfig::new(root).expect("absolute root"))
}

#[tokio::test]
async fn full_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let driver = make_driver(tmp.path());
    let dir = tmp.path().join("v1");

    driver.create(CreateVolumeRequest::named("v1")).await.unwrap();
    assert!(dir.is_dir());

    assert_eq!(driver.mount("v1").await.unwrap(), dir);
    assert_eq!(
        driver.remove("v1").await.unwrap_err(),
        VolumeError::VolumeBusy("v1".into())
    );
    assert!(dir.is_dir());

    driver.unmount("v1").await.unwrap();
    assert_eq!(driver.get("v1").await.unwrap().mountpoint, dir);

    driver.remove("v1").await.unwrap();
    assert!(!dir.exists());
    assert_eq!(
        driver.get("v1").await.unwrap_err(),
        VolumeError::NotFound("v1".into())
    );
}

#[tokio::test]
async fn recreate_after_remove() {
    let tmp = tempfile::tempdir().unwrap();
    let driver = make_driver(tmp.path());

    driver.create(CreateVolumeRequest::named("v1")).await.unwrap();
    driver.remove("v1").await.unwrap();
    driver.create(CreateVolumeRequest::named("v1")).await.unwrap();

    assert!(tmp.path().join("v1").is_dir());
    assert_eq!(driver.mount("v1").await.unwrap(), tmp.path().join("v1"));
}

#[tokio::test]
async fn plugin_requests_drive_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let driver: Arc<dyn VolumeDriver> = Arc::new(make_driver(tmp.path()));
    let mountpoint = tmp.path().join("data");

    let resp = dispatch(driver.as_ref(), Method::Create, PluginRequest::named("data")).await;
    assert!(!resp.is_err(), "{}", resp.err);

    let resp = dispatch(driver.as_ref(), Method::Mount, PluginRequest::named("data")).await;
    assert_eq!(resp.mountpoint.as_deref(), Some(mountpoint.as_path()));

    let resp = dispatch(driver.as_ref(), Method::Mount, PluginRequest::named("data")).await;
    assert_eq!(resp.err, "volume data is already mounted");
    assert!(resp.mountpoint.is_none());

    let resp = dispatch(driver.as_ref(), Method::Remove, PluginRequest::named("data")).await;
    assert_eq!(resp.err, "volume data is in use");

    let resp = dispatch(driver.as_ref(), Method::Unmount, PluginRequest::named("data")).await;
    assert!(!resp.is_err());

    let resp = dispatch(driver.as_ref(), Method::Get, PluginRequest::named("data")).await;
    assert_eq!(
        resp.volume,
        Some(PluginVolume {
            name: "data".into(),
            mountpoint: mountpoint.clone(),
        })
    );

    let resp = dispatch(driver.as_ref(), Method::Path, PluginRequest::named("data")).await;
    assert_eq!(resp.mountpoint, Some(mountpoint.clone()));

    let resp = dispatch(driver.as_ref(), Method::List, PluginRequest::default()).await;
    assert_eq!(resp.volumes.map(|v| v.len()), Some(1));

    let resp = dispatch(driver.as_ref(), Method::Remove, PluginRequest::named("data")).await;
    assert!(!resp.is_err());
    assert!(!mountpoint.exists());

    let resp = dispatch(driver.as_ref(), Method::List, PluginRequest::default()).await;
    assert_eq!(resp.volumes, Some(Vec::new()));
}

#[tokio::test]
async fn plugin_request_json_roundtrip() {
    let tmp = tempfile::tempdir().unwrap();
    let driver = make_driver(tmp.path());

    let body = r#"{"Name":"web","Opts":{"type":"scratch"}}"#;
    let req: PluginRequest = serde_json::from_str(body).unwrap();
    let method = Method::from_path("/VolumeDriver.Create").unwrap();
    let resp = dispatch(&driver, method, req).await;
    assert_eq!(serde_json::to_string(&resp).unwrap(), "{}");

    let resp = dispatch(&driver, Method::Capabilities, PluginRequest::default()).await;
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json, serde_json::json!({ "Capabilities": { "Scope": "local" } }));

    let resp = dispatch(&driver, Method::Get, PluginRequest::default()).await;
    assert_eq!(resp.err, "invalid argument: volume name not specified");
}
