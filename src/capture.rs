use std::path::{Path, PathBuf};

use pcap::{Activated, Capture, Device, Linktype, Savefile};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::CaptureConfig;

/// Live or replayed capture behind one type.
pub type Source = Capture<dyn Activated>;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to list capture devices: {0}")]
    ListDevices(#[source] pcap::Error),

    #[error("no capture devices available")]
    NoDevices,

    #[error("device '{0}' not found")]
    DeviceNotFound(String),

    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: pcap::Error,
    },

    #[error("invalid BPF filter '{filter}': {source}")]
    Filter {
        filter: String,
        #[source]
        source: pcap::Error,
    },

    #[error("failed to create savefile {path}: {source}")]
    Savefile {
        path: PathBuf,
        #[source]
        source: pcap::Error,
    },

    #[error("capture failed: {0}")]
    Read(#[source] pcap::Error),
}

pub fn available_devices() -> Result<Vec<Device>, CaptureError> {
    let devices = Device::list().map_err(CaptureError::ListDevices)?;
    if devices.is_empty() {
        return Err(CaptureError::NoDevices);
    }
    Ok(devices)
}

/// Opens a live capture on the named device with the configured filter.
pub fn open_device_capture(device_name: &str, config: &CaptureConfig) -> Result<Source, CaptureError> {
    let device = available_devices()?
        .into_iter()
        .find(|d| d.name == device_name)
        .ok_or_else(|| CaptureError::DeviceNotFound(device_name.to_string()))?;

    let open_err = |source| CaptureError::Open { target: device_name.to_string(), source };
    let cap = Capture::from_device(device)
        .map_err(open_err)?
        .promisc(config.promiscuous)
        .snaplen(config.snaplen)
        .timeout(config.timeout_ms)
        .open()
        .map_err(open_err)?;

    let mut cap: Source = cap.into();
    apply_bpf_filter(&mut cap, &config.filter)?;
    check_datalink(&cap, device_name);
    info!(device = device_name, filter = %config.filter, "live capture opened");
    Ok(cap)
}

/// Opens a pcap file for replay with the configured filter.
pub fn open_file_capture(path: &Path, config: &CaptureConfig) -> Result<Source, CaptureError> {
    let cap = Capture::from_file(path).map_err(|source| CaptureError::Open {
        target: path.display().to_string(),
        source,
    })?;

    let mut cap: Source = cap.into();
    apply_bpf_filter(&mut cap, &config.filter)?;
    check_datalink(&cap, &path.display().to_string());
    info!(file = %path.display(), filter = %config.filter, "replaying capture file");
    Ok(cap)
}

/// An empty expression matches every packet.
pub fn apply_bpf_filter(cap: &mut Source, filter: &str) -> Result<(), CaptureError> {
    cap.filter(filter, true).map_err(|source| CaptureError::Filter {
        filter: filter.to_string(),
        source,
    })
}

pub fn create_savefile(cap: &Source, path: &Path) -> Result<Savefile, CaptureError> {
    let savefile = cap.savefile(path).map_err(|source| CaptureError::Savefile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), "exporting packets");
    Ok(savefile)
}

fn check_datalink(cap: &Source, target: &str) {
    let linktype = cap.get_datalink();
    if linktype != Linktype::ETHERNET {
        warn!(
            target_name = target,
            linktype = linktype.0,
            "link type is not Ethernet; frames will be counted but not decoded"
        );
    }
}
