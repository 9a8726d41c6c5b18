use anyhow::Context;
use esp_idf_svc::sys::{esp, esp_vfs_spiffs_conf_t, esp_vfs_spiffs_register};
use klima::config::{DASHBOARD_FILE, SPIFFS_BASE_PATH};
use std::ffi::CString;
use std::path::PathBuf;

const MAX_OPEN_FILES: usize = 4;

/// Registers the default SPIFFS partition under `/spiffs`, formatting it if
/// it has never been mounted.
pub(crate) fn mount_spiffs() -> anyhow::Result<PathBuf> {
    let base_path = CString::new(SPIFFS_BASE_PATH)?;
    let conf = esp_vfs_spiffs_conf_t {
        base_path: base_path.as_ptr(),
        partition_label: std::ptr::null(),
        max_files: MAX_OPEN_FILES,
        format_if_mount_failed: true,
    };

    // the VFS copies base_path, so the CString may drop afterwards
    esp!(unsafe { esp_vfs_spiffs_register(&conf) }).context("esp_vfs_spiffs_register failed")?;

    Ok(PathBuf::from(DASHBOARD_FILE))
}
