use crate::calibration::Calibration;

#[cfg(all(target_os = "espidf", feature = "web"))]
pub const WIFI_SSID: &str = env!("WIFI_SSID");
#[cfg(all(target_os = "espidf", feature = "web"))]
pub const WIFI_PASS: &str = env!("WIFI_PASS");

/// Poll interval while waiting for the station to associate.
#[cfg(feature = "web")]
pub const WIFI_POLL_INTERVAL_MS: u32 = 500;
/// Re-issue the connect request after this many unanswered polls.
#[cfg(feature = "web")]
pub const WIFI_RECONNECT_POLLS: u32 = 20;

#[cfg(feature = "web")]
pub const HTTP_PORT: u16 = 80;

// SDA = GPIO8, SCL = GPIO9 (wired in main.rs)
pub const I2C_BAUDRATE: u32 = 100_000;

/// The BMP280 answers on 0x76 or 0x77 depending on SDO.
pub const BMP280_ADDRESSES: [u8; 2] = [0x76, 0x77];
pub const AHT20_ADDRESS: u8 = 0x38;

pub const CALIBRATION: Calibration = Calibration {
    temp_offset: 0.0,
    hum_scale: 1.0,
    hum_offset: 0.0,
};

#[cfg(feature = "spiffs")]
pub const SPIFFS_BASE_PATH: &str = "/spiffs";
#[cfg(feature = "spiffs")]
pub const DASHBOARD_FILE: &str = "/spiffs/index.html";

/// Serial-only builds log one reading per interval.
pub const SERIAL_LOG_INTERVAL_MS: u32 = 2000;
/// Main loop tick once the web service runs.
#[cfg(feature = "web")]
pub const IDLE_DELAY_MS: u32 = 10;

#[cfg(feature = "web")]
pub const NOT_FOUND_BODY: &str = "Nicht gefunden";
