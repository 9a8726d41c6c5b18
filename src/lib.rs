//! Environmental monitor for an ESP32 with a BMP280 and an AHT20 on one I2C
//! bus. Serves the latest reading as JSON plus a small dashboard page.
//!
//! Everything here is hardware-agnostic; the ESP-IDF glue lives in the
//! binary's `firmware` module.

pub mod boot;
pub mod calibration;
pub mod config;
#[cfg(feature = "web")]
pub mod dashboard;
#[cfg(feature = "web")]
pub mod http;
pub mod logging;
pub mod models;
pub mod sensors;
pub mod station;
pub mod time_utils;
