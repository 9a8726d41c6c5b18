//! Sequential bring-up: sensors first, then storage, network and HTTP.
//!
//! Every step that can fail hard returns [`Fatal`]; `main` logs it and halts.
//! Nothing network-facing is touched before both sensors have answered.

use crate::config::{AHT20_ADDRESS, BMP280_ADDRESSES, CALIBRATION};
#[cfg(feature = "web")]
use crate::dashboard::Dashboard;
#[cfg(feature = "web")]
use crate::http::{SharedService, StatusService};
use crate::logging::log_ok;
#[cfg(feature = "spiffs")]
use crate::logging::log_warning;
use crate::sensors::{Aht20, Bmp280, SensorError};
use crate::station::WeatherStation;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};
#[cfg(feature = "spiffs")]
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Fatal {
    #[error("I2C bus could not be opened: {0:#}")]
    Bus(anyhow::Error),
    #[error("BMP280 not found at {addresses:02x?} (last error: {last_error:?})")]
    BarometerMissing {
        addresses: [u8; 2],
        last_error: Option<SensorError>,
    },
    #[error("AHT20 not found: {0}")]
    HygrometerMissing(#[source] SensorError),
    #[cfg(feature = "web")]
    #[error("WiFi bring-up failed: {0:#}")]
    Network(anyhow::Error),
    #[cfg(feature = "web")]
    #[error("HTTP server failed to start: {0:#}")]
    Http(anyhow::Error),
}

/// Which firmware variant is being brought up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Sensors only, readings go to the serial log.
    SerialOnly,
    #[cfg(feature = "web")]
    Web { serve_from_storage: bool },
}

impl Mode {
    #[cfg(feature = "web")]
    pub const fn from_features() -> Self {
        Self::Web {
            serve_from_storage: cfg!(feature = "spiffs"),
        }
    }

    #[cfg(not(feature = "web"))]
    pub const fn from_features() -> Self {
        Self::SerialOnly
    }
}

/// Board services the bring-up sequence needs. The network half only
/// exists in web builds.
pub trait Platform {
    type Bus: I2c + Send + 'static;
    type Delay: DelayNs + Send + 'static;

    /// A fresh handle on the shared I2C bus; called once per device attempt.
    fn bus(&mut self) -> Self::Bus;
    fn delay(&self) -> Self::Delay;

    /// Mounts the flash filesystem and returns the dashboard file path.
    #[cfg(feature = "spiffs")]
    fn mount_storage(&mut self) -> anyhow::Result<PathBuf>;
    /// Blocks until the station is associated and has an address.
    #[cfg(feature = "web")]
    fn join_network(&mut self) -> anyhow::Result<()>;
    /// Registers the routes and starts listening. The platform keeps the
    /// server alive for the rest of the program.
    #[cfg(feature = "web")]
    fn serve(&mut self, service: SharedService<Station<Self>>) -> anyhow::Result<()>
    where
        Self: Sized;
}

pub type Station<P> = WeatherStation<
    Bmp280<<P as Platform>::Bus, <P as Platform>::Delay>,
    Aht20<<P as Platform>::Bus, <P as Platform>::Delay>,
>;

pub enum Running<P: Platform> {
    #[cfg(feature = "web")]
    Serving(SharedService<Station<P>>),
    Logging(Station<P>),
}

pub fn boot<P: Platform>(platform: &mut P, mode: Mode) -> Result<Running<P>, Fatal> {
    let barometer = find_barometer(platform)?;
    log_ok("BMP280 initialized");

    let hygrometer = init_hygrometer(platform)?;
    log_ok("AHT20 initialized");

    let station = WeatherStation::new(barometer, hygrometer, CALIBRATION);

    match mode {
        Mode::SerialOnly => {
            info!("Serial-only build, skipping network");
            Ok(Running::Logging(station))
        }
        #[cfg(feature = "web")]
        Mode::Web { serve_from_storage } => {
            let dashboard = select_dashboard(platform, serve_from_storage);

            platform.join_network().map_err(Fatal::Network)?;

            let service = StatusService::new(station, dashboard).into_shared();
            platform.serve(service.clone()).map_err(Fatal::Http)?;
            log_ok("HTTP server started");

            Ok(Running::Serving(service))
        }
    }
}

#[cfg(feature = "spiffs")]
fn select_dashboard<P: Platform>(platform: &mut P, serve_from_storage: bool) -> Dashboard {
    if !serve_from_storage {
        return Dashboard::Embedded;
    }
    match platform.mount_storage() {
        Ok(path) => {
            log_ok("SPIFFS mounted");
            Dashboard::File(path)
        }
        Err(e) => {
            log_warning(&format!("SPIFFS mount failed: {:#}", e));
            Dashboard::Embedded
        }
    }
}

#[cfg(all(feature = "web", not(feature = "spiffs")))]
fn select_dashboard<P: Platform>(_platform: &mut P, _serve_from_storage: bool) -> Dashboard {
    Dashboard::Embedded
}

/// Tries each known BMP280 address in order, each on a fresh bus handle.
pub fn find_barometer<P: Platform>(platform: &mut P) -> Result<Bmp280<P::Bus, P::Delay>, Fatal> {
    let mut last_error = None;

    for address in BMP280_ADDRESSES {
        let mut bmp = Bmp280::new(platform.bus(), platform.delay(), address);
        match bmp.init() {
            Ok(()) => {
                info!("BMP280 answered at {:#04x}", address);
                return Ok(bmp);
            }
            Err(e) => {
                warn!("BMP280 not at {:#04x}: {}", address, e);
                last_error = Some(e);
            }
        }
    }

    Err(Fatal::BarometerMissing {
        addresses: BMP280_ADDRESSES,
        last_error,
    })
}

pub fn init_hygrometer<P: Platform>(platform: &mut P) -> Result<Aht20<P::Bus, P::Delay>, Fatal> {
    let mut aht = Aht20::new(platform.bus(), platform.delay(), AHT20_ADDRESS);
    aht.init().map_err(Fatal::HygrometerMissing)?;
    Ok(aht)
}
