use crate::calibration::Calibration;
use crate::logging::{log_reading, log_sensor_error};
use crate::models::{RawSample, Reading};
use crate::sensors::{Barometer, Hygrometer};
use crate::time_utils;

/// Anything that can produce a fresh reading on demand.
pub trait ReadingSource {
    fn poll(&mut self) -> Reading;
}

/// Both sensors plus the one reading record they overwrite.
pub struct WeatherStation<B, H> {
    barometer: B,
    hygrometer: H,
    calibration: Calibration,
    raw: RawSample,
    latest: Reading,
}

impl<B: Barometer, H: Hygrometer> WeatherStation<B, H> {
    pub fn new(barometer: B, hygrometer: H, calibration: Calibration) -> Self {
        Self {
            barometer,
            hygrometer,
            calibration,
            raw: RawSample::default(),
            latest: Reading::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Reading {
        self.latest
    }

    /// Reads both sensors and replaces the stored reading.
    ///
    /// A sensor that fails keeps its previous raw values; the failure is
    /// logged and the timestamp still advances.
    pub fn update(&mut self) -> Reading {
        match self.hygrometer.measure() {
            Ok(climate) => {
                self.raw.temperature = climate.temperature;
                self.raw.humidity = climate.humidity;
            }
            Err(e) => log_sensor_error("AHT20", e),
        }

        match self.barometer.measure() {
            Ok(sample) => {
                log::debug!("BMP280 die temperature {:.2}C", sample.temperature);
                self.raw.pressure_pa = sample.pressure_pa;
            }
            Err(e) => log_sensor_error("BMP280", e),
        }

        let reading = self.calibration.apply(&self.raw, time_utils::uptime_ms());
        self.latest = reading;
        log_reading(&reading);
        reading
    }
}

impl<B: Barometer, H: Hygrometer> ReadingSource for WeatherStation<B, H> {
    fn poll(&mut self) -> Reading {
        self.update()
    }
}
