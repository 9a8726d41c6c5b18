//! BMP280 barometer on top of the `bme280-rs` driver.
//!
//! The BMP280 is the BME280 without the humidity channel and shares its
//! register map, so the same driver runs it with humidity sampling skipped.

use super::{BarometricSample, Barometer, SensorError};
use bme280_rs::{Bme280, Configuration, Oversampling, SensorMode};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

const SENSOR: &str = "BMP280";

/// BMP280 samples and mass production parts, plus the register-compatible BME280.
const CHIP_IDS: [u8; 4] = [0x56, 0x57, 0x58, 0x60];

pub struct Bmp280<I, D> {
    sensor: Bme280<I, D>,
    address: u8,
}

impl<I: I2c, D: DelayNs> Bmp280<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            sensor: Bme280::new_with_address(i2c, address, delay),
            address,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Checks the chip id, resets the part and starts continuous sampling.
    pub fn init(&mut self) -> Result<(), SensorError> {
        let id = self
            .sensor
            .chip_id()
            .map_err(|e| SensorError::bus(SENSOR, e))?;
        if !CHIP_IDS.contains(&id) {
            return Err(SensorError::UnknownChip { sensor: SENSOR, id });
        }

        self.sensor.init().map_err(|e| SensorError::bus(SENSOR, e))?;

        let sampling = Configuration::default()
            .with_humidity_oversampling(Oversampling::Skip)
            .with_temperature_oversampling(Oversampling::Oversample1)
            .with_pressure_oversampling(Oversampling::Oversample1)
            .with_sensor_mode(SensorMode::Normal);
        self.sensor
            .set_sampling_configuration(sampling)
            .map_err(|e| SensorError::bus(SENSOR, e))?;

        debug!("{} chip id {:#04x} at {:#04x}", SENSOR, id, self.address);
        Ok(())
    }
}

impl<I: I2c, D: DelayNs> Barometer for Bmp280<I, D> {
    fn measure(&mut self) -> Result<BarometricSample, SensorError> {
        let sample = self
            .sensor
            .read_sample()
            .map_err(|e| SensorError::bus(SENSOR, e))?;

        match (sample.temperature, sample.pressure) {
            (Some(temperature), Some(pressure_pa)) => Ok(BarometricSample {
                temperature,
                pressure_pa,
            }),
            _ => Err(SensorError::ReadFailed {
                sensor: SENSOR,
                operation: "read pressure",
            }),
        }
    }
}
