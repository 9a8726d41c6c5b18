//! AHT20 hygrometer on top of the `aht20-driver` crate.

use super::{Climate, Hygrometer, SensorError};
use aht20_driver::AHT20;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

const SENSOR: &str = "AHT20";

pub struct Aht20<I: I2c, D> {
    sensor: AHT20<I>,
    delay: D,
}

impl<I: I2c, D: DelayNs> Aht20<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            sensor: AHT20::new(i2c, address),
            delay,
        }
    }

    /// Waits out the power-on time and makes sure the calibration bit is set.
    pub fn init(&mut self) -> Result<(), SensorError> {
        self.sensor.init(&mut self.delay).map_err(|e| {
            log::error!("{} init failed: {:?}", SENSOR, e);
            SensorError::ReadFailed {
                sensor: SENSOR,
                operation: "initialize",
            }
        })?;
        Ok(())
    }
}

impl<I: I2c, D: DelayNs> Hygrometer for Aht20<I, D> {
    fn measure(&mut self) -> Result<Climate, SensorError> {
        let reading = self
            .sensor
            .init(&mut self.delay)
            .and_then(|mut sensor| sensor.measure(&mut self.delay))
            .map_err(|e| {
                log::error!("{} measurement failed: {:?}", SENSOR, e);
                SensorError::ReadFailed {
                    sensor: SENSOR,
                    operation: "measure temperature/humidity",
                }
            })?;

        Ok(Climate {
            temperature: reading.temperature,
            humidity: reading.humidity,
        })
    }
}
