//! The two I2C peripherals on the board, each a registry driver behind a
//! small trait so the station can run against scripted sensors in tests.

pub mod aht20;
pub mod bmp280;

#[cfg(test)]
pub(crate) mod fake;

use embedded_hal::i2c::ErrorKind;
use thiserror::Error;

pub use aht20::Aht20;
pub use bmp280::Bmp280;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor}: I2C transfer failed ({kind:?})")]
    Bus {
        sensor: &'static str,
        kind: ErrorKind,
    },
    #[error("{sensor}: unexpected chip id {id:#04x}")]
    UnknownChip { sensor: &'static str, id: u8 },
    #[error("{sensor}: {operation} failed")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
    },
}

impl SensorError {
    pub(crate) fn bus<E: embedded_hal::i2c::Error>(sensor: &'static str, error: E) -> Self {
        Self::Bus {
            sensor,
            kind: error.kind(),
        }
    }
}

/// Pressure plus the die temperature the barometer needs for compensation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BarometricSample {
    pub temperature: f32,
    pub pressure_pa: f32,
}

/// Temperature and relative humidity from one combined-sensor transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Climate {
    pub temperature: f32,
    pub humidity: f32,
}

pub trait Barometer {
    fn measure(&mut self) -> Result<BarometricSample, SensorError>;
}

pub trait Hygrometer {
    fn measure(&mut self) -> Result<Climate, SensorError>;
}
