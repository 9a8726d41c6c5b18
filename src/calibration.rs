use crate::models::{RawSample, Reading};

/// Static linear correction applied to raw sensor output before reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub temp_offset: f32,
    pub hum_scale: f32,
    pub hum_offset: f32,
}

impl Calibration {
    pub const IDENTITY: Self = Self {
        temp_offset: 0.0,
        hum_scale: 1.0,
        hum_offset: 0.0,
    };

    pub fn apply(&self, raw: &RawSample, timestamp: u64) -> Reading {
        Reading {
            temperature: raw.temperature + self.temp_offset,
            humidity: raw.humidity * self.hum_scale + self.hum_offset,
            pressure: raw.pressure_pa / 100.0,
            timestamp,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::IDENTITY
    }
}
