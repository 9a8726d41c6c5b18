use serde::Serialize;

/// The latest calibrated reading as served on `/sensors`.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub timestamp: u64,
}

/// Uncalibrated values straight from the drivers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSample {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure_pa: f32,
}
