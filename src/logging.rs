use crate::models::Reading;
use crate::time_utils::get_uptime_string;
use log::{error, info, warn};

const SPLASH_SCREEN: &str = r#"
  _    _ _
 | | _| (_)_ __ ___   __ _       _ __ ___
 | |/ / | | '_ ` _ \ / _` |_____| '__/ __|
 |   <| | | | | | | | (_| |_____| |  \__ \
 |_|\_\_|_|_| |_| |_|\__,_|     |_|  |___/
"#;

pub(crate) enum LogLevel {
    Info,
    Warn,
    Error,
}

pub fn print_splash_screen() {
    info!("{}", SPLASH_SCREEN);
}

pub(crate) fn log_reading(reading: &Reading) {
    let msg = format!(
        "[ 🌡️ Temp {:.2}C | 💧Humidity {:.2}% | ☁️ Pressure {:.2} hPa ]",
        reading.temperature, reading.humidity, reading.pressure
    );
    log_message(LogLevel::Info, &msg);
}

pub(crate) fn log_sensor_error(sensor_name: &str, error: impl std::fmt::Debug) {
    log_message(
        LogLevel::Error,
        &format!("🚫 {} Error: {:?}", sensor_name, error),
    );
}

pub fn log_ok(message: &str) {
    info!("\x1b[38;5;27m✅ {}\x1b[0m", message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warn, message);
}

pub fn log_fatal(message: &str) {
    log_message(LogLevel::Error, &format!("‼️ {}", message));
}

fn log_message(level: LogLevel, message: &str) {
    let prefix = get_uptime_string();

    match level {
        LogLevel::Error => error!("\x1b[31m{} {}\x1b[0m", prefix, message),
        LogLevel::Warn => warn!("\x1b[38;5;11m{} {}\x1b[0m", prefix, message),
        LogLevel::Info => info!("\x1b[38;5;40m{} {}\x1b[0m", prefix, message),
    }
}
