#[cfg(target_os = "espidf")]
mod firmware;

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::hal::units::Hertz;
    use esp_idf_svc::log::EspLogger;
    use crate::firmware::{EspPlatform, SharedI2cBus};
    use klima::boot::{Fatal, Mode, Running, boot};
    use klima::config::{I2C_BAUDRATE, SERIAL_LOG_INTERVAL_MS};
    use klima::logging::print_splash_screen;
    use klima::time_utils;
    use std::sync::Mutex;

    esp_idf_svc::sys::link_patches();
    EspLogger::initialize_default();
    time_utils::mark_boot();
    print_splash_screen();

    let peripherals = Peripherals::take().context("Failed to take Peripherals")?;

    let i2c_config = I2cConfig::new().baudrate(Hertz::from(I2C_BAUDRATE));
    let i2c_driver = match I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio8, // SDA
        peripherals.pins.gpio9, // SCL
        &i2c_config,
    ) {
        Ok(driver) => driver,
        Err(e) => halt(Fatal::Bus(
            anyhow::Error::from(e).context("Failed to initialize I2C Driver"),
        )),
    };
    let i2c_bus: &'static SharedI2cBus = Box::leak(Box::new(Mutex::new(i2c_driver)));

    #[cfg(feature = "web")]
    let mut platform = EspPlatform::new(i2c_bus, peripherals.modem)?;
    #[cfg(not(feature = "web"))]
    let mut platform = EspPlatform::new(i2c_bus)?;

    match boot(&mut platform, Mode::from_features()) {
        #[cfg(feature = "web")]
        Ok(Running::Serving(_service)) => loop {
            FreeRtos::delay_ms(klima::config::IDLE_DELAY_MS);
        },
        Ok(Running::Logging(mut station)) => loop {
            station.update();
            FreeRtos::delay_ms(SERIAL_LOG_INTERVAL_MS);
        },
        Err(fatal) => halt(fatal),
    }
}

/// Logs the failure and parks the main task for good. Only a reset recovers.
#[cfg(target_os = "espidf")]
fn halt(fatal: klima::boot::Fatal) -> ! {
    klima::logging::log_fatal(&fatal.to_string());
    klima::logging::log_fatal("Halted, reset the board to retry");
    loop {
        std::thread::park();
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "klima-rs is ESP-IDF firmware, build it for an `*-espidf` target. \
         The library and its tests build on the host."
    );
}
