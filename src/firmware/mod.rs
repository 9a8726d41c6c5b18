//! ESP-IDF implementation of the bring-up [`Platform`].

#[cfg(feature = "web")]
mod network;
#[cfg(feature = "web")]
mod server;
#[cfg(feature = "spiffs")]
mod storage;

use embedded_hal_bus::i2c::MutexDevice;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::i2c::I2cDriver;
use klima::boot::Platform;
use std::sync::Mutex;
#[cfg(feature = "web")]
use {
    anyhow::Context,
    esp_idf_svc::eventloop::EspSystemEventLoop,
    esp_idf_svc::hal::modem::Modem,
    esp_idf_svc::http::server::EspHttpServer,
    esp_idf_svc::nvs::EspDefaultNvsPartition,
    esp_idf_svc::wifi::EspWifi,
    klima::boot::Station,
    klima::http::SharedService,
};

pub(crate) type SharedI2cBus = Mutex<I2cDriver<'static>>;
pub(crate) type I2cBusDevice = MutexDevice<'static, I2cDriver<'static>>;

pub(crate) struct EspPlatform {
    bus: &'static SharedI2cBus,
    #[cfg(feature = "web")]
    modem: Option<Modem>,
    #[cfg(feature = "web")]
    sys_loop: EspSystemEventLoop,
    // kept alive for as long as the firmware runs
    #[cfg(feature = "web")]
    _wifi: Option<EspWifi<'static>>,
    #[cfg(feature = "web")]
    _server: Option<EspHttpServer<'static>>,
}

impl EspPlatform {
    #[cfg(feature = "web")]
    pub(crate) fn new(bus: &'static SharedI2cBus, modem: Modem) -> anyhow::Result<Self> {
        let sys_loop = EspSystemEventLoop::take().context("Failed to take system event loop")?;
        Ok(Self {
            bus,
            modem: Some(modem),
            sys_loop,
            _wifi: None,
            _server: None,
        })
    }

    #[cfg(not(feature = "web"))]
    pub(crate) fn new(bus: &'static SharedI2cBus) -> anyhow::Result<Self> {
        Ok(Self { bus })
    }
}

impl Platform for EspPlatform {
    type Bus = I2cBusDevice;
    type Delay = FreeRtos;

    fn bus(&mut self) -> I2cBusDevice {
        MutexDevice::new(self.bus)
    }

    fn delay(&self) -> FreeRtos {
        FreeRtos
    }

    #[cfg(feature = "spiffs")]
    fn mount_storage(&mut self) -> anyhow::Result<std::path::PathBuf> {
        storage::mount_spiffs()
    }

    #[cfg(feature = "web")]
    fn join_network(&mut self) -> anyhow::Result<()> {
        let modem = self.modem.take().context("WiFi modem already taken")?;
        let nvs = EspDefaultNvsPartition::take().context("Failed to take NVS partition")?;
        self._wifi = Some(network::connect_wifi(modem, self.sys_loop.clone(), nvs)?);
        Ok(())
    }

    #[cfg(feature = "web")]
    fn serve(&mut self, service: SharedService<Station<Self>>) -> anyhow::Result<()> {
        self._server = Some(server::start(service)?);
        Ok(())
    }
}
