use anyhow::{Result, anyhow};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration as WifiConfig, EspWifi};
use klima::config::{WIFI_PASS, WIFI_POLL_INTERVAL_MS, WIFI_RECONNECT_POLLS, WIFI_SSID};
use log::{info, warn};

/// Joins the configured network and blocks until the station has an address.
///
/// There is no timeout: the loop polls at a fixed interval and re-issues the
/// connect request every few seconds while the link is down.
pub(crate) fn connect_wifi(
    modem: Modem,
    sys_loop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
) -> Result<EspWifi<'static>> {
    let mut wifi = EspWifi::new(modem, sys_loop, Some(nvs))?;
    wifi.set_configuration(&WifiConfig::Client(ClientConfiguration {
        ssid: WIFI_SSID
            .try_into()
            .map_err(|_| anyhow!("SSID is too long"))?,
        password: WIFI_PASS
            .try_into()
            .map_err(|_| anyhow!("Password is too long"))?,
        auth_method: AuthMethod::WPA2Personal,
        ..Default::default()
    }))?;
    wifi.start()?;
    info!("📶 WiFi starting, joining {}...", WIFI_SSID);

    if let Err(e) = wifi.connect() {
        warn!("📶 Connect call failed: {:?}", e);
    }

    let mut polls: u32 = 0;
    while !(wifi.is_connected()? && wifi.sta_netif().is_up()?) {
        FreeRtos::delay_ms(WIFI_POLL_INTERVAL_MS);
        polls = polls.wrapping_add(1);

        if polls % WIFI_RECONNECT_POLLS == 0 && !wifi.is_connected()? {
            info!("📶 Still not connected, asking again...");
            if let Err(e) = wifi.connect() {
                warn!("📶 Connect call failed: {:?}", e);
            }
        }
    }

    let ip_info = wifi.sta_netif().get_ip_info()?;
    info!("📶 WiFi Connected! IP: {}", ip_info.ip);
    info!("📶 Open http://{} in a browser", ip_info.ip);

    Ok(wifi)
}
