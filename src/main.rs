//! Dashboard firmware for the ESP32-C3
//!
//! Brings up the TWAI bus, the four buttons and the SSD1306 panel, then
//! hands them to the dashboard loop. Only builds for ESP-IDF targets; the
//! hardware independent core lives in the library and is tested on the host.

#[cfg(target_os = "espidf")]
mod twai;

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::{
    delay::FreeRtos,
    gpio::{self, PinDriver},
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    prelude::*,
};

#[cfg(target_os = "espidf")]
use dashcan::{display, Dashboard, DashboardConfig, InputSampler};

/// Park the main task forever. Used when the display cannot be brought up.
#[cfg(target_os = "espidf")]
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(1000);
    }
}

// https://docs.esp-rs.org/esp-idf-svc/esp_idf_svc/
#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let config = DashboardConfig::default();
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // Bus failures are not fatal: the loop keeps running without speed updates
    log::info!("Initializing TWAI...");
    let bus = match twai::TwaiBus::install(
        peripherals.can,
        pins.gpio21, // TX - Pins::CAN_TX
        pins.gpio20, // RX - Pins::CAN_RX
        config.bus_bitrate_kbps,
    ) {
        Ok(bus) => Some(bus),
        Err(e) => {
            log::error!("{:#}", e);
            log::warn!("Continuing without bus, speed stays at {}", config.initial.speed);
            None
        }
    };

    log::info!("Configuring buttons");
    let inputs = InputSampler::new(
        PinDriver::input(gpio::AnyInputPin::from(pins.gpio2))?, // Pins::BTN_PAGE_LEFT
        PinDriver::input(gpio::AnyInputPin::from(pins.gpio3))?, // Pins::BTN_PAGE_RIGHT
        PinDriver::input(gpio::AnyInputPin::from(pins.gpio8))?, // Pins::BTN_GEAR_UP
        PinDriver::input(gpio::AnyInputPin::from(pins.gpio4))?, // Pins::BTN_GEAR_DOWN
    );

    log::info!("Configuring I2C for the display");
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio6, // SDA - Pins::I2C_SDA
        pins.gpio7, // SCL - Pins::I2C_SCL
        &I2cConfig::new().baudrate(config.i2c_baudrate_khz.kHz().into()),
    )?;

    let panel = match display::init_oled(i2c, config.display_address) {
        Ok(panel) => panel,
        Err(e) => {
            log::error!("SSD1306 allocation failed: {}", e);
            halt();
        }
    };

    log::info!("Setup completed");

    let mut dashboard = Dashboard::new(bus, inputs, panel, config);
    dashboard.redraw();
    dashboard.run(&mut FreeRtos)
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("dashcan firmware only runs on ESP-IDF targets, build with an espidf target")
}
