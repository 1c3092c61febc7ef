//! TWAI (CAN) bus driver glue for the ESP32
//!
//! Installs and starts the ESP-IDF TWAI driver and exposes it to the
//! dashboard as a [`FrameSource`].

use anyhow::{Context, Result};
use core::time::Duration;
use esp_idf_svc::hal::can::{
    config::{Config, Timing},
    CanDriver, Frame, CAN,
};
use esp_idf_svc::hal::delay::TickType;
use esp_idf_svc::hal::gpio::{InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::sys::{self, EspError};
use log::{info, warn};

use dashcan::{BusError, BusFrame, FrameSource};

/// Map a bit rate in kbit/s to one of the driver's timing presets
pub fn timing_for(bitrate_kbps: u32) -> Result<Timing> {
    let timing = match bitrate_kbps {
        25 => Timing::B25K,
        50 => Timing::B50K,
        100 => Timing::B100K,
        125 => Timing::B125K,
        250 => Timing::B250K,
        500 => Timing::B500K,
        800 => Timing::B800K,
        1000 => Timing::B1M,
        other => anyhow::bail!("Unsupported TWAI bit rate: {} kbit/s", other),
    };
    Ok(timing)
}

pub struct TwaiBus<'d> {
    driver: CanDriver<'d>,
}

impl<'d> TwaiBus<'d> {
    /// Install and start the driver in normal mode.
    ///
    /// The default filter configuration accepts every identifier.
    pub fn install(
        can: impl Peripheral<P = CAN> + 'd,
        tx: impl Peripheral<P = impl OutputPin> + 'd,
        rx: impl Peripheral<P = impl InputPin> + 'd,
        bitrate_kbps: u32,
    ) -> Result<Self> {
        let config = Config::new().timing(timing_for(bitrate_kbps)?);

        let mut driver =
            CanDriver::new(can, tx, rx, &config).context("Failed to install TWAI driver")?;
        info!("TWAI driver installed successfully");

        driver.start().context("Failed to start TWAI driver")?;
        info!("TWAI driver started successfully at {} kbit/s", bitrate_kbps);

        let bus = Self { driver };
        bus.check_status();
        Ok(bus)
    }

    /// Double-check the controller state after start
    fn check_status(&self) {
        let mut status = sys::twai_status_info_t::default();
        // Only reads driver state, valid any time after install
        if let Err(e) = sys::esp!(unsafe { sys::twai_get_status_info(&mut status as *mut _) }) {
            warn!("Could not read TWAI status: {}", e);
            return;
        }

        info!(
            "TWAI state: {}, rx queue: {}, bus errors: {}",
            status.state, status.msgs_to_rx, status.bus_error_count
        );
        if status.state != sys::twai_state_t_TWAI_STATE_RUNNING {
            warn!("TWAI driver is not in running state!");
        }
    }
}

fn to_bus_frame(frame: &Frame) -> BusFrame {
    BusFrame::from_driver(
        frame.is_extended(),
        frame.identifier(),
        frame.is_remote_frame(),
        frame.data(),
    )
}

fn to_bus_error(err: EspError) -> BusError {
    match err.code() {
        code if code == sys::ESP_ERR_TIMEOUT as sys::esp_err_t => BusError::Timeout,
        code if code == sys::ESP_ERR_INVALID_STATE as sys::esp_err_t => BusError::BusOff,
        code => BusError::Driver(code),
    }
}

impl FrameSource for TwaiBus<'_> {
    fn receive(&mut self, timeout: Duration) -> Result<BusFrame, BusError> {
        let ticks = TickType::from(timeout).ticks();
        self.driver
            .receive(ticks)
            .map(|frame| to_bus_frame(&frame))
            .map_err(to_bus_error)
    }
}
