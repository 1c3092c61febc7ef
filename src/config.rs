//! Pin assignments and runtime constants for the dashboard
//!
//! Everything here is fixed at compile time. The firmware keeps no persisted
//! configuration; all state resets to [`DashboardConfig::default`] on restart.

use core::time::Duration;

/// Pin configuration constants for the ESP32-C3 dashboard board
pub struct Pins;

impl Pins {
    // Buttons (active high, external pull-downs)
    /// Thumb button, previous page
    pub const BTN_PAGE_LEFT: u8 = 2;
    /// Thumb button, next page
    pub const BTN_PAGE_RIGHT: u8 = 3;
    /// Shift paddle, gear up
    pub const BTN_GEAR_UP: u8 = 8;
    /// Shift paddle, gear down
    pub const BTN_GEAR_DOWN: u8 = 4;

    // TWAI transceiver
    /// TWAI transmit line
    pub const CAN_TX: u8 = 21;
    /// TWAI receive line
    pub const CAN_RX: u8 = 20;

    // OLED I2C
    /// I2C data line
    pub const I2C_SDA: u8 = 6;
    /// I2C clock line
    pub const I2C_SCL: u8 = 7;
}

/// Initial values the dashboard shows before anything arrives on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialState {
    pub speed: u8,
    pub gear: u8,
    pub page: u8,
}

impl Default for InitialState {
    fn default() -> Self {
        Self {
            speed: 25,
            gear: 1,
            page: 1,
        }
    }
}

/// Timing, bus and panel settings for the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Delay at the top of every loop iteration
    pub poll_interval: Duration,
    /// Upper bound for a single bus receive call
    pub receive_timeout: Duration,
    /// Bus bit rate in kbit/s
    pub bus_bitrate_kbps: u32,
    /// 7-bit I2C address of the SSD1306 panel
    pub display_address: u8,
    /// I2C clock for the panel in kHz
    pub i2c_baudrate_khz: u32,
    pub initial: InitialState,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
            receive_timeout: Duration::from_millis(1000),
            bus_bitrate_kbps: 500,
            display_address: 0x3C,
            i2c_baudrate_khz: 400,
            initial: InitialState::default(),
        }
    }
}

impl DashboardConfig {
    /// Poll interval in whole milliseconds, as taken by `DelayNs::delay_ms`
    pub fn poll_interval_ms(&self) -> u32 {
        u32::try_from(self.poll_interval.as_millis()).unwrap_or(u32::MAX)
    }
}
