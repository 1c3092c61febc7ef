//! Error types shared by the dashboard core

pub use display_interface::DisplayError;

/// Outcome of a bus receive that did not produce a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// Nothing arrived within the receive bound
    #[error("no frame received within timeout")]
    Timeout,

    /// Driver was never installed or failed to start
    #[error("bus driver not available")]
    Unavailable,

    /// Controller is not running (stopped, or bus-off after too many errors)
    #[error("bus controller not running")]
    BusOff,

    /// Any other driver error code
    #[error("bus driver error code {0}")]
    Driver(i32),
}

/// Errors from the display panel
///
/// The `ssd1306` crate folds I2C failures into [`DisplayError`], so the
/// variants only record which step failed.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("display initialisation failed: {0:?}")]
    Init(DisplayError),

    #[error("display flush failed: {0:?}")]
    Flush(DisplayError),
}
