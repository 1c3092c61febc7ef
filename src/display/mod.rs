//! Dashboard display
//!
//! [`layout`] maps the dashboard state to draw commands and rasterises
//! them; [`oled`] provides the SSD1306 panel the firmware draws on.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget};

use crate::error::PanelError;

pub mod layout;
pub mod oled;

pub use layout::{compose, render, DrawCommand, DrawList, Fill, Glyph, TextSize};
pub use oled::{init_oled, Oled};

/// A buffered monochrome display
///
/// Drawing goes to an in-memory frame; nothing reaches the hardware until
/// [`present`](Panel::present).
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Blank the frame buffer. No bus traffic.
    fn clear_frame(&mut self);

    /// Transfer the frame buffer to the hardware
    fn present(&mut self) -> Result<(), PanelError>;
}
