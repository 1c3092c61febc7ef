//! SSD1306 panel over I2C.
//!
//! Wraps the [`ssd1306`] crate in buffered graphics mode. The layout draws
//! into the in-memory frame buffer and [`Panel::present`] pushes it to the
//! hardware.

use display_interface::WriteOnlyDataCommand;
use display_interface_i2c::I2CInterface;
use embedded_hal::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, size::DisplaySize, I2CDisplayInterface, Ssd1306};

use super::Panel;
use crate::error::PanelError;

/// Concrete panel type used by the firmware
pub type Oled<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Build and initialise a 128x64 panel at `address`.
///
/// Fails if the panel does not acknowledge the initialisation sequence.
pub fn init_oled<I2C>(i2c: I2C, address: u8) -> Result<Oled<I2C>, PanelError>
where
    I2C: I2c,
{
    let interface = I2CDisplayInterface::new_custom_address(i2c, address);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();

    display.init().map_err(PanelError::Init)?;
    display.clear_buffer();
    display.flush().map_err(PanelError::Flush)?;

    Ok(display)
}

impl<DI, SIZE> Panel for Ssd1306<DI, SIZE, BufferedGraphicsMode<SIZE>>
where
    DI: WriteOnlyDataCommand,
    SIZE: DisplaySize,
{
    fn clear_frame(&mut self) {
        self.clear_buffer();
    }

    fn present(&mut self) -> Result<(), PanelError> {
        self.flush().map_err(PanelError::Flush)
    }
}
