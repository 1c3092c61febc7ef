//! Bus receive and speed decoding
//!
//! The bus controller is abstracted as a [`FrameSource`]. Every poll cycle
//! the main loop asks it for one frame with a bounded wait and feeds the
//! result to [`apply_reception`], which updates the speed and logs what
//! arrived. Nothing here is fatal: timeouts and driver errors are logged and
//! the loop carries on.
//!
//! The speed signal is the last data byte of any non-remote frame.

use core::time::Duration;

use log::{debug, info, warn};

use crate::error::BusError;
use crate::state::DashboardState;

pub mod frame;
pub use frame::{BusFrame, MAX_DATA_LEN};

/// Something that can hand out received bus frames
pub trait FrameSource {
    /// Wait at most `timeout` for the next frame.
    ///
    /// Implementations must return [`BusError::Timeout`] rather than block
    /// past the bound.
    fn receive(&mut self, timeout: Duration) -> Result<BusFrame, BusError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn receive(&mut self, timeout: Duration) -> Result<BusFrame, BusError> {
        (**self).receive(timeout)
    }
}

/// A bus whose driver failed to install or start
impl<S: FrameSource> FrameSource for Option<S> {
    fn receive(&mut self, timeout: Duration) -> Result<BusFrame, BusError> {
        match self {
            Some(source) => source.receive(timeout),
            None => Err(BusError::Unavailable),
        }
    }
}

/// Signal carried by a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Speed(u8),
    NoOp,
}

/// Extract the speed from a frame.
///
/// Each payload byte is logged and the last one wins. Remote frames and
/// empty payloads decode to [`Decoded::NoOp`].
pub fn decode(frame: &BusFrame) -> Decoded {
    if frame.remote {
        debug!("Remote request for ID {}, no payload", frame.identifier);
        return Decoded::NoOp;
    }

    let mut speed = None;
    for (i, byte) in frame.data.iter().enumerate() {
        info!("Data byte {} = {}", i, byte);
        speed = Some(*byte);
    }

    speed.map_or(Decoded::NoOp, Decoded::Speed)
}

/// Apply one receive result to the state
pub fn apply_reception(state: &mut DashboardState, received: Result<BusFrame, BusError>) -> Decoded {
    let frame = match received {
        Ok(frame) => frame,
        Err(BusError::Timeout) => {
            info!("Failed to receive message: {}", BusError::Timeout);
            return Decoded::NoOp;
        }
        Err(e) => {
            warn!("Failed to receive message: {}", e);
            return Decoded::NoOp;
        }
    };

    info!(
        "Message received: {} format, ID {}, {} bytes",
        frame.format_name(),
        frame.identifier,
        frame.dlc()
    );

    let decoded = decode(&frame);
    if let Decoded::Speed(speed) = decoded {
        state.set_speed(speed);
    }
    decoded
}
